//! CLI output formatting for the resize run.
//!
//! # Output Format
//!
//! ```text
//! #######################
//! # Collection "Slides" #
//! #######################
//!
//! 2 original image files found.
//!
//! Removing resized image formats.
//!   => /site/img/slides/cat-w800.jpg
//!
//! Resizing image 1 of 2 (/site/img/slides/cat.jpg)
//!   => cat-1110x547.jpg
//!   => cat-w800.jpg (skipped)
//!
//! #####################
//! # Finished Resizing #
//! #####################
//!
//! Script Runtime:
//! 0.42s
//!
//! File Stats:
//!  1  image files removed
//!  2  image files created
//! ```
//!
//! Errors are a single line: `### ERROR: <message>`.
//!
//! # Architecture
//!
//! Each part has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::process::{ProcessEvent, RunMode, RunSummary, VariantStatus};

/// A title boxed in `#` characters, followed by a blank line.
pub fn format_title(title: &str) -> Vec<String> {
    let line = "#".repeat(title.chars().count() + 4);
    vec![line.clone(), format!("# {title} #"), line, String::new()]
}

/// A user-facing error line.
pub fn format_error(message: &str) -> Vec<String> {
    vec![format!("### ERROR: {message}"), String::new()]
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::CollectionStarted { name } => {
            format_title(&format!("Collection \"{name}\""))
        }
        ProcessEvent::CollectionFailed { message, .. } => format_error(message),
        ProcessEvent::FilesClassified { originals, .. } => {
            let noun = if *originals < 2 { "file" } else { "files" };
            vec![
                format!("{originals} original image {noun} found."),
                String::new(),
            ]
        }
        ProcessEvent::NoImages => vec!["No images found.".to_string(), String::new()],
        ProcessEvent::RemovalStarted => vec!["Removing resized image formats.".to_string()],
        ProcessEvent::FileRemoved { path } => vec![format!("  => {}", path.display())],
        ProcessEvent::RemoveFailed { path, message } => {
            vec![format!("  => {} (failed: {message})", path.display())]
        }
        ProcessEvent::RemovalFinished | ProcessEvent::ImageFinished => vec![String::new()],
        ProcessEvent::ImageStarted { index, total, path } => {
            vec![format!("Resizing image {index} of {total} ({})", path.display())]
        }
        ProcessEvent::VariantProcessed { filename, status } => {
            let filename = filename.to_string_lossy();
            match status {
                VariantStatus::Created => vec![format!("  => {filename}")],
                VariantStatus::Skipped => vec![format!("  => {filename} (skipped)")],
            }
        }
        ProcessEvent::VariantFailed { filename, message } => vec![
            format!("  => {}", filename.to_string_lossy()),
            format!("### ERROR: {message}"),
        ],
    }
}

/// Format the end-of-run summary.
///
/// Visibility rules per counter:
/// - removed: only in `remove`/`recreate` mode, even when zero
/// - created: only when non-zero
/// - skipped: only when non-zero and no removal mode is active
/// - failed: only when non-zero
///
/// Counts are right-aligned to one column wider than the widest counter.
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    let title = match summary.mode {
        RunMode::Check => "Finished Checking",
        _ => "Finished Resizing",
    };
    let mut lines = format_title(title);

    lines.push("Script Runtime:".to_string());
    lines.push(format!("{:.2}s", summary.elapsed.as_secs_f64()));
    lines.push(String::new());
    lines.push("File Stats:".to_string());

    let stats = &summary.stats;
    let width = [stats.created, stats.skipped, stats.removed, stats.failed]
        .iter()
        .map(|n| n.to_string().len())
        .max()
        .unwrap_or(1)
        + 1;
    let row = |count: usize, label: &str| format!("{count:>width$}  image files {label}");

    let removes = summary.mode.removes();
    if removes {
        lines.push(row(stats.removed, "removed"));
    }
    if stats.created > 0 {
        lines.push(row(stats.created, "created"));
    }
    if stats.skipped > 0 && !removes {
        lines.push(row(stats.skipped, "skipped"));
    }
    if stats.failed > 0 {
        lines.push(row(stats.failed, "failed"));
    }

    lines
}

/// Print a progress event to stdout.
pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

/// Print an error to stdout, in report style.
pub fn print_error(message: &str) {
    for line in format_error(message) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
