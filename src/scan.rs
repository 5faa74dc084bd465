//! File discovery and classification.
//!
//! Discovery lists the candidate files of a collection; classification sorts
//! them into three buckets:
//!
//! | Bucket | Rule |
//! |--------|------|
//! | `ignored` | extension does not map to an allowed image mime type |
//! | `resized` | file name carries a derived size suffix (see [`crate::naming`]) |
//! | `original` | everything else |
//!
//! ## Discovery rules
//!
//! - Only names containing a dot are listed (`*.*`), so `README` or `Makefile`
//!   never show up at all.
//! - Hidden files and hidden directories are skipped.
//! - Subdirectories are walked only for `recursive` collections.
//! - Entries are sorted by file name within each directory so runs are
//!   reproducible.
//!
//! The mime type comes from the extension alone (case-insensitive). A file
//! whose content does not match its extension is still classified by the
//! extension and fails later, at decode time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::naming::is_derived_filename;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Permission denied for directory \"{}\"", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Mime types eligible for resizing.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/svg+xml",
];

/// Extension → mime type table. Includes some image types that are
/// recognised but not in [`ALLOWED_MIME_TYPES`].
const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    ("heic", "image/heic"),
];

/// Mime type for a path, derived from its extension.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    MIME_BY_EXTENSION
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Whether the path's mime type is on the allow-list.
pub fn is_supported_image(path: &Path) -> bool {
    mime_type(path).is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m))
}

/// Files of one collection, split by role.
///
/// Each bucket keeps the input order; every input path is in exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub original: Vec<PathBuf>,
    pub resized: Vec<PathBuf>,
    pub ignored: Vec<PathBuf>,
}

impl Classified {
    pub fn len(&self) -> usize {
        self.original.len() + self.resized.len() + self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition paths into original, resized and ignored files.
pub fn classify<I>(paths: I) -> Classified
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut classified = Classified::default();

    for path in paths {
        if !is_supported_image(&path) {
            classified.ignored.push(path);
        } else if is_derived_filename(&path) {
            classified.resized.push(path);
        } else {
            classified.original.push(path);
        }
    }

    classified
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_extension_dot(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().contains('.')
}

/// List the candidate files under `root`.
///
/// Returns paths rooted at `root` (absolute when `root` is). Fails on the
/// first unreadable entry; a permission problem gets its own error so the
/// report can say so plainly.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, DiscoveryError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        // Symlinked files count; symlinked directories are not descended into.
        if entry.path().is_file() && has_extension_dot(&entry) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "discovered files");
    Ok(files)
}

fn walk_error(root: &Path, err: walkdir::Error) -> DiscoveryError {
    let path = err.path().unwrap_or(root).to_path_buf();
    if err.io_error().map(|e| e.kind()) == Some(ErrorKind::PermissionDenied) {
        DiscoveryError::PermissionDenied(path)
    } else {
        DiscoveryError::Walk { path, source: err }
    }
}
