//! Collection processing: the resize pipeline.
//!
//! For every configured collection, in order:
//!
//! ```text
//! Validating → Discovering → (Removing)? → Resizing → Done
//!      │             │
//!      └──── Failed ─┘          (reported, next collection runs)
//! ```
//!
//! - **Validating**: [`validate_collection`] on the resolved collection.
//! - **Discovering**: [`discover`] + [`classify`]. No originals means the
//!   collection is done, whatever the mode: nothing is removed either.
//! - **Removing**: only in `remove`/`recreate` mode. Every file in the
//!   `resized` bucket is deleted (or trashed), one at a time, and each deletion
//!   finishes before it is counted and before any resizing starts. `remove`
//!   stops here; `recreate` goes on to resize.
//! - **Resizing**: every original × every size, originals outer, sizes inner.
//!   A variant whose target already exists is skipped, never overwritten.
//!
//! ## Failure policy
//!
//! Errors are contained as tightly as the work allows:
//!
//! | Error | Scope | Effect |
//! |-------|-------|--------|
//! | [`ConfigError`] | collection | collection skipped |
//! | [`DiscoveryError`] | collection | collection skipped |
//! | [`BackendError`] | one (file, size) pair | `failed += 1`, next pair runs |
//! | removal error | one file | `failed += 1`, next file runs |
//!
//! A failed resize therefore never stops the run. The run as a whole is only
//! unsuccessful when no collection got past discovery
//! ([`RunSummary::ensure_progress`]); the summary is produced either way.
//!
//! ## Progress
//!
//! The pipeline is strictly sequential. Progress is published as
//! [`ProcessEvent`]s on an optional channel; the CLI drains it on a printer
//! thread and renders each event with
//! [`output::format_process_event`](crate::output::format_process_event).

use crate::config::{Config, ConfigError, ResolvedCollection, SizeSpec, validate_collection};
use crate::imaging::{BackendError, ImageBackend, plan_variant, write_variant};
use crate::naming::derived_filename;
use crate::scan::{DiscoveryError, classify, discover};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// What a run does with previously generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Create missing variants, keep existing ones.
    #[default]
    Create,
    /// Delete existing variants, create nothing.
    Remove,
    /// Delete existing variants, then create all of them again.
    Recreate,
    /// Validate and classify only; touch no file.
    Check,
}

impl RunMode {
    /// Mode selected by the `remove`/`recreate` tokens. `remove` wins when
    /// both are given.
    pub fn from_tokens(remove: bool, recreate: bool) -> Self {
        match (remove, recreate) {
            (true, _) => RunMode::Remove,
            (false, true) => RunMode::Recreate,
            (false, false) => RunMode::Create,
        }
    }

    /// Whether this mode deletes existing variants.
    pub fn removes(self) -> bool {
        matches!(self, RunMode::Remove | RunMode::Recreate)
    }
}

/// How removed variants leave the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Delete,
    Trash,
}

impl Removal {
    pub fn from_settings(use_trash: bool) -> Self {
        if use_trash { Removal::Trash } else { Removal::Delete }
    }

    fn remove(self, path: &Path) -> Result<(), RemoveError> {
        match self {
            Removal::Delete => std::fs::remove_file(path)?,
            Removal::Trash => trash::delete(path)?,
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum RemoveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Trash error: {0}")]
    Trash(#[from] trash::Error),
}

/// Why a collection could not be processed.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("None of the {0} configured collections could be processed")]
    NothingProcessed(usize),
}

/// Counters for one run. Only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub created: usize,
    pub skipped: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Result of one (file, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStatus {
    Created,
    Skipped,
}

/// Where a collection ended up.
#[derive(Debug)]
pub enum CollectionOutcome {
    Failed(CollectionError),
    NoImages,
    Checked { originals: usize, resized: usize },
    Removed { originals: usize },
    Resized { originals: usize },
}

#[derive(Debug)]
pub struct CollectionReport {
    pub name: String,
    pub outcome: CollectionOutcome,
}

/// Everything the final report needs.
#[derive(Debug)]
pub struct RunSummary {
    pub mode: RunMode,
    pub stats: RunStats,
    pub elapsed: Duration,
    pub collections: Vec<CollectionReport>,
}

impl RunSummary {
    /// Fails when every collection failed, i.e. the run could make no progress.
    pub fn ensure_progress(&self) -> Result<(), RunError> {
        let all_failed = self
            .collections
            .iter()
            .all(|c| matches!(c.outcome, CollectionOutcome::Failed(_)));
        if all_failed {
            Err(RunError::NothingProcessed(self.collections.len()))
        } else {
            Ok(())
        }
    }
}

/// Progress events, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    CollectionStarted {
        name: String,
    },
    CollectionFailed {
        name: String,
        message: String,
    },
    FilesClassified {
        originals: usize,
        resized: usize,
        ignored: usize,
    },
    NoImages,
    RemovalStarted,
    FileRemoved {
        path: PathBuf,
    },
    RemoveFailed {
        path: PathBuf,
        message: String,
    },
    RemovalFinished,
    ImageStarted {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    VariantProcessed {
        filename: OsString,
        status: VariantStatus,
    },
    VariantFailed {
        filename: OsString,
        message: String,
    },
    ImageFinished,
}

/// Options fixed for the whole run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: RunMode,
    /// Directory relative collection sources are resolved against.
    pub base_dir: PathBuf,
    /// When the run started; the summary's runtime is measured from here.
    pub started: Instant,
}

fn emit(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening.
        let _ = tx.send(event);
    }
}

/// Process every collection of `config`.
///
/// Never fails as a whole: per-collection and per-file problems are reported
/// through `events` and recorded in the returned summary.
pub fn run(
    config: &Config,
    options: &RunOptions,
    backend: &impl ImageBackend,
    events: Option<Sender<ProcessEvent>>,
) -> RunSummary {
    let removal = Removal::from_settings(config.settings.use_trash);
    let mut stats = RunStats::default();
    let mut collections = Vec::with_capacity(config.collections.len());

    for collection in &config.collections {
        let resolved = collection.resolve(&options.base_dir);
        let outcome = run_collection(
            &resolved,
            options.mode,
            removal,
            backend,
            &mut stats,
            &events,
        );
        collections.push(CollectionReport {
            name: resolved.name,
            outcome,
        });
    }

    let elapsed = options.started.elapsed();
    info!(?stats, ?elapsed, "run finished");

    RunSummary {
        mode: options.mode,
        stats,
        elapsed,
        collections,
    }
}

/// Run one collection through the state machine described in the module docs.
pub fn run_collection(
    collection: &ResolvedCollection,
    mode: RunMode,
    removal: Removal,
    backend: &impl ImageBackend,
    stats: &mut RunStats,
    events: &Option<Sender<ProcessEvent>>,
) -> CollectionOutcome {
    info!(name = %collection.name, source = %collection.source_path.display(), "collection");
    emit(
        events,
        ProcessEvent::CollectionStarted {
            name: collection.name.clone(),
        },
    );

    let files = match validate_collection(collection)
        .map_err(CollectionError::from)
        .and_then(|()| {
            discover(&collection.source_path, collection.recursive).map_err(CollectionError::from)
        }) {
        Ok(files) => files,
        Err(err) => {
            warn!(name = %collection.name, error = %err, "collection skipped");
            emit(
                events,
                ProcessEvent::CollectionFailed {
                    name: collection.name.clone(),
                    message: err.to_string(),
                },
            );
            return CollectionOutcome::Failed(err);
        }
    };

    let classified = classify(files);
    debug!(
        originals = classified.original.len(),
        resized = classified.resized.len(),
        ignored = classified.ignored.len(),
        "classified"
    );

    if classified.original.is_empty() {
        emit(events, ProcessEvent::NoImages);
        return CollectionOutcome::NoImages;
    }

    emit(
        events,
        ProcessEvent::FilesClassified {
            originals: classified.original.len(),
            resized: classified.resized.len(),
            ignored: classified.ignored.len(),
        },
    );

    let originals = classified.original.len();
    if mode == RunMode::Check {
        return CollectionOutcome::Checked {
            originals,
            resized: classified.resized.len(),
        };
    }

    if mode.removes() {
        remove_variants(&classified.resized, removal, stats, events);
        if mode == RunMode::Remove {
            return CollectionOutcome::Removed { originals };
        }
    }

    resize_images(&classified.original, &collection.sizes, backend, stats, events);
    CollectionOutcome::Resized { originals }
}

/// Delete (or trash) every file in `files`, in order.
fn remove_variants(
    files: &[PathBuf],
    removal: Removal,
    stats: &mut RunStats,
    events: &Option<Sender<ProcessEvent>>,
) {
    emit(events, ProcessEvent::RemovalStarted);

    for path in files {
        match removal.remove(path) {
            Ok(()) => {
                stats.removed += 1;
                emit(events, ProcessEvent::FileRemoved { path: path.clone() });
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "remove failed");
                stats.failed += 1;
                emit(
                    events,
                    ProcessEvent::RemoveFailed {
                        path: path.clone(),
                        message: err.to_string(),
                    },
                );
            }
        }
    }

    emit(events, ProcessEvent::RemovalFinished);
}

/// Resize every original to every size. Failures are counted, not propagated.
fn resize_images(
    originals: &[PathBuf],
    sizes: &[SizeSpec],
    backend: &impl ImageBackend,
    stats: &mut RunStats,
    events: &Option<Sender<ProcessEvent>>,
) {
    let total = originals.len();

    for (i, original) in originals.iter().enumerate() {
        emit(
            events,
            ProcessEvent::ImageStarted {
                index: i + 1,
                total,
                path: original.clone(),
            },
        );

        for size in sizes {
            let filename = derived_filename(original, size);
            match resize_one(backend, original, size, stats) {
                Ok(status) => emit(events, ProcessEvent::VariantProcessed { filename, status }),
                Err(err) => {
                    warn!(
                        source = %original.display(),
                        size = %size.name,
                        error = %err,
                        "resize failed"
                    );
                    stats.failed += 1;
                    emit(
                        events,
                        ProcessEvent::VariantFailed {
                            filename,
                            message: err.to_string(),
                        },
                    );
                }
            }
        }

        emit(events, ProcessEvent::ImageFinished);
    }
}

/// Produce one variant of `original`, unless it already exists.
///
/// An existing target is never overwritten: the pair counts as skipped and
/// the backend is not called. Otherwise the backend output is written next
/// to the original and the pair counts as created. Errors leave `stats`
/// untouched; the caller decides how to count them.
pub fn resize_one(
    backend: &impl ImageBackend,
    original: &Path,
    size: &SizeSpec,
    stats: &mut RunStats,
) -> Result<VariantStatus, BackendError> {
    let params = plan_variant(original, size);

    if params.output.exists() {
        stats.skipped += 1;
        return Ok(VariantStatus::Skipped);
    }

    write_variant(backend, &params)?;
    stats.created += 1;
    Ok(VariantStatus::Created)
}
