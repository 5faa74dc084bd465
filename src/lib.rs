//! # Responsive Images
//!
//! Batch-generates resized variants of the images in a set of directories,
//! for responsive web delivery. Each configured *collection* is a source
//! directory plus a list of target sizes; every original image in the
//! directory gets one variant per size, written next to it:
//!
//! ```text
//! img/slides/
//! ├── lonely-cat.jpg              ← original
//! ├── lonely-cat-1110x547.jpg     ← width × height
//! ├── lonely-cat-w510.jpg         ← width only
//! └── lonely-cat-h400.jpg         ← height only
//! ```
//!
//! # The Filename Is the State
//!
//! There is no manifest and no cache. The size suffix makes every variant
//! self-describing, so a re-run rediscovers previous work by scanning the
//! directory: files with a suffix are variants, everything else is an
//! original. A variant whose file already exists is skipped, which makes
//! repeated runs idempotent. `remove` deletes every recognised variant;
//! `recreate` deletes them and generates them again.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `images.toml` loading, collection resolution and validation |
//! | [`types`] | `fit` and `position` values shared by config and imaging |
//! | [`naming`] | Size suffix encoder and the pattern that recognises it |
//! | [`scan`] | Directory discovery and original/resized/ignored classification |
//! | [`process`] | Per-collection state machine, resize-or-skip executor, run stats |
//! | [`imaging`] | Pure-Rust resize behind the [`imaging::ImageBackend`] trait |
//! | [`output`] | Console report: banners, progress lines, final summary |
//!
//! # Error Containment
//!
//! A broken collection (missing directory, incomplete sizes) is reported and
//! skipped; a failed resize is reported and counted. Neither stops the run.
//! See [`process`] for the full policy.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
