//! Shared test utilities for the responsive-images test suite.
//!
//! Provides filesystem fixtures and config builders so tests can describe a
//! source directory and a collection in a line or two.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! touch(&tmp.path().join("album/cat.jpg"));
//!
//! let album = collection("Album", "album", vec![size("sq", Some(200), Some(200))]);
//! assert_eq!(file_names(&list_dir(&tmp.path().join("album"))), vec!["cat.jpg"]);
//! ```

use crate::config::{Collection, SizeSpec};
use std::path::{Path, PathBuf};

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Create an empty file, including any missing parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

/// Entries of a single directory, sorted by name.
pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    entries
}

/// File names of `paths`, in the same order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

// =========================================================================
// Config builders
// =========================================================================

/// A size with the given dimensions and default fit/position.
pub fn size(name: &str, width: Option<u32>, height: Option<u32>) -> SizeSpec {
    SizeSpec {
        name: name.to_string(),
        width,
        height,
        ..SizeSpec::default()
    }
}

/// A non-recursive collection.
pub fn collection(name: &str, source: &str, sizes: Vec<SizeSpec>) -> Collection {
    Collection {
        name: name.to_string(),
        source: source.to_string(),
        recursive: false,
        sizes,
    }
}
