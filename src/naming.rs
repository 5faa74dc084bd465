//! Filename convention for resized images.
//!
//! A resized file lives next to its original and carries the size it was
//! generated for as a suffix before the extension:
//!
//! - `lonely-cat.jpg` + 1110×457 → `lonely-cat-1110x457.jpg`
//! - `lonely-cat.jpg` + width 800 → `lonely-cat-w800.jpg`
//! - `lonely-cat.jpg` + height 400 → `lonely-cat-h400.jpg`
//!
//! There is no manifest of generated files. The next run finds them again by
//! matching [`is_derived_filename`], so [`derived_filename`] and the pattern
//! must stay in lockstep: everything the encoder produces is recognised. An
//! original whose name already ends in such a suffix is treated as resized.

use crate::config::SizeSpec;
use regex::Regex;
use std::ffi::OsString;
use std::path::Path;
use std::sync::LazyLock;

static DERIVED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-([0-9]+x[0-9]+|w[0-9]+|h[0-9]+)\.[a-z]+$")
        .expect("derived filename pattern must compile")
});

/// Dimensions encoded in a derived filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSuffix {
    Both { width: u32, height: u32 },
    Width(u32),
    Height(u32),
}

impl SizeSuffix {
    /// Suffix for a size spec, or `None` when it has no usable dimension.
    pub fn for_size(size: &SizeSpec) -> Option<Self> {
        match (size.width(), size.height()) {
            (Some(width), Some(height)) => Some(SizeSuffix::Both { width, height }),
            (Some(width), None) => Some(SizeSuffix::Width(width)),
            (None, Some(height)) => Some(SizeSuffix::Height(height)),
            (None, None) => None,
        }
    }

    fn render(self) -> String {
        match self {
            SizeSuffix::Both { width, height } => format!("-{width}x{height}"),
            SizeSuffix::Width(width) => format!("-w{width}"),
            SizeSuffix::Height(height) => format!("-h{height}"),
        }
    }
}

/// Derived filename for `original` at `size`.
///
/// The suffix goes between the stem and the last extension, which keeps its
/// original case. The stem is kept byte for byte, so names that are not valid
/// UTF-8 survive unchanged. A size with no dimensions yields the original
/// name unchanged; the validator keeps such sizes away from the executor.
///
/// - `"dog.png"` + width 800 → `"dog-w800.png"`
/// - `"IMG_01.JPG"` + 200×200 → `"IMG_01-200x200.JPG"`
/// - `"archive.tar.gz"` + height 50 → `"archive.tar-h50.gz"`
pub fn derived_filename(original: &Path, size: &SizeSpec) -> OsString {
    let Some(stem) = original.file_stem() else {
        return OsString::new();
    };
    let Some(suffix) = SizeSuffix::for_size(size) else {
        return original.file_name().unwrap_or(stem).to_os_string();
    };

    let mut name = stem.to_os_string();
    name.push(suffix.render());
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Whether a file name carries a derived size suffix. Case-insensitive.
pub fn is_derived_filename(path: &Path) -> bool {
    path.file_name()
        .map(|f| DERIVED_SUFFIX.is_match(&f.to_string_lossy()))
        .unwrap_or(false)
}
