//! Configuration module.
//!
//! Handles loading and validating the `images.toml` file that lists the
//! collections to resize. Loading is strict about the *shape* of the file
//! (unknown keys and malformed values are rejected up front) but lenient about
//! the *content* of each collection: a collection with no sizes or a size
//! without dimensions still loads, and is rejected later by
//! [`validate_collection`] so that one broken collection never prevents the
//! others from running.
//!
//! ## Configuration Options
//!
//! ```toml
//! [settings]
//! use_trash = false          # Move removed files to the trash instead of deleting
//!
//! [[collections]]
//! name = "Slider images"     # Label shown in the report
//! source = "./src/slides"    # Directory to scan (relative to the working directory)
//! recursive = false          # Include subdirectories
//!
//! [[collections.sizes]]
//! name = "Desktop"           # Label used in error messages
//! width = 1110               # Optional, at least one of width/height
//! height = 547
//! fit = "cover"              # cover | contain | fill | inside | outside
//! position = "center"        # left | right | top | bottom | center | left-top | ...
//! ```
//!
//! ## Resolution
//!
//! Collections are never modified after loading. [`Collection::resolve`]
//! derives a [`ResolvedCollection`] carrying the absolute source directory,
//! which is what the rest of the pipeline works with.

use crate::types::{Fit, Position};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "images.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No collections configured!")]
    NoCollections,
    #[error("The directory {} does not exist or is not readable!", .0.display())]
    MissingSource(PathBuf),
    #[error("No sizes configured!")]
    NoSizes,
    #[error("Missing name property for sizes[{0}]!")]
    MissingName(usize),
    #[error("No width or height set for size \"{0}\"!")]
    MissingDimensions(String),
}

/// Top-level configuration loaded from `images.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global switches.
    pub settings: Settings,
    /// Collections processed in order.
    pub collections: Vec<Collection>,
}

/// Global settings shared by all collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Move files to the trash instead of unlinking them in `remove`/`recreate` mode.
    pub use_trash: bool,
}

/// A named source directory plus the sizes to generate for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Collection {
    pub name: String,
    /// Source directory as written in the config, relative or absolute.
    pub source: String,
    pub recursive: bool,
    pub sizes: Vec<SizeSpec>,
}

/// One target output size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeSpec {
    /// Identifies the size in error messages.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub fit: Fit,
    pub position: Position,
}

impl SizeSpec {
    /// Configured width; zero counts as unset.
    pub fn width(&self) -> Option<u32> {
        self.width.filter(|&w| w > 0)
    }

    /// Configured height; zero counts as unset.
    pub fn height(&self) -> Option<u32> {
        self.height.filter(|&h| h > 0)
    }
}

/// A collection with its source resolved to an absolute directory.
#[derive(Debug, Clone)]
pub struct ResolvedCollection {
    pub name: String,
    /// The `source` string exactly as configured, for error messages.
    pub source: String,
    /// Absolute source directory.
    pub source_path: PathBuf,
    pub recursive: bool,
    pub sizes: Vec<SizeSpec>,
}

impl Collection {
    /// Resolve `source` against `base_dir` (normally the working directory).
    pub fn resolve(&self, base_dir: &Path) -> ResolvedCollection {
        ResolvedCollection {
            name: self.name.clone(),
            source: self.source.clone(),
            source_path: resolve_source(&self.source, base_dir),
            recursive: self.recursive,
            sizes: self.sizes.clone(),
        }
    }
}

/// Join a relative source onto `base_dir` and drop `.` components.
///
/// `..` is left in place; the filesystem resolves it when the directory is read.
fn resolve_source(source: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(source);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

impl Config {
    /// Validate the file-level invariants. Per-collection problems are left to
    /// [`validate_collection`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collections.is_empty() {
            return Err(ConfigError::NoCollections);
        }
        Ok(())
    }
}

/// Check that a collection can be processed. Fails on the first problem found.
///
/// Order: source directory, then the size list, then each size in turn
/// (name before dimensions).
pub fn validate_collection(collection: &ResolvedCollection) -> Result<(), ConfigError> {
    if collection.source.trim().is_empty() || !collection.source_path.is_dir() {
        return Err(ConfigError::MissingSource(collection.source_path.clone()));
    }

    if collection.sizes.is_empty() {
        return Err(ConfigError::NoSizes);
    }

    for (index, size) in collection.sizes.iter().enumerate() {
        if size.name.trim().is_empty() {
            return Err(ConfigError::MissingName(index));
        }
        if size.width().is_none() && size.height().is_none() {
            return Err(ConfigError::MissingDimensions(size.name.clone()));
        }
    }

    Ok(())
}

/// Parse config from a TOML string and validate file-level invariants.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `images.toml`.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Responsive Images Configuration
# ================================
# Each collection is a source directory plus the sizes to generate for every
# image found in it. Resized files are written next to their originals, named
# after the size they were generated for:
#
#   lonely-cat-1110x457.jpg   width and height
#   lonely-cat-w800.jpg       width only
#   lonely-cat-h400.jpg       height only
#
# Unknown keys will cause an error.

[settings]
# Move files to the trash instead of deleting them directly, when using the
# "recreate" or "remove" argument.
use_trash = false

# ---------------------------------------------------------------------------
# Collections
# ---------------------------------------------------------------------------
[[collections]]
# A name to identify the collection in the report.
name = "Slider images"

# The directory in which to look for image files.
source = "./src/images/slides"

# Include files in subdirectories.
recursive = false

[[collections.sizes]]
# The name of the size, to identify it in case of errors.
name = "Desktop Resolution"

# Target width and/or height in pixels. At least one is required; with only
# one set, the other follows the aspect ratio of the original.
width = 1110
height = 547

# How the image fits both dimensions (default: cover).
#
#   cover:    Crop to cover both provided dimensions.
#   contain:  Embed within both provided dimensions.
#   fill:     Ignore the aspect ratio and stretch to both dimensions.
#   inside:   Preserve the aspect ratio, as large as possible while both
#             dimensions are less than or equal to those specified.
#   outside:  Preserve the aspect ratio, as small as possible while both
#             dimensions are greater than or equal to those specified.
fit = "cover"

# Anchor for cover crops and contain padding (default: center).
# left, right, top, bottom, center, left-top, right-top, left-bottom, right-bottom
position = "center"

[[collections.sizes]]
name = "Tablet Resolution"
width = 690
height = 280

[[collections.sizes]]
name = "Smartphone Resolution"
width = 510
"##
}
