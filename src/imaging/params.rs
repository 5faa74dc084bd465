//! Parameter types for image operations.
//!
//! [`ResizeParams`] describes *what* to produce, not *how*. It is the
//! interface between [`operations`](super::operations), which decides what
//! variant a size spec calls for, and the [`backend`](super::backend), which
//! does the pixel work. Keeping it plain data lets tests swap in a mock
//! backend and assert on exactly what would have been resized.

use crate::types::{Fit, Position};
use std::path::PathBuf;

/// Full specification for one resize.
///
/// At least one of `width`/`height` is set; the other follows the source
/// aspect ratio. `fit` and `position` only matter when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeParams {
    pub source: PathBuf,
    /// Where the result will be written. Its extension selects the encoder;
    /// the backend itself never writes this path.
    pub output: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Fit,
    pub position: Position,
}
