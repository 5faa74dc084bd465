//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the resize pipeline
//! and actual pixel work. It takes a [`ResizeParams`] and hands back the
//! encoded bytes of the result; persisting them is the caller's job, so a
//! failed write and a failed encode are reported the same way.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) on top of the `image`
//! crate.

use super::params::ResizeParams;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Resize `params.source` and return the encoded output bytes.
    fn resize(&self, params: &ResizeParams) -> Result<Vec<u8>, BackendError>;
}
