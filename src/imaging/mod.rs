//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, GIF, BMP, WebP) |
//! | **Resize** | Lanczos3 resampling, then crop (`cover`) or pad (`contain`) |
//! | **Encode** | `image` encoders, format from the output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a resize
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Size spec → parameters → backend → file on disk

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use operations::{plan_variant, target_path, write_variant};
pub use params::ResizeParams;
pub use rust_backend::RustBackend;
