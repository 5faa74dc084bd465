//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, WebP) | `image::ImageReader::with_guessed_format` |
//! | Resample | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Crop (`cover`) | `DynamicImage::crop_imm` |
//! | Pad (`contain`) | `image::imageops::overlay` onto an opaque black canvas |
//! | Encode | `DynamicImage::write_to`, format from the output extension |
//!
//! SVG passes classification but has no raster decoder here; it fails with
//! [`BackendError::UnsupportedFormat`].

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Placement, plan_resize};
use super::params::ResizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoder for a path's extension, if this build can write it.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| BackendError::UnsupportedFormat(path.to_path_buf()))
}

/// Load and decode an image from disk.
///
/// The decoder is picked from the file's leading bytes; the extension is
/// only the fallback when the content is not recognised.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    if !reader.format().is_some_and(|format| format.reading_enabled()) {
        return Err(BackendError::UnsupportedFormat(path.to_path_buf()));
    }
    reader.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Encode to the format selected by `path`'s extension.
fn encode_image(img: DynamicImage, path: &Path) -> Result<Vec<u8>, BackendError> {
    let format = output_format(path)?;

    // Encoders without alpha support get RGB; the rest get RGBA so that
    // 16-bit and grey sources encode everywhere.
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Png => img,
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    };

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    Ok(buffer.into_inner())
}

/// Apply a planned resize to a decoded image.
fn apply_plan(img: &DynamicImage, params: &ResizeParams) -> DynamicImage {
    let plan = plan_resize(
        (img.width(), img.height()),
        params.width,
        params.height,
        params.fit,
        params.position,
    );
    let (scale_w, scale_h) = plan.scale_to;
    let (out_w, out_h) = plan.output;
    let scaled = img.resize_exact(scale_w, scale_h, FilterType::Lanczos3);

    match plan.placement {
        Placement::Exact => scaled,
        Placement::Crop { x, y } => scaled.crop_imm(x, y, out_w, out_h),
        Placement::Pad { x, y } => {
            let mut canvas = RgbaImage::from_pixel(out_w, out_h, Rgba([0, 0, 0, 255]));
            image::imageops::overlay(&mut canvas, &scaled.to_rgba8(), x as i64, y as i64);
            DynamicImage::ImageRgba8(canvas)
        }
    }
}

impl ImageBackend for RustBackend {
    fn resize(&self, params: &ResizeParams) -> Result<Vec<u8>, BackendError> {
        let img = load_image(&params.source)?;
        tracing::debug!(
            source = %params.source.display(),
            width = img.width(),
            height = img.height(),
            fit = %params.fit,
            "decoded source"
        );
        let resized = apply_plan(&img, params);
        encode_image(resized, &params.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fit, Position};
    use image::{ImageEncoder, RgbImage};
    use std::path::PathBuf;

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn params(
        source: PathBuf,
        output: &str,
        width: Option<u32>,
        height: Option<u32>,
        fit: Fit,
    ) -> ResizeParams {
        let output = source.with_file_name(output);
        ResizeParams {
            source,
            output,
            width,
            height,
            fit,
            position: Position::Center,
        }
    }

    fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn resize_cover_produces_exact_box() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        create_test_jpeg(&source, 400, 300);

        let bytes = RustBackend::new()
            .resize(&params(source, "cat-200x200.jpg", Some(200), Some(200), Fit::Cover))
            .unwrap();
        assert_eq!(decoded_dimensions(&bytes), (200, 200));
    }

    #[test]
    fn resize_width_only_keeps_aspect() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        create_test_jpeg(&source, 400, 300);

        let bytes = RustBackend::new()
            .resize(&params(source, "cat-w200.jpg", Some(200), None, Fit::Cover))
            .unwrap();
        assert_eq!(decoded_dimensions(&bytes), (200, 150));
    }

    #[test]
    fn resize_inside_fits_within_box() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        create_test_jpeg(&source, 400, 200);

        let bytes = RustBackend::new()
            .resize(&params(source, "cat-100x100.jpg", Some(100), Some(100), Fit::Inside))
            .unwrap();
        assert_eq!(decoded_dimensions(&bytes), (100, 50));
    }

    #[test]
    fn resize_contain_pads_to_box_as_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        create_test_jpeg(&source, 400, 200);

        // Output format follows the output extension
        let bytes = RustBackend::new()
            .resize(&params(source, "cat-100x100.png", Some(100), Some(100), Fit::Contain))
            .unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        assert_eq!(decoded_dimensions(&bytes), (100, 100));
    }

    #[test]
    fn resize_to_every_allowed_raster_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        create_test_jpeg(&source, 64, 48);

        for ext in ["jpg", "png", "gif", "bmp", "webp"] {
            let output = format!("cat-w32.{ext}");
            let bytes = RustBackend::new()
                .resize(&params(source.clone(), &output, Some(32), None, Fit::Cover))
                .unwrap_or_else(|e| panic!("{ext}: {e}"));
            assert_eq!(decoded_dimensions(&bytes), (32, 24), "{ext}");
        }
    }

    #[test]
    fn resize_png_content_behind_jpg_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("cat.jpg");
        RgbImage::from_pixel(40, 20, image::Rgb([200, 10, 10]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let bytes = RustBackend::new()
            .resize(&params(source, "cat-w20.jpg", Some(20), None, Fit::Cover))
            .unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(decoded_dimensions(&bytes), (20, 10));
    }

    #[test]
    fn resize_svg_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.svg");
        std::fs::write(&source, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();

        let result =
            RustBackend::new().resize(&params(source, "logo-w10.svg", Some(10), None, Fit::Cover));
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(_))));
    }

    #[test]
    fn resize_corrupt_source_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, "not a jpeg").unwrap();

        let result = RustBackend::new().resize(&params(
            source,
            "broken-w10.jpg",
            Some(10),
            None,
            Fit::Cover,
        ));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_missing_source_is_io_error() {
        let result = RustBackend::new().resize(&params(
            PathBuf::from("/nonexistent/cat.jpg"),
            "cat-w10.jpg",
            Some(10),
            None,
            Fit::Cover,
        ));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
