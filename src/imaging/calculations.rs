//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::types::{Fit, Position};

/// How the scaled image is turned into the final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The scaled image is the output.
    Exact,
    /// Cut an output-sized window out of the scaled image at `(x, y)`.
    Crop { x: u32, y: u32 },
    /// Paste the scaled image onto an output-sized canvas at `(x, y)`.
    Pad { x: u32, y: u32 },
}

/// Geometry of one resize: scale first, then place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Dimensions the source is resampled to.
    pub scale_to: (u32, u32),
    /// Final output dimensions.
    pub output: (u32, u32),
    pub placement: Placement,
}

/// Fill in a missing dimension from the source aspect ratio.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `width`, `height` - Requested dimensions; at least one should be set
///
/// With neither set, the source dimensions are returned unchanged.
pub fn resolve_dimensions(
    source: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
) -> (u32, u32) {
    let (src_w, src_h) = source;
    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => {
            let h = (src_h as f64 * w as f64 / src_w as f64).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h)) => {
            let w = (src_w as f64 * h as f64 / src_h as f64).round() as u32;
            (w.max(1), h)
        }
        (None, None) => source,
    }
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Calculate the largest dimensions that fit inside a target area.
///
/// The inverse of [`calculate_fill_dimensions`]: one dimension matches,
/// the other is at most the target.
pub fn calculate_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: width matches
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.clamp(1, tgt_h))
    } else {
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.clamp(1, tgt_w), h)
    }
}

/// Plan the geometry for resizing `source` to the requested size.
///
/// | Fit | Scale | Output |
/// |-----|-------|--------|
/// | `fill` | exactly W×H | W×H |
/// | `cover` | fill W×H | W×H, cropped at `position` |
/// | `contain` | fit in W×H | W×H, padded at `position` |
/// | `inside` | fit in W×H | the scaled size |
/// | `outside` | fill W×H | the scaled size |
///
/// With a single dimension the fit does not apply.
pub fn plan_resize(
    source: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
    fit: Fit,
    position: Position,
) -> ResizePlan {
    let target = resolve_dimensions(source, width, height);

    if width.is_none() || height.is_none() {
        return ResizePlan {
            scale_to: target,
            output: target,
            placement: Placement::Exact,
        };
    }

    let (align_x, align_y) = position.alignment();
    match fit {
        Fit::Fill => ResizePlan {
            scale_to: target,
            output: target,
            placement: Placement::Exact,
        },
        Fit::Cover => {
            let scaled = calculate_fill_dimensions(source, target);
            ResizePlan {
                scale_to: scaled,
                output: target,
                placement: Placement::Crop {
                    x: align_x.offset(scaled.0, target.0),
                    y: align_y.offset(scaled.1, target.1),
                },
            }
        }
        Fit::Contain => {
            let scaled = calculate_fit_dimensions(source, target);
            ResizePlan {
                scale_to: scaled,
                output: target,
                placement: Placement::Pad {
                    x: align_x.offset(target.0, scaled.0),
                    y: align_y.offset(target.1, scaled.1),
                },
            }
        }
        Fit::Inside => {
            let scaled = calculate_fit_dimensions(source, target);
            ResizePlan {
                scale_to: scaled,
                output: scaled,
                placement: Placement::Exact,
            }
        }
        Fit::Outside => {
            let scaled = calculate_fill_dimensions(source, target);
            ResizePlan {
                scale_to: scaled,
                output: scaled,
                placement: Placement::Exact,
            }
        }
    }
}
