use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Uniform-scale mapping from original-image pixels to a square canvas.
///
/// The image is letterboxed: scaled to fill the canvas along its longer
/// axis and centered along the other, so `scale_x == scale_y` for every
/// transform produced by [`ViewTransform::fit`]. Display coordinates are
/// always derived through this mapping; image-space centers remain the
/// single source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    /// Passthrough transform, used before image metadata is available.
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Fit an `image_w` × `image_h` image into a square canvas of side
    /// `canvas_side`.
    ///
    /// Non-positive (or non-finite) dimensions yield [`Self::IDENTITY`]
    /// so callers can render a pre-metadata frame without special-casing.
    pub fn fit(image_w: f64, image_h: f64, canvas_side: f64) -> ViewTransform {
        if !(image_w > 0.0) || !(image_h > 0.0) || !(canvas_side > 0.0) {
            return Self::IDENTITY;
        }

        let aspect = image_w / image_h;
        if aspect > 1.0 {
            // Wider than tall: fill canvas width, letterbox vertically.
            let scale = canvas_side / image_w;
            let shown_h = image_h * scale;
            ViewTransform {
                scale_x: scale,
                scale_y: scale,
                offset_x: 0.0,
                offset_y: (canvas_side - shown_h) / 2.0,
            }
        } else {
            // Taller than (or as tall as) wide: fill canvas height.
            let scale = canvas_side / image_h;
            let shown_w = image_w * scale;
            ViewTransform {
                scale_x: scale,
                scale_y: scale,
                offset_x: (canvas_side - shown_w) / 2.0,
                offset_y: 0.0,
            }
        }
    }

    /// Map an image-space point onto the canvas.
    #[inline]
    pub fn to_canvas(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(p.x * self.scale_x + self.offset_x, p.y * self.scale_y + self.offset_y)
    }

    /// Map a canvas point back into image space. Inverse of [`Self::to_canvas`].
    #[inline]
    pub fn to_image(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (p.x - self.offset_x) / self.scale_x,
            (p.y - self.offset_y) / self.scale_y,
        )
    }
}
