use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

use crate::store::ShotSet;
use crate::transform::ViewTransform;

/// Tap tolerance for removal, in canvas pixels. Converted to image space
/// per tap so the on-screen touch target stays the same size regardless
/// of how far the image was scaled down.
pub const HIT_RADIUS_CANVAS: f64 = 30.0;

/// The two editing modes. Toggled explicitly by the user; no geometry
/// operation ever changes the mode as a side effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Add,
    Remove,
}

/// Resolved outcome of a tap. The caller applies it to the [`ShotSet`];
/// resolution itself never mutates anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapAction {
    /// Place a manual mark at this image-space point.
    Add(Point2<f64>),
    /// Remove the mark at this index.
    Remove(usize),
    /// Nothing to do (no mark in range, or a malformed tap).
    Ignore,
}

/// Resolve a tap on empty canvas.
///
/// The canvas point is inverse-mapped into image space. In [`EditMode::Add`]
/// that point is always accepted, since overlapping manual marks are allowed.
/// In [`EditMode::Remove`] the marks are scanned in insertion order and
/// the *first* one strictly closer than the tolerance radius wins; this
/// is deliberately first-match, not nearest-match.
pub fn resolve_tap(
    canvas_pt: Point2<f64>,
    mode: EditMode,
    transform: &ViewTransform,
    shots: &ShotSet,
) -> TapAction {
    if !canvas_pt.x.is_finite() || !canvas_pt.y.is_finite() {
        log::warn!("ignoring malformed tap at ({}, {})", canvas_pt.x, canvas_pt.y);
        return TapAction::Ignore;
    }

    let image_pt = transform.to_image(canvas_pt);
    match mode {
        EditMode::Add => TapAction::Add(image_pt),
        EditMode::Remove => {
            let radius = HIT_RADIUS_CANVAS / transform.scale_x;
            shots
                .iter()
                .position(|mark| distance(&image_pt, &mark.center) < radius)
                .map_or(TapAction::Ignore, TapAction::Remove)
        }
    }
}

/// Resolve a tap landing directly on a rendered marker.
///
/// Markers carry their own enlarged hit box in remove mode, so a direct
/// hit skips the distance scan entirely and removal stays reliable even
/// for tightly packed groups. In add mode the marker is transparent to
/// taps and this is [`TapAction::Ignore`].
pub fn resolve_marker_tap(index: usize, mode: EditMode, shots: &ShotSet) -> TapAction {
    match mode {
        EditMode::Remove if index < shots.len() => TapAction::Remove(index),
        _ => TapAction::Ignore,
    }
}
