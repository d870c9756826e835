//! Core types and geometry for shot-group annotation and analysis.
//!
//! This crate is intentionally small and purely in-memory. It does *not*
//! depend on any concrete detection service, image type or UI toolkit:
//! detections arrive as plain points with bounding boxes and confidences,
//! and everything here is synchronous and allocation-light.
//!
//! The pieces fit together as follows: [`ViewTransform`] maps between the
//! captured image's pixel space and a fixed square canvas, [`ShotSet`]
//! holds the editable marks, [`resolve_tap`] turns canvas taps into
//! add/remove actions, and [`analyze`] recomputes the widest and tightest
//! pair spans after every edit.

mod analysis;
mod hit;
mod logger;
mod mark;
mod store;
mod tier;
mod transform;

pub use analysis::{analyze, GroupAnalysis, GroupQuality, PairSpan};
pub use hit::{resolve_marker_tap, resolve_tap, EditMode, TapAction, HIT_RADIUS_CANVAS};
pub use mark::{BBox, SeedShot, ShotId, ShotMark, MANUAL_BBOX_SIDE};
pub use store::{ShotSet, StoreError};
pub use tier::{ShotTier, TierCounts};
pub use transform::ViewTransform;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
