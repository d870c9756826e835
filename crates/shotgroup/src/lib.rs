//! High-level facade for the `shotgroup` workspace.
//!
//! This crate wires the pure geometry core into the target-editing
//! workflow: parse a detection-service response, run an interactive
//! [`EditSession`] over it, and hand the corrected result to a
//! [`ResultSink`].
//!
//! ## Quickstart
//!
//! ```
//! use nalgebra::Point2;
//! use shotgroup::{DetectionResponse, EditSession};
//! use shotgroup_core::EditMode;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let response = DetectionResponse::parse(
//!     r#"{
//!         "detections": [
//!             {"bbox": [90.0, 90.0, 110.0, 110.0], "center": [100.0, 100.0], "confidence": 0.92}
//!         ],
//!         "metadata": {"processed_width": 2000, "processed_height": 1000},
//!         "scale_info": {"cm_per_pixel": 0.05}
//!     }"#,
//! )?;
//!
//! let mut session = EditSession::from_response(&response, 1000.0);
//! session.set_mode(EditMode::Add);
//! session.tap(Point2::new(300.0, 300.0));
//!
//! let result = session.result();
//! println!("{} holes", result.summary.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`shotgroup_core`] (re-exported as [`core`]): transforms, the shot
//!   set, hit testing, tiers and group geometry.
//! - [`response`]: detection-service wire types and metadata
//!   normalization.
//! - [`session`]: the single-owner editing session.
//! - [`result`]: the persistence payload.
//! - [`io`]: `DetectionSource` / `ResultSink` seams plus file-backed
//!   JSON implementations.

pub use shotgroup_core as core;

pub mod io;
pub mod response;
pub mod result;
pub mod session;

pub use io::{DetectionSource, JsonFileSink, JsonFileSource, ResultSink, SinkError, SourceError};
pub use response::{Detection, DetectionParseError, DetectionResponse, ImageSize, ScaleInfo};
pub use result::{ResultPoint, ShotSummary, TrainingResult};
pub use session::EditSession;
