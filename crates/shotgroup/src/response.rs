//! Wire types for the detection service response.
//!
//! The transport is a black box; only the shape matters here. Two
//! historical metadata shapes exist upstream (`width`/`height` and
//! `processed_width`/`processed_height`); both are accepted and
//! normalized into [`ImageSize`] at this boundary.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use shotgroup_core::{BBox, SeedShot};

/// Errors produced while decoding a detection response.
#[derive(thiserror::Error, Debug)]
pub enum DetectionParseError {
    #[error("invalid detection response: {0}")]
    Json(#[from] serde_json::Error),
}

/// One candidate bullet hole from the detection service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// `[x1, y1, x2, y2]` in analyzed-image pixels.
    pub bbox: [f64; 4],
    /// `[x, y]` in analyzed-image pixels.
    pub center: [f64; 2],
    #[serde(default)]
    pub confidence: f64,
}

impl Detection {
    /// Adapt to the seed shape the core store consumes.
    pub fn to_seed(&self) -> SeedShot {
        SeedShot {
            center: Point2::new(self.center[0], self.center[1]),
            bbox: BBox::from_array(self.bbox),
            confidence: self.confidence,
        }
    }
}

/// Normalized pixel dimensions of the analyzed image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// The two metadata shapes seen in the wild. Untagged: the `processed_*`
/// variant is tried first so it wins when a response carries both.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum RawMetadata {
    Processed {
        processed_width: u32,
        processed_height: u32,
    },
    Plain {
        width: u32,
        height: u32,
    },
}

impl RawMetadata {
    fn normalize(self) -> ImageSize {
        match self {
            RawMetadata::Processed {
                processed_width,
                processed_height,
            } => ImageSize {
                width: processed_width,
                height: processed_height,
            },
            RawMetadata::Plain { width, height } => ImageSize { width, height },
        }
    }
}

/// Optional physical reference scale established by the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleInfo {
    #[serde(default)]
    pub cm_per_pixel: Option<f64>,
}

/// Full detection response.
#[derive(Clone, Debug, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    pub scale_info: Option<ScaleInfo>,
}

impl DetectionResponse {
    pub fn parse(json: &str) -> Result<DetectionResponse, DetectionParseError> {
        let response: DetectionResponse = serde_json::from_str(json)?;
        log::debug!(
            "parsed detection response: {} detections, size {:?}, cm/px {:?}",
            response.detections.len(),
            response.image_size(),
            response.cm_per_pixel()
        );
        Ok(response)
    }

    /// Normalized image dimensions, `None` when absent or degenerate.
    pub fn image_size(&self) -> Option<ImageSize> {
        let size = self.metadata?.normalize();
        if size.width == 0 || size.height == 0 {
            log::warn!("detection metadata has zero dimension, treating as absent");
            return None;
        }
        Some(size)
    }

    /// Physical scale factor, `None` when the service found no reference.
    pub fn cm_per_pixel(&self) -> Option<f64> {
        self.scale_info.and_then(|s| s.cm_per_pixel)
    }

    /// Seed shapes for [`shotgroup_core::ShotSet::seed`].
    pub fn seeds(&self) -> impl Iterator<Item = SeedShot> + '_ {
        self.detections.iter().map(Detection::to_seed)
    }
}
