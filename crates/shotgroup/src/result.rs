//! Persistence payload handed to the result sink.
//!
//! Field names here are the sink's wire contract (snake_case,
//! `is_manual`); everything is reduced to plain arrays so the payload is
//! independent of the core's internal types.

use serde::{Deserialize, Serialize};

use shotgroup_core::{GroupQuality, ShotMark, TierCounts};

/// One corrected hole, reduced to the sink's shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPoint {
    pub center: [f64; 2],
    pub bbox: [f64; 4],
    pub confidence: f64,
    pub is_manual: bool,
}

impl From<&ShotMark> for ResultPoint {
    fn from(mark: &ShotMark) -> ResultPoint {
        ResultPoint {
            center: [mark.center.x, mark.center.y],
            bbox: mark.bbox.to_array(),
            confidence: mark.confidence,
            is_manual: mark.manual,
        }
    }
}

/// Derived summary stored alongside the point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotSummary {
    pub total: usize,
    pub tiers: TierCounts,
    /// Canonical "group size": widest-pair distance in centimeters, when
    /// a physical scale was available.
    pub group_size_cm: Option<f64>,
    pub quality: Option<GroupQuality>,
}

/// Final, user-corrected training result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub points: Vec<ResultPoint>,
    pub summary: ShotSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_snake_case() {
        let result = TrainingResult {
            points: vec![ResultPoint {
                center: [1.0, 2.0],
                bbox: [0.0, 0.0, 2.0, 4.0],
                confidence: 1.0,
                is_manual: true,
            }],
            summary: ShotSummary {
                total: 1,
                tiers: TierCounts {
                    manual: 1,
                    ..TierCounts::default()
                },
                group_size_cm: None,
                quality: None,
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["points"][0]["is_manual"], true);
        assert_eq!(json["summary"]["group_size_cm"], serde_json::Value::Null);
        assert_eq!(json["summary"]["tiers"]["manual"], 1);
    }
}
