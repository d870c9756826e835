use serde::{Deserialize, Serialize};

use crate::mark::ShotMark;

/// Rendering tier for a mark: manual marks get the primary accent, the
/// rest are binned by detector confidence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotTier {
    Manual,
    High,
    Medium,
    Low,
}

impl ShotTier {
    /// Classify a mark. Pure; never affects geometry.
    pub fn classify(mark: &ShotMark) -> ShotTier {
        if mark.manual {
            ShotTier::Manual
        } else if mark.confidence < 0.4 {
            ShotTier::Low
        } else if mark.confidence < 0.6 {
            ShotTier::Medium
        } else {
            ShotTier::High
        }
    }
}

/// Per-tier mark counts for the result summary.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TierCounts {
    pub manual: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn tally<'a, I>(marks: I) -> TierCounts
    where
        I: IntoIterator<Item = &'a ShotMark>,
    {
        let mut counts = TierCounts::default();
        for mark in marks {
            match ShotTier::classify(mark) {
                ShotTier::Manual => counts.manual += 1,
                ShotTier::High => counts.high += 1,
                ShotTier::Medium => counts.medium += 1,
                ShotTier::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.manual + self.high + self.medium + self.low
    }
}
