use nalgebra::distance;
use serde::{Deserialize, Serialize};

use crate::mark::ShotMark;

/// One pair of marks and the distance between their centers.
///
/// `a` and `b` are indices into the mark sequence the analysis was run
/// over, with `a < b`. `distance_cm` is present only when the detection
/// source established a physical scale; it is never fabricated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairSpan {
    pub a: usize,
    pub b: usize,
    pub distance_px: f64,
    pub distance_cm: Option<f64>,
}

/// Widest and tightest pair over the current mark set.
///
/// The widest pair is the "group size" surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupAnalysis {
    pub widest: PairSpan,
    pub tightest: PairSpan,
}

/// Compute the widest-pair and tightest-pair spans over `marks`.
///
/// Returns `None` for fewer than two marks; callers hide the group-size
/// readout rather than show a zero. The scan is brute-force over all
/// `(i, j), i < j` pairs: mark counts are bounded by realistic shot
/// counts, and strict comparisons keep the first-encountered pair on
/// exact ties.
pub fn analyze(marks: &[ShotMark], cm_per_pixel: Option<f64>) -> Option<GroupAnalysis> {
    if marks.len() < 2 {
        return None;
    }

    let mut widest = (0usize, 1usize, distance(&marks[0].center, &marks[1].center));
    let mut tightest = widest;

    for i in 0..marks.len() {
        for j in (i + 1)..marks.len() {
            if i == 0 && j == 1 {
                continue;
            }
            let d = distance(&marks[i].center, &marks[j].center);
            if d > widest.2 {
                widest = (i, j, d);
            }
            if d < tightest.2 {
                tightest = (i, j, d);
            }
        }
    }

    let span = |(a, b, px): (usize, usize, f64)| PairSpan {
        a,
        b,
        distance_px: px,
        distance_cm: cm_per_pixel.map(|cm| px * cm),
    };

    Some(GroupAnalysis {
        widest: span(widest),
        tightest: span(tightest),
    })
}

/// Quality label over the group size in centimeters.
///
/// Only derivable when a physical scale is known; with pixel-only
/// results no label is shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupQuality {
    Excellent,
    Good,
    Fair,
    WideSpread,
}

impl GroupQuality {
    pub fn from_cm(group_size_cm: f64) -> GroupQuality {
        if group_size_cm <= 5.0 {
            GroupQuality::Excellent
        } else if group_size_cm <= 10.0 {
            GroupQuality::Good
        } else if group_size_cm <= 20.0 {
            GroupQuality::Fair
        } else {
            GroupQuality::WideSpread
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupQuality::Excellent => "Excellent",
            GroupQuality::Good => "Good",
            GroupQuality::Fair => "Fair",
            GroupQuality::WideSpread => "Wide spread",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::{BBox, ShotId};
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn marks_at(centers: &[(f64, f64)]) -> Vec<ShotMark> {
        centers
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| ShotMark {
                id: ShotId::Detected(i),
                center: Point2::new(x, y),
                bbox: BBox::square(Point2::new(x, y), 10.0),
                confidence: 0.8,
                manual: false,
            })
            .collect()
    }

    #[test]
    fn fewer_than_two_marks_yield_no_analysis() {
        assert!(analyze(&[], None).is_none());
        assert!(analyze(&marks_at(&[(3.0, 4.0)]), Some(0.1)).is_none());
    }

    #[test]
    fn widest_and_tightest_pairs_over_three_points() {
        let marks = marks_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 30.0)]);
        let result = analyze(&marks, None).unwrap();

        assert_relative_eq!(result.widest.distance_px, 30.0);
        assert_eq!((result.widest.a, result.widest.b), (0, 2));
        assert_relative_eq!(result.tightest.distance_px, 10.0);
        assert_eq!((result.tightest.a, result.tightest.b), (0, 1));
    }

    #[test]
    fn cm_fields_are_gated_on_the_scale_factor() {
        let marks = marks_at(&[(0.0, 0.0), (10.0, 0.0)]);

        let without = analyze(&marks, None).unwrap();
        assert_eq!(without.widest.distance_cm, None);
        assert_eq!(without.tightest.distance_cm, None);

        let with = analyze(&marks, Some(0.05)).unwrap();
        assert_relative_eq!(with.widest.distance_cm.unwrap(), 0.5);
    }

    #[test]
    fn exact_ties_keep_the_first_pair_in_scan_order() {
        // A unit square: all four sides tie at 1.0, both diagonals at sqrt(2).
        let marks = marks_at(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let result = analyze(&marks, None).unwrap();
        assert_eq!((result.tightest.a, result.tightest.b), (0, 1));
        assert_eq!((result.widest.a, result.widest.b), (0, 3));
    }

    #[test]
    fn removing_a_widest_endpoint_cannot_widen_the_group() {
        let mut marks = marks_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 30.0), (5.0, 5.0)]);
        let before = analyze(&marks, None).unwrap();
        assert_relative_eq!(before.widest.distance_px, 30.0);

        marks.remove(before.widest.b);
        let after = analyze(&marks, None).unwrap();
        assert!(after.widest.distance_px <= before.widest.distance_px);
    }

    #[test]
    fn removing_an_unrelated_mark_keeps_the_widest_distance() {
        let mut marks = marks_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 30.0), (5.0, 5.0)]);
        let before = analyze(&marks, None).unwrap();

        marks.remove(3);
        let after = analyze(&marks, None).unwrap();
        assert_relative_eq!(after.widest.distance_px, before.widest.distance_px);
    }

    #[test]
    fn quality_thresholds() {
        assert_eq!(GroupQuality::from_cm(3.0), GroupQuality::Excellent);
        assert_eq!(GroupQuality::from_cm(5.0), GroupQuality::Excellent);
        assert_eq!(GroupQuality::from_cm(7.5), GroupQuality::Good);
        assert_eq!(GroupQuality::from_cm(10.0), GroupQuality::Good);
        assert_eq!(GroupQuality::from_cm(20.0), GroupQuality::Fair);
        assert_eq!(GroupQuality::from_cm(20.1), GroupQuality::WideSpread);
    }
}
