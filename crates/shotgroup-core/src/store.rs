use nalgebra::Point2;

use crate::mark::{BBox, SeedShot, ShotId, ShotMark, MANUAL_BBOX_SIDE};

/// Errors returned by [`ShotSet`] mutations.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("shot set already seeded with {count} marks; call reset() before re-seeding")]
    AlreadySeeded { count: usize },
}

/// Insertion-ordered, uniquely-identified set of shot marks.
///
/// The set is created empty, seeded once from a detection response, then
/// mutated only by explicit [`add`](Self::add) / [`remove_at`](Self::remove_at)
/// calls for the rest of the editing session. Marks are never overwritten:
/// overlapping manual marks are allowed, and only an explicit remove
/// deletes anything, manual or detected.
///
/// Every mutation bumps [`revision`](Self::revision); consumers key any
/// cached geometry on it so a stale result cannot outlive an edit.
#[derive(Clone, Debug, Default)]
pub struct ShotSet {
    marks: Vec<ShotMark>,
    next_manual: u64,
    seeded: bool,
    revision: u64,
}

impl ShotSet {
    pub fn new() -> ShotSet {
        ShotSet::default()
    }

    /// Seed the set from detection-source entries, tagging every mark as
    /// non-manual with its origin index as id.
    ///
    /// Valid only on a never-seeded (or freshly [`reset`](Self::reset))
    /// set; a retake must reset first.
    pub fn seed<I>(&mut self, detections: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = SeedShot>,
    {
        if self.seeded {
            return Err(StoreError::AlreadySeeded {
                count: self.marks.len(),
            });
        }

        self.marks = detections
            .into_iter()
            .enumerate()
            .map(|(index, seed)| ShotMark {
                id: ShotId::Detected(index),
                center: seed.center,
                bbox: seed.bbox,
                confidence: seed.confidence,
                manual: false,
            })
            .collect();
        self.seeded = true;
        self.revision += 1;
        log::debug!("seeded shot set with {} detections", self.marks.len());
        Ok(())
    }

    /// Append a manual mark centered on `center` (image space) with a
    /// synthesized 30×30 bbox and confidence `1.0`. Returns the new id.
    ///
    /// Append-only: manual marks always iterate after everything that was
    /// present when they were placed.
    pub fn add(&mut self, center: Point2<f64>) -> ShotId {
        let id = ShotId::Manual(self.next_manual);
        self.next_manual += 1;
        self.marks.push(ShotMark {
            id,
            center,
            bbox: BBox::square(center, MANUAL_BBOX_SIDE),
            confidence: 1.0,
            manual: true,
        });
        self.revision += 1;
        id
    }

    /// Remove the mark at `index`, returning it. Out-of-range indices are
    /// a `None` no-op; remaining marks keep their ids.
    pub fn remove_at(&mut self, index: usize) -> Option<ShotMark> {
        if index >= self.marks.len() {
            log::debug!("remove_at({index}) ignored: only {} marks", self.marks.len());
            return None;
        }
        self.revision += 1;
        Some(self.marks.remove(index))
    }

    /// Empty the set regardless of provenance and allow a later re-seed.
    pub fn reset(&mut self) {
        self.marks.clear();
        self.seeded = false;
        self.revision += 1;
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShotMark> {
        self.marks.get(index)
    }

    /// Marks in insertion order.
    pub fn marks(&self) -> &[ShotMark] {
        &self.marks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShotMark> {
        self.marks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_shot(x: f64, y: f64, confidence: f64) -> SeedShot {
        SeedShot {
            center: Point2::new(x, y),
            bbox: BBox::square(Point2::new(x, y), 12.0),
            confidence,
        }
    }

    #[test]
    fn seed_tags_entries_with_origin_index() {
        let mut set = ShotSet::new();
        set.seed([seed_shot(1.0, 1.0, 0.9), seed_shot(2.0, 2.0, 0.3)])
            .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().id, ShotId::Detected(0));
        assert_eq!(set.get(1).unwrap().id, ShotId::Detected(1));
        assert!(set.iter().all(|m| !m.manual));
    }

    #[test]
    fn second_seed_is_rejected_until_reset() {
        let mut set = ShotSet::new();
        set.seed([seed_shot(1.0, 1.0, 0.9)]).unwrap();
        assert!(matches!(
            set.seed([seed_shot(5.0, 5.0, 0.5)]),
            Err(StoreError::AlreadySeeded { count: 1 })
        ));

        set.reset();
        assert!(set.is_empty());
        set.seed([seed_shot(5.0, 5.0, 0.5)]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_appends_a_manual_mark_with_full_confidence() {
        let mut set = ShotSet::new();
        set.seed([seed_shot(1.0, 1.0, 0.9)]).unwrap();

        let before = set.len();
        let id = set.add(Point2::new(40.0, 50.0));
        assert_eq!(set.len(), before + 1);

        let mark = set.get(1).unwrap();
        assert_eq!(mark.id, id);
        assert!(mark.manual);
        assert_eq!(mark.confidence, 1.0);
        assert_eq!(mark.bbox.width(), MANUAL_BBOX_SIDE);
    }

    #[test]
    fn manual_ids_stay_distinct_after_removal() {
        let mut set = ShotSet::new();
        set.seed([]).unwrap();
        let a = set.add(Point2::new(0.0, 0.0));
        set.remove_at(0);
        let b = set.add(Point2::new(0.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn remove_out_of_range_is_a_noop() {
        let mut set = ShotSet::new();
        set.seed([seed_shot(1.0, 1.0, 0.9)]).unwrap();
        let revision = set.revision();
        assert!(set.remove_at(7).is_none());
        assert_eq!(set.len(), 1);
        assert_eq!(set.revision(), revision);
    }

    #[test]
    fn removal_keeps_remaining_ids_stable() {
        let mut set = ShotSet::new();
        set.seed([seed_shot(1.0, 1.0, 0.9), seed_shot(2.0, 2.0, 0.8)])
            .unwrap();
        set.add(Point2::new(3.0, 3.0));

        let removed = set.remove_at(1).unwrap();
        assert_eq!(removed.id, ShotId::Detected(1));
        assert_eq!(set.get(0).unwrap().id, ShotId::Detected(0));
        assert_eq!(set.get(1).unwrap().id, ShotId::Manual(0));
    }

    #[test]
    fn every_mutation_bumps_the_revision() {
        let mut set = ShotSet::new();
        let r0 = set.revision();
        set.seed([seed_shot(1.0, 1.0, 0.9)]).unwrap();
        let r1 = set.revision();
        assert!(r1 > r0);
        set.add(Point2::new(2.0, 2.0));
        let r2 = set.revision();
        assert!(r2 > r1);
        set.remove_at(0);
        let r3 = set.revision();
        assert!(r3 > r2);
        set.reset();
        assert!(set.revision() > r3);
    }
}
