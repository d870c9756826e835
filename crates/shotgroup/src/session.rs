//! Single-owner editing session over one captured target.
//!
//! The session owns the shot set and every piece of derived state the
//! rendering surfaces consume, replacing the original's shared mutable
//! result object. Mutations go through `&mut self`, which serializes
//! them; group geometry is recomputed at most once per discrete edit via
//! a revision-keyed cache.

use nalgebra::Point2;

use shotgroup_core::{
    analyze, resolve_marker_tap, resolve_tap, EditMode, GroupAnalysis, GroupQuality, ShotSet,
    TapAction, TierCounts, ViewTransform,
};

use crate::response::{DetectionResponse, ImageSize};
use crate::result::{ResultPoint, ShotSummary, TrainingResult};

pub struct EditSession {
    shots: ShotSet,
    image: Option<ImageSize>,
    cm_per_pixel: Option<f64>,
    canvas_side: f64,
    mode: EditMode,
    transform: ViewTransform,
    // (store revision, analysis at that revision); None results are
    // cached too so an unchanged sub-2-mark set is not rescanned.
    analysis_cache: Option<(u64, Option<GroupAnalysis>)>,
}

impl EditSession {
    /// Start a session from a parsed detection response, seeding the shot
    /// set with every detection tagged non-manual.
    pub fn from_response(response: &DetectionResponse, canvas_side: f64) -> EditSession {
        let mut shots = ShotSet::new();
        // A fresh set cannot already be seeded.
        shots
            .seed(response.seeds())
            .expect("seeding a fresh shot set");

        let image = response.image_size();
        EditSession {
            shots,
            image,
            cm_per_pixel: response.cm_per_pixel(),
            canvas_side,
            mode: EditMode::Add,
            transform: fit_transform(image, canvas_side),
            analysis_cache: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Current image→canvas transform. Identity until metadata is known.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn shots(&self) -> &ShotSet {
        &self.shots
    }

    /// Resize the canvas, recomputing the transform only on change.
    pub fn set_canvas_side(&mut self, canvas_side: f64) {
        if canvas_side != self.canvas_side {
            self.canvas_side = canvas_side;
            self.transform = fit_transform(self.image, canvas_side);
        }
    }

    /// Handle a tap on empty canvas, in canvas coordinates. Returns the
    /// action that was applied (possibly [`TapAction::Ignore`]).
    pub fn tap(&mut self, canvas_pt: Point2<f64>) -> TapAction {
        let action = resolve_tap(canvas_pt, self.mode, &self.transform, &self.shots);
        self.apply(action)
    }

    /// Handle a tap landing directly on the marker at `index`.
    pub fn tap_marker(&mut self, index: usize) -> TapAction {
        let action = resolve_marker_tap(index, self.mode, &self.shots);
        self.apply(action)
    }

    fn apply(&mut self, action: TapAction) -> TapAction {
        match action {
            TapAction::Add(image_pt) => {
                self.shots.add(image_pt);
            }
            TapAction::Remove(index) => {
                self.shots.remove_at(index);
            }
            TapAction::Ignore => {}
        }
        action
    }

    /// Group geometry for the current set, recomputed only when the set
    /// has changed since the last call.
    pub fn analysis(&mut self) -> Option<GroupAnalysis> {
        let revision = self.shots.revision();
        if let Some((cached_rev, cached)) = self.analysis_cache {
            if cached_rev == revision {
                return cached;
            }
        }
        let computed = analyze(self.shots.marks(), self.cm_per_pixel);
        self.analysis_cache = Some((revision, computed));
        computed
    }

    /// Derived summary for the summary card and the sink payload.
    pub fn summary(&mut self) -> ShotSummary {
        let analysis = self.analysis();
        let group_size_cm = analysis.and_then(|a| a.widest.distance_cm);
        ShotSummary {
            total: self.shots.len(),
            tiers: TierCounts::tally(self.shots.iter()),
            group_size_cm,
            quality: group_size_cm.map(GroupQuality::from_cm),
        }
    }

    /// Immutable snapshot handed to the persistence sink. The session is
    /// left untouched, so a failed save can simply be retried.
    pub fn result(&mut self) -> TrainingResult {
        TrainingResult {
            points: self.shots.iter().map(ResultPoint::from).collect(),
            summary: self.summary(),
        }
    }

    /// Discard the current edits and re-seed from a fresh capture.
    pub fn retake(&mut self, response: &DetectionResponse) {
        self.shots.reset();
        self.shots
            .seed(response.seeds())
            .expect("seeding after reset");
        self.image = response.image_size();
        self.cm_per_pixel = response.cm_per_pixel();
        self.transform = fit_transform(self.image, self.canvas_side);
        self.analysis_cache = None;
    }
}

fn fit_transform(image: Option<ImageSize>, canvas_side: f64) -> ViewTransform {
    match image {
        Some(size) => ViewTransform::fit(f64::from(size.width), f64::from(size.height), canvas_side),
        None => ViewTransform::IDENTITY,
    }
}
