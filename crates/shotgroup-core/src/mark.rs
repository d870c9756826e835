use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Side of the synthesized bounding box for manually placed marks, in
/// original-image pixels.
pub const MANUAL_BBOX_SIDE: f64 = 30.0;

/// Stable identifier for a shot mark.
///
/// Detected marks carry the index they had in the detection response;
/// manual marks carry a monotonically increasing token issued by the
/// [`ShotSet`](crate::ShotSet), so the two namespaces never collide.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotId {
    Detected(usize),
    Manual(u64),
}

/// Axis-aligned bounding box `(x1, y1, x2, y2)` in original-image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Square box of side `side` centered on `center`.
    pub fn square(center: Point2<f64>, side: f64) -> BBox {
        let half = side / 2.0;
        BBox {
            x1: center.x - half,
            y1: center.y - half,
            x2: center.x + half,
            y2: center.y + half,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// `[x1, y1, x2, y2]` wire form.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn from_array(a: [f64; 4]) -> BBox {
        BBox {
            x1: a[0],
            y1: a[1],
            x2: a[2],
            y2: a[3],
        }
    }
}

/// Detection-source entry used to seed a [`ShotSet`](crate::ShotSet).
///
/// Everything is in original-image pixel space; the seeding store assigns
/// [`ShotId::Detected`] ids by position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedShot {
    pub center: Point2<f64>,
    pub bbox: BBox,
    pub confidence: f64,
}

/// One annotated bullet hole.
///
/// `center` is the single source of truth and lives in the original
/// image's pixel space; canvas coordinates are always derived through a
/// [`ViewTransform`](crate::ViewTransform), never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotMark {
    pub id: ShotId,
    pub center: Point2<f64>,
    pub bbox: BBox,
    /// Detector confidence in `[0, 1]`; always `1.0` for manual marks.
    pub confidence: f64,
    /// Provenance: `true` when placed by the user rather than detected.
    pub manual: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_bbox_is_centered() {
        let b = BBox::square(Point2::new(100.0, 40.0), MANUAL_BBOX_SIDE);
        assert_relative_eq!(b.width(), 30.0);
        assert_relative_eq!(b.height(), 30.0);
        let c = b.center();
        assert_relative_eq!(c.x, 100.0);
        assert_relative_eq!(c.y, 40.0);
    }

    #[test]
    fn bbox_array_round_trip() {
        let b = BBox::from_array([1.0, 2.0, 5.0, 9.0]);
        assert_eq!(b.to_array(), [1.0, 2.0, 5.0, 9.0]);
    }

    #[test]
    fn ids_from_different_namespaces_never_collide() {
        assert_ne!(ShotId::Detected(3), ShotId::Manual(3));
    }
}
