//! Axis-aligned bounding boxes of hit sets.

use voxtrack_core::{Hit, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimal axis-aligned box enclosing a set of hits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Per-axis minimum.
    pub lo: Position,
    /// Per-axis maximum.
    pub hi: Position,
}

impl BoundingBox {
    /// The box enclosing nothing: `+inf` low corner and `-inf` high corner.
    pub const EMPTY: BoundingBox = BoundingBox {
        lo: Position::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        hi: Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Grows the box to include `pos`.
    #[must_use]
    pub fn including(self, pos: Position) -> Self {
        Self {
            lo: Position::new(self.lo.x.min(pos.x), self.lo.y.min(pos.y), self.lo.z.min(pos.z)),
            hi: Position::new(self.hi.x.max(pos.x), self.hi.y.max(pos.y), self.hi.z.max(pos.z)),
        }
    }

    /// Returns true if the box encloses no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lo.x > self.hi.x || self.lo.y > self.hi.y || self.lo.z > self.hi.z
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> [f64; 3] {
        [
            self.hi.x - self.lo.x,
            self.hi.y - self.lo.y,
            self.hi.z - self.lo.z,
        ]
    }

    /// Centre of the box.
    #[must_use]
    pub fn centre(&self) -> Position {
        self.lo.midpoint(&self.hi)
    }

    /// Returns true if `pos` lies inside the box, boundary included.
    #[must_use]
    pub fn contains(&self, pos: &Position) -> bool {
        (self.lo.x..=self.hi.x).contains(&pos.x)
            && (self.lo.y..=self.hi.y).contains(&pos.y)
            && (self.lo.z..=self.hi.z).contains(&pos.z)
    }
}

/// Computes the bounding box of `hits`.
///
/// An empty slice yields [`BoundingBox::EMPTY`]; callers needing geometry
/// must reject empty input themselves, as the voxelizer does.
#[must_use]
pub fn bounding_box(hits: &[Hit]) -> BoundingBox {
    hits.iter()
        .fold(BoundingBox::EMPTY, |bbox, hit| bbox.including(hit.pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounding_box() {
        let hits = vec![
            Hit::new(1.0, -2.0, 3.0, 1.0),
            Hit::new(-1.0, 4.0, 0.5, 1.0),
            Hit::new(0.0, 0.0, 7.0, 1.0),
        ];

        let bbox = bounding_box(&hits);

        assert_eq!(bbox.lo, Position::new(-1.0, -2.0, 0.5));
        assert_eq!(bbox.hi, Position::new(1.0, 4.0, 7.0));
        assert_relative_eq!(bbox.size()[2], 6.5);
        assert!(hits.iter().all(|h| bbox.contains(&h.pos)));
    }

    #[test]
    fn test_single_hit_box_is_degenerate() {
        let bbox = bounding_box(&[Hit::new(2.0, 3.0, 4.0, 1.0)]);
        assert_eq!(bbox.lo, bbox.hi);
        assert_eq!(bbox.size(), [0.0, 0.0, 0.0]);
        assert!(!bbox.is_empty());
    }

    #[test]
    fn test_empty_hits_yield_identity_box() {
        let bbox = bounding_box(&[]);
        assert_eq!(bbox, BoundingBox::EMPTY);
        assert!(bbox.is_empty());
        assert!(bbox.lo.x.is_infinite() && bbox.lo.x > 0.0);
        assert!(bbox.hi.z.is_infinite() && bbox.hi.z < 0.0);
    }
}
