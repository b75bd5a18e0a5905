//! Hit and position types for 3-D energy deposits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in detector space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a position from `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn from_array(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    /// Returns the coordinates as `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another position.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean norm of the separation after dividing each axis by `size`.
    ///
    /// A value of 1.0 means the two points are one cell apart along a
    /// single axis.
    #[inline]
    #[must_use]
    pub fn scaled_distance(&self, other: &Self, size: [f64; 3]) -> f64 {
        let dx = (self.x - other.x) / size[0];
        let dy = (self.y - other.y) / size[1];
        let dz = (self.z - other.z) / size[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Midpoint between two positions.
    #[inline]
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

impl From<[f64; 3]> for Position {
    fn from(xyz: [f64; 3]) -> Self {
        Self::from_array(xyz)
    }
}

/// A point-like energy deposit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hit {
    /// Deposit position.
    pub pos: Position,
    /// Deposited energy (non-negative).
    pub energy: f64,
}

impl Hit {
    /// Creates a new hit.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, energy: f64) -> Self {
        Self {
            pos: Position::new(x, y, z),
            energy,
        }
    }
}

/// All hits recorded for a single event.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HitEvent {
    /// Event number.
    pub event_number: u64,
    /// Event time.
    pub event_time: f64,
    /// Hits belonging to the event.
    pub hits: Vec<Hit>,
}

impl HitEvent {
    /// Creates an event with no hits.
    #[must_use]
    pub fn new(event_number: u64, event_time: f64) -> Self {
        Self {
            event_number,
            event_time,
            hits: Vec::new(),
        }
    }

    /// Adds a hit to the event.
    pub fn push(&mut self, hit: Hit) {
        self.hits.push(hit);
    }

    /// Returns the number of hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if the event carries no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Total deposited energy.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.hits.iter().map(|h| h.energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(1.0, 2.0, 2.0);
        assert_relative_eq!(a.distance(&b), 3.0);
        assert_relative_eq!(b.distance(&a), 3.0);
    }

    #[test]
    fn test_scaled_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(10.0, 0.0, 5.0);
        assert_relative_eq!(a.scaled_distance(&b, [10.0, 1.0, 5.0]), 2.0_f64.sqrt());
    }

    #[test]
    fn test_position_array_conversion() {
        let p = Position::from([1.5, -2.0, 3.25]);
        assert_eq!(p.to_array(), [1.5, -2.0, 3.25]);
        assert_eq!(p.midpoint(&Position::new(0.5, 0.0, 0.75)), Position::new(1.0, -1.0, 2.0));
    }

    #[test]
    fn test_hit_event() {
        let mut event = HitEvent::new(7, 1.5);
        assert!(event.is_empty());

        event.push(Hit::new(0.0, 0.0, 0.0, 1.0));
        event.push(Hit::new(1.0, 0.0, 0.0, 2.5));

        assert_eq!(event.len(), 2);
        assert_relative_eq!(event.energy(), 3.5);
    }
}
