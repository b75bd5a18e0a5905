//! Voxels and the per-event voxel arena.
//!
//! Every voxel of an event lives in a single [`VoxelArena`]. Graphs, blobs
//! and tracks refer to voxels through [`VoxelId`] handles, so an energy
//! change made through the arena is seen by every structure holding that
//! handle. Two voxels may share a position; identity is the handle.
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use crate::error::{Error, Result};
use crate::hit::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a voxel stored in a [`VoxelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelId(pub u32);

impl VoxelId {
    /// Position of the voxel inside its arena.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VoxelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A regular-grid cell aggregating the energy of the hits inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Voxel {
    /// Cell centre.
    pub pos: Position,
    /// Accumulated energy.
    pub energy: f64,
    /// Cell size along each axis.
    pub size: [f64; 3],
}

impl Voxel {
    /// Creates a new voxel.
    #[inline]
    #[must_use]
    pub const fn new(pos: Position, energy: f64, size: [f64; 3]) -> Self {
        Self { pos, energy, size }
    }
}

/// Owned store of all voxels belonging to one event.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelArena {
    voxels: Vec<Voxel>,
}

impl VoxelArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { voxels: Vec::new() }
    }

    /// Creates an empty arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            voxels: Vec::with_capacity(capacity),
        }
    }

    /// Adds a voxel and returns its handle.
    pub fn push(&mut self, voxel: Voxel) -> VoxelId {
        let id = VoxelId(self.voxels.len() as u32);
        self.voxels.push(voxel);
        id
    }

    /// Returns the number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the arena holds no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Returns true if `id` resolves in this arena.
    #[must_use]
    pub fn contains(&self, id: VoxelId) -> bool {
        id.index() < self.voxels.len()
    }

    /// Looks up a voxel.
    #[must_use]
    pub fn get(&self, id: VoxelId) -> Option<&Voxel> {
        self.voxels.get(id.index())
    }

    /// Looks up a voxel, failing with [`Error::UnknownVoxel`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVoxel`] if `id` does not resolve.
    pub fn try_get(&self, id: VoxelId) -> Result<&Voxel> {
        self.get(id).ok_or(Error::UnknownVoxel(id))
    }

    /// Energy of a voxel, or 0.0 for an unknown handle.
    #[inline]
    #[must_use]
    pub fn energy(&self, id: VoxelId) -> f64 {
        self.get(id).map_or(0.0, |v| v.energy)
    }

    /// Overwrites the energy of a voxel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVoxel`] if `id` does not resolve.
    pub fn set_energy(&mut self, id: VoxelId, energy: f64) -> Result<()> {
        let voxel = self
            .voxels
            .get_mut(id.index())
            .ok_or(Error::UnknownVoxel(id))?;
        voxel.energy = energy;
        Ok(())
    }

    /// Removes `amount` from the energy of a voxel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVoxel`] if `id` does not resolve.
    pub fn subtract_energy(&mut self, id: VoxelId, amount: f64) -> Result<()> {
        let voxel = self
            .voxels
            .get_mut(id.index())
            .ok_or(Error::UnknownVoxel(id))?;
        voxel.energy -= amount;
        Ok(())
    }

    /// Iterates over all handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = VoxelId> + '_ {
        (0..self.voxels.len()).map(|i| VoxelId(i as u32))
    }

    /// Iterates over `(handle, voxel)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelId, &Voxel)> {
        self.voxels
            .iter()
            .enumerate()
            .map(|(i, v)| (VoxelId(i as u32), v))
    }

    /// Sum of the energies of the given voxels.
    #[must_use]
    pub fn energy_of(&self, ids: &[VoxelId]) -> f64 {
        ids.iter().map(|&id| self.energy(id)).sum()
    }

    /// Total energy held by the arena.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.voxels.iter().map(|v| v.energy).sum()
    }
}

impl std::ops::Index<VoxelId> for VoxelArena {
    type Output = Voxel;

    fn index(&self, id: VoxelId) -> &Voxel {
        &self.voxels[id.index()]
    }
}

impl FromIterator<Voxel> for VoxelArena {
    fn from_iter<I: IntoIterator<Item = Voxel>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn voxel(x: f64, energy: f64) -> Voxel {
        Voxel::new(Position::new(x, 0.0, 0.0), energy, [1.0, 1.0, 1.0])
    }

    #[test]
    fn test_arena_push_and_lookup() {
        let mut arena = VoxelArena::with_capacity(2);
        assert!(arena.is_empty());

        let a = arena.push(voxel(0.0, 1.0));
        let b = arena.push(voxel(1.0, 2.0));

        assert_eq!(arena.len(), 2);
        assert_ne!(a, b);
        assert_relative_eq!(arena[b].pos.x, 1.0);
        assert_relative_eq!(arena.total_energy(), 3.0);
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_coincident_voxels_keep_identity() {
        let mut arena = VoxelArena::new();
        let a = arena.push(voxel(0.0, 1.0));
        let b = arena.push(voxel(0.0, 1.0));

        arena.subtract_energy(a, 0.25).unwrap();

        assert_relative_eq!(arena.energy(a), 0.75);
        assert_relative_eq!(arena.energy(b), 1.0);
    }

    #[test]
    fn test_energy_mutation() {
        let mut arena: VoxelArena = [voxel(0.0, 4.0), voxel(2.0, 2.0)].into_iter().collect();
        let ids: Vec<_> = arena.ids().collect();

        arena.subtract_energy(ids[0], 1.0).unwrap();
        arena.subtract_energy(ids[0], 1.0).unwrap();
        arena.set_energy(ids[1], 5.0).unwrap();

        assert_relative_eq!(arena.energy(ids[0]), 2.0);
        assert_relative_eq!(arena.energy_of(&ids), 7.0);
    }

    #[test]
    fn test_unknown_voxel() {
        let mut arena = VoxelArena::new();
        let missing = VoxelId(3);

        assert!(!arena.contains(missing));
        assert!(arena.get(missing).is_none());
        assert_eq!(arena.try_get(missing), Err(Error::UnknownVoxel(missing)));
        assert_eq!(
            arena.subtract_energy(missing, 1.0),
            Err(Error::UnknownVoxel(missing))
        );
    }
}
