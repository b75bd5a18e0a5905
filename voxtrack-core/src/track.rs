//! Tracks, blobs and per-event track collections.

use crate::voxel::{Voxel, VoxelArena, VoxelId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Voxels within a path-length radius of a track extremum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Blob {
    /// The extremum the blob is centred on.
    pub extremum: VoxelId,
    /// Member voxels, including the extremum itself.
    pub voxels: Vec<VoxelId>,
    /// Summed energy of the member voxels.
    pub energy: f64,
}

impl Blob {
    /// Creates a blob, resolving its energy from `arena`.
    #[must_use]
    pub fn new(extremum: VoxelId, voxels: Vec<VoxelId>, arena: &VoxelArena) -> Self {
        let energy = arena.energy_of(&voxels);
        Self {
            extremum,
            voxels,
            energy,
        }
    }

    /// Returns the number of member voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the blob has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Returns true if `id` is a member of the blob.
    #[must_use]
    pub fn contains(&self, id: VoxelId) -> bool {
        self.voxels.contains(&id)
    }
}

/// A connected set of voxels with a blob at each end.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// Voxels making up the track.
    pub voxels: Vec<VoxelId>,
    /// Blobs, lower-energy blob first.
    pub blobs: [Blob; 2],
    /// Path length between the two extrema.
    pub length: f64,
    /// Summed energy of all track voxels.
    pub energy: f64,
}

impl Track {
    /// Creates a track, ordering the blobs so the first has the lower energy.
    ///
    /// Blobs of equal energy keep `b` first.
    #[must_use]
    pub fn new(voxels: Vec<VoxelId>, a: Blob, b: Blob, length: f64, arena: &VoxelArena) -> Self {
        let energy = arena.energy_of(&voxels);
        let blobs = if a.energy < b.energy { [a, b] } else { [b, a] };
        Self {
            voxels,
            blobs,
            length,
            energy,
        }
    }

    /// Returns the number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the track has no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// The two extrema, in blob order.
    #[must_use]
    pub fn extrema(&self) -> (VoxelId, VoxelId) {
        (self.blobs[0].extremum, self.blobs[1].extremum)
    }

    /// Blob energies, lower first.
    #[must_use]
    pub fn blob_energies(&self) -> (f64, f64) {
        (self.blobs[0].energy, self.blobs[1].energy)
    }

    /// Returns true if `id` belongs to the track.
    #[must_use]
    pub fn contains(&self, id: VoxelId) -> bool {
        self.voxels.contains(&id)
    }
}

/// All tracks reconstructed for one event.
///
/// The collection owns the event's voxel arena so that every [`VoxelId`]
/// held by its tracks can be resolved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackCollection {
    /// Event number.
    pub event_number: u64,
    /// Event time.
    pub event_time: f64,
    /// Voxel dimensions requested for this event.
    pub voxel_dimensions: [f64; 3],
    /// Voxels referenced by the tracks.
    pub voxels: VoxelArena,
    /// Reconstructed tracks.
    pub tracks: Vec<Track>,
}

impl TrackCollection {
    /// Creates an empty collection over `voxels`.
    #[must_use]
    pub fn new(
        event_number: u64,
        event_time: f64,
        voxel_dimensions: [f64; 3],
        voxels: VoxelArena,
    ) -> Self {
        Self {
            event_number,
            event_time,
            voxel_dimensions,
            voxels,
            tracks: Vec::new(),
        }
    }

    /// Adds a track.
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Returns the number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if no tracks were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterates over the tracks.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Resolves a voxel handle.
    #[must_use]
    pub fn voxel(&self, id: VoxelId) -> Option<&Voxel> {
        self.voxels.get(id)
    }

    /// Summed energy of all tracks.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.tracks.iter().map(|t| t.energy).sum()
    }
}
