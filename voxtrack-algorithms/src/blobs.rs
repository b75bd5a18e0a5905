//! Blob energies around track extrema.
//!
//! A blob is the set of voxels whose path length from an extremum is
//! strictly less than a radius. The two blobs of a short track may overlap
//! and a voxel may sit in neither; blob energies are independent sums.

use voxtrack_core::{Error, Result, VoxelArena, VoxelId};

use crate::graph::TrackGraph;
use crate::paths::{find_extrema_and_length, shortest_paths, DistanceMap, SourceDistances};

/// Extrema of a track together with the voxels around each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobCandidates {
    /// First extremum.
    pub extremum_a: VoxelId,
    /// Second extremum.
    pub extremum_b: VoxelId,
    /// Voxels within the radius of `extremum_a`.
    pub voxels_a: Vec<VoxelId>,
    /// Voxels within the radius of `extremum_b`.
    pub voxels_b: Vec<VoxelId>,
    /// Path length between the extrema.
    pub length: f64,
}

/// Summed energy of the voxels closer than `radius` to the source.
#[must_use]
pub fn energy_within_radius(arena: &VoxelArena, from: &SourceDistances<'_>, radius: f64) -> f64 {
    from.iter()
        .filter(|&(_, d)| d < radius)
        .map(|(v, _)| arena.energy(v))
        .sum()
}

/// Voxels closer than `radius` to the source.
#[must_use]
pub fn voxels_within_radius(from: &SourceDistances<'_>, radius: f64) -> Vec<VoxelId> {
    from.iter()
        .filter(|&(_, d)| d < radius)
        .map(|(v, _)| v)
        .collect()
}

fn row(distances: &DistanceMap, id: VoxelId) -> Result<SourceDistances<'_>> {
    distances.from_source(id).ok_or(Error::UnknownVoxel(id))
}

/// Energies around both extrema of a track, lower first.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the track has no voxels.
pub fn blob_energies(arena: &VoxelArena, track: &TrackGraph, radius: f64) -> Result<(f64, f64)> {
    let distances = shortest_paths(track);
    let (a, b, _) = find_extrema_and_length(&distances)?;
    let ea = energy_within_radius(arena, &row(&distances, a)?, radius);
    let eb = energy_within_radius(arena, &row(&distances, b)?, radius);
    Ok(if ea < eb { (ea, eb) } else { (eb, ea) })
}

/// Extrema and blob membership of a track, in extremum order.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the track has no voxels.
pub fn compute_blobs(track: &TrackGraph, radius: f64) -> Result<BlobCandidates> {
    blobs_from_distances(&shortest_paths(track), radius)
}

/// Same as [`compute_blobs`] for an already computed distance map.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the map is empty.
pub fn blobs_from_distances(distances: &DistanceMap, radius: f64) -> Result<BlobCandidates> {
    let (extremum_a, extremum_b, length) = find_extrema_and_length(distances)?;
    Ok(BlobCandidates {
        extremum_a,
        extremum_b,
        voxels_a: voxels_within_radius(&row(distances, extremum_a)?, radius),
        voxels_b: voxels_within_radius(&row(distances, extremum_b)?, radius),
        length,
    })
}
