//! Merging of nearby tracks through synthetic bridge voxels.
//!
//! For every pair of sufficiently large tracks, the first voxel pair (in
//! enumeration order) that lies within [`MERGE_DISTANCE`] voxels on every
//! axis spawns one bridge voxel at the grid-quantized midpoint. The bridge
//! takes `1 - MERGE_FACTOR` of the two voxels' energy and each contributing
//! voxel loses that share of its own energy. Shares are taken from the
//! energies before merging and accumulate when a voxel bridges several
//! pairs. The redistribution is a heuristic and does not conserve the
//! exact energy layout of the event.

use std::collections::BTreeMap;

use voxtrack_core::{Position, Result, Voxel, VoxelArena, VoxelId};

use crate::graph::{connect, extract_tracks, TrackGraph};

/// Fraction of its energy a voxel keeps after contributing to a bridge.
pub const MERGE_FACTOR: f64 = 0.75;

/// Per-axis separation, in voxels, below which two tracks are bridged.
pub const MERGE_DISTANCE: f64 = 2.5;

/// Normalized adjacency threshold used to rebuild the merged graph.
pub const MERGE_CONTIGUITY: f64 = 1.85;

fn within_merge_distance(a: &Position, b: &Position, voxel_size: [f64; 3]) -> bool {
    let (a, b) = (a.to_array(), b.to_array());
    (0..3).all(|k| ((a[k] - b[k]) / voxel_size[k]).abs() < MERGE_DISTANCE)
}

fn quantize(pos: Position, voxel_size: [f64; 3]) -> Position {
    let p = pos.to_array();
    Position::from_array(std::array::from_fn(|k| {
        voxel_size[k] * (p[k] / voxel_size[k]).round_ties_even()
    }))
}

/// Bridges nearby tracks and rebuilds the track graphs.
///
/// Bridge voxels are appended to `arena` with size `voxel_size`; the energy
/// of contributing voxels is reduced in place. The returned graphs cover
/// the voxels of `tracks` plus all bridges, joined with
/// [`MERGE_CONTIGUITY`] and split into connected components.
///
/// Mutates shared voxel energy, so it must see all tracks of an event at
/// once.
///
/// # Errors
///
/// Returns [`voxtrack_core::Error::UnknownVoxel`] if a track refers to a
/// voxel outside `arena`.
pub fn merge_tracks(
    arena: &mut VoxelArena,
    tracks: &[TrackGraph],
    voxel_size: [f64; 3],
    min_nodes: usize,
) -> Result<Vec<TrackGraph>> {
    let share = 1.0 - MERGE_FACTOR;
    let mut bridges = Vec::new();
    let mut subtractions: BTreeMap<VoxelId, f64> = BTreeMap::new();

    for (i, first) in tracks.iter().enumerate() {
        if first.node_count() < min_nodes {
            continue;
        }
        for second in &tracks[i + 1..] {
            if second.node_count() < min_nodes {
                continue;
            }

            let mut contact = None;
            'search: for v1 in first.voxels() {
                let a = arena.try_get(v1)?;
                for v2 in second.voxels() {
                    let b = arena.try_get(v2)?;
                    if within_merge_distance(&a.pos, &b.pos, voxel_size) {
                        contact = Some((v1, *a, v2, *b));
                        break 'search;
                    }
                }
            }

            if let Some((v1, a, v2, b)) = contact {
                let pos = quantize(a.pos.midpoint(&b.pos), voxel_size);
                bridges.push(Voxel::new(pos, (a.energy + b.energy) * share, voxel_size));
                *subtractions.entry(v1).or_insert(0.0) += a.energy * share;
                *subtractions.entry(v2).or_insert(0.0) += b.energy * share;
            }
        }
    }

    for (id, amount) in subtractions {
        arena.subtract_energy(id, amount)?;
    }

    let mut ids: Vec<VoxelId> = tracks.iter().flat_map(TrackGraph::voxels).collect();
    ids.extend(bridges.into_iter().map(|bridge| arena.push(bridge)));

    let merged = connect(arena, &ids, MERGE_CONTIGUITY)?;
    Ok(extract_tracks(&merged))
}
