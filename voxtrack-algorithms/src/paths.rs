//! Shortest paths, extrema and track length.

use petgraph::algo::dijkstra;
use petgraph::visit::EdgeRef;
use voxtrack_core::{Error, Result, VoxelId};

use crate::graph::TrackGraph;

/// All-pairs shortest path lengths of a track graph.
///
/// Rows and columns follow the node order of the graph the map was
/// computed from. Unreachable pairs hold `f64::INFINITY` and are never
/// reported by the accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMap {
    voxels: Vec<VoxelId>,
    distances: Vec<Vec<f64>>,
}

impl DistanceMap {
    /// Returns the number of voxels covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the map covers no voxel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Voxels in row order.
    #[must_use]
    pub fn voxels(&self) -> &[VoxelId] {
        &self.voxels
    }

    fn row_of(&self, id: VoxelId) -> Option<usize> {
        self.voxels.iter().position(|&v| v == id)
    }

    /// Path length from `a` to `b`, or `None` if either is unknown or `b`
    /// cannot be reached.
    #[must_use]
    pub fn distance(&self, a: VoxelId, b: VoxelId) -> Option<f64> {
        let d = self.distances[self.row_of(a)?][self.row_of(b)?];
        d.is_finite().then_some(d)
    }

    /// Distances from one voxel to every voxel it reaches.
    #[must_use]
    pub fn from_source(&self, source: VoxelId) -> Option<SourceDistances<'_>> {
        let row = self.row_of(source)?;
        Some(SourceDistances {
            source,
            voxels: &self.voxels,
            distances: &self.distances[row],
        })
    }

    /// Iterates over reachable unordered pairs `(a, b, distance)`, `a`
    /// preceding `b` in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (VoxelId, VoxelId, f64)> + '_ {
        self.voxels.iter().enumerate().flat_map(move |(i, &a)| {
            self.voxels[i + 1..]
                .iter()
                .enumerate()
                .map(move |(offset, &b)| (a, b, self.distances[i][i + 1 + offset]))
                .filter(|(_, _, d)| d.is_finite())
        })
    }
}

/// One row of a [`DistanceMap`].
#[derive(Debug, Clone, Copy)]
pub struct SourceDistances<'a> {
    source: VoxelId,
    voxels: &'a [VoxelId],
    distances: &'a [f64],
}

impl SourceDistances<'_> {
    /// The voxel distances are measured from.
    #[must_use]
    pub fn source(&self) -> VoxelId {
        self.source
    }

    /// Iterates over `(voxel, distance)` for every reachable voxel,
    /// the source included at distance zero.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelId, f64)> + '_ {
        self.voxels
            .iter()
            .zip(self.distances)
            .filter(|(_, d)| d.is_finite())
            .map(|(&v, &d)| (v, d))
    }
}

/// Computes shortest path lengths between all voxels of a track, running
/// Dijkstra from every node with edge distances as weights.
#[must_use]
pub fn shortest_paths(track: &TrackGraph) -> DistanceMap {
    let graph = track.inner();
    let n = graph.node_count();
    let voxels: Vec<VoxelId> = graph.node_indices().map(|node| graph[node]).collect();

    let distances = graph
        .node_indices()
        .map(|start| {
            let mut row = vec![f64::INFINITY; n];
            for (node, d) in dijkstra(graph, start, None, |e| *e.weight()) {
                row[node.index()] = d;
            }
            row
        })
        .collect();

    DistanceMap { voxels, distances }
}

/// Finds the two voxels furthest apart along the track and their distance.
///
/// A single-voxel track returns that voxel twice with length zero. Pairs
/// are scanned in row order and only a strictly longer path replaces the
/// current best, so ties resolve to the first pair in that order. When no
/// pair is further apart than zero the first two voxels are returned.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the map is empty.
pub fn find_extrema_and_length(distances: &DistanceMap) -> Result<(VoxelId, VoxelId, f64)> {
    match distances.voxels() {
        [] => Err(Error::EmptyTrack),
        [only] => Ok((*only, *only, 0.0)),
        [first, second, ..] => {
            let mut best = (*first, *second, 0.0);
            for (a, b, d) in distances.pairs() {
                if d > best.2 {
                    best = (a, b, d);
                }
            }
            Ok(best)
        }
    }
}

/// The pair of voxels separated by the greatest path length.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the track has no voxels.
pub fn find_extrema(track: &TrackGraph) -> Result<(VoxelId, VoxelId)> {
    let (a, b, _) = find_extrema_and_length(&shortest_paths(track))?;
    Ok((a, b))
}

/// Path length between the extrema of a track.
///
/// # Errors
///
/// Returns [`Error::EmptyTrack`] if the track has no voxels.
pub fn length(track: &TrackGraph) -> Result<f64> {
    let (_, _, length) = find_extrema_and_length(&shortest_paths(track))?;
    Ok(length)
}
