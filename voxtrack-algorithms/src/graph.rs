//! Voxel contiguity graphs.
//!
//! Voxels become nodes of an undirected graph and neighbouring voxels are
//! joined by an edge weighted with their Euclidean distance. Connected
//! components of that graph are the candidate tracks, found with a
//! union-find over the edge list.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use voxtrack_core::{Contiguity, Result, VoxelArena, VoxelId};

/// Undirected voxel graph; nodes are handles into a [`VoxelArena`] and
/// edges carry the distance between voxel centres.
#[derive(Debug, Clone, Default)]
pub struct TrackGraph {
    graph: UnGraph<VoxelId, f64>,
}

impl TrackGraph {
    /// Returns the number of voxels.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of adjacencies.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterates over the voxels in node order.
    pub fn voxels(&self) -> impl Iterator<Item = VoxelId> + '_ {
        self.graph.node_indices().map(move |node| self.graph[node])
    }

    /// Iterates over `(a, b, distance)` edges.
    pub fn edges(&self) -> impl Iterator<Item = (VoxelId, VoxelId, f64)> + '_ {
        self.graph
            .edge_references()
            .map(move |e| (self.graph[e.source()], self.graph[e.target()], *e.weight()))
    }

    /// Returns true if `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: VoxelId) -> bool {
        self.voxels().any(|v| v == id)
    }

    pub(crate) fn inner(&self) -> &UnGraph<VoxelId, f64> {
        &self.graph
    }
}

/// Builds the contiguity graph over `ids`.
///
/// Every unordered pair is tested, so the cost is quadratic in the number
/// of voxels.
///
/// # Errors
///
/// Returns [`voxtrack_core::Error::UnknownVoxel`] if a handle does not
/// resolve in `arena`.
pub fn build_graph(
    arena: &VoxelArena,
    ids: &[VoxelId],
    contiguity: Contiguity,
) -> Result<TrackGraph> {
    connect(arena, ids, contiguity.threshold())
}

/// Joins every pair of voxels whose size-normalized separation is strictly
/// below `threshold`. The first voxel of each pair supplies the size.
pub(crate) fn connect(arena: &VoxelArena, ids: &[VoxelId], threshold: f64) -> Result<TrackGraph> {
    let voxels = ids
        .iter()
        .map(|&id| arena.try_get(id))
        .collect::<Result<Vec<_>>>()?;

    let mut graph = UnGraph::with_capacity(ids.len(), ids.len());
    let nodes: Vec<NodeIndex> = ids.iter().map(|&id| graph.add_node(id)).collect();

    for i in 0..voxels.len() {
        for j in (i + 1)..voxels.len() {
            let (va, vb) = (voxels[i], voxels[j]);
            if va.pos.scaled_distance(&vb.pos, va.size) < threshold {
                graph.add_edge(nodes[i], nodes[j], va.pos.distance(&vb.pos));
            }
        }
    }

    Ok(TrackGraph { graph })
}

/// Splits a graph into its connected components.
///
/// Components are returned in order of their first node, and each keeps
/// the node order of `graph`. Isolated voxels become single-node
/// components.
#[must_use]
pub fn extract_tracks(graph: &TrackGraph) -> Vec<TrackGraph> {
    let g = &graph.graph;
    let n = g.node_count();
    let mut uf = UnionFind::<usize>::new(n);

    for edge in g.edge_references() {
        uf.union(edge.source().index(), edge.target().index());
    }

    let mut components: Vec<TrackGraph> = Vec::new();
    let mut component_of_root: HashMap<usize, usize> = HashMap::new();
    let mut placement = Vec::with_capacity(n);

    for node in g.node_indices() {
        let root = uf.find(node.index());
        let component = *component_of_root.entry(root).or_insert_with(|| {
            components.push(TrackGraph::default());
            components.len() - 1
        });
        let local = components[component].graph.add_node(g[node]);
        placement.push((component, local));
    }

    for edge in g.edge_references() {
        let (component, source) = placement[edge.source().index()];
        let (_, target) = placement[edge.target().index()];
        components[component]
            .graph
            .add_edge(source, target, *edge.weight());
    }

    components
}

/// Builds the contiguity graph over every voxel of `arena` and splits it
/// into tracks.
///
/// # Errors
///
/// Returns [`voxtrack_core::Error::UnknownVoxel`] if a handle does not
/// resolve in `arena`.
pub fn make_track_graphs(arena: &VoxelArena, contiguity: Contiguity) -> Result<Vec<TrackGraph>> {
    let ids: Vec<VoxelId> = arena.ids().collect();
    let graph = build_graph(arena, &ids, contiguity)?;
    Ok(extract_tracks(&graph))
}

/// Returns the voxels of a track graph.
#[must_use]
pub fn voxels_from_track_graph(track: &TrackGraph) -> Vec<VoxelId> {
    track.voxels().collect()
}
