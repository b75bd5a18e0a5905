//! voxtrack-algorithms: Track reconstruction from 3-D energy deposits.
//!
//! The reconstruction chain for one event is:
//! - **Voxelization** - hits binned into a regular grid over their bounding box
//! - **Contiguity graph** - neighbouring voxels joined by distance-weighted edges
//! - **Track extraction** - connected components of the graph
//! - **Path analysis** - all-pairs shortest paths, extrema and length
//! - **Blobs** - energy within a path radius of each extremum
//! - **Merging** - optional bridging of nearby tracks
//!
#![warn(missing_docs)]

mod blobs;
mod bounds;
mod graph;
mod merge;
mod paths;
mod processing;
mod tracks;
mod voxelize;

pub use blobs::{
    blob_energies, blobs_from_distances, compute_blobs, energy_within_radius,
    voxels_within_radius, BlobCandidates,
};
pub use bounds::{bounding_box, BoundingBox};
pub use graph::{
    build_graph, extract_tracks, make_track_graphs, voxels_from_track_graph, TrackGraph,
};
pub use merge::{merge_tracks, MERGE_CONTIGUITY, MERGE_DISTANCE, MERGE_FACTOR};
pub use paths::{
    find_extrema, find_extrema_and_length, length, shortest_paths, DistanceMap, SourceDistances,
};
pub use processing::{reconstruct_event, reconstruct_events, ReconstructionStatistics};
pub use tracks::{assemble_tracks, make_tracks};
pub use voxelize::{voxelize_hits, EDGE_EPSILON};

// Re-export core types used throughout the API
pub use voxtrack_core::{Contiguity, Error, Result, TrackCollection, VoxelArena, VoxelId};
