//! High-level helpers that run the full reconstruction chain.

use rayon::prelude::*;
use voxtrack_core::{HitEvent, ReconstructionConfig, Result, TrackCollection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::make_track_graphs;
use crate::merge::merge_tracks;
use crate::tracks::assemble_tracks;
use crate::voxelize::voxelize_hits;

/// Counters accumulated over reconstructed events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReconstructionStatistics {
    /// Events that produced a track collection.
    pub events_processed: usize,
    /// Events that failed.
    pub events_failed: usize,
    /// Hits seen across all events.
    pub hits_processed: usize,
    /// Voxels held by successful collections, bridges included.
    pub voxels_created: usize,
    /// Tracks found.
    pub tracks_found: usize,
}

impl ReconstructionStatistics {
    /// Records the outcome of one event.
    pub fn record(&mut self, event: &HitEvent, outcome: &Result<TrackCollection>) {
        self.hits_processed += event.len();
        match outcome {
            Ok(collection) => {
                self.events_processed += 1;
                self.voxels_created += collection.voxels.len();
                self.tracks_found += collection.len();
            }
            Err(_) => self.events_failed += 1,
        }
    }

    /// Adds the counters of `other`.
    pub fn absorb(&mut self, other: &Self) {
        self.events_processed += other.events_processed;
        self.events_failed += other.events_failed;
        self.hits_processed += other.hits_processed;
        self.voxels_created += other.voxels_created;
        self.tracks_found += other.tracks_found;
    }
}

/// Voxelizes one event, builds its tracks, merges them if configured, and
/// assembles the track collection.
///
/// # Errors
///
/// Fails on an invalid configuration or an event without hits.
pub fn reconstruct_event(event: &HitEvent, config: &ReconstructionConfig) -> Result<TrackCollection> {
    config.validate()?;
    reconstruct_validated(event, config)
}

fn reconstruct_validated(event: &HitEvent, config: &ReconstructionConfig) -> Result<TrackCollection> {
    let mut voxels = voxelize_hits(
        &event.hits,
        config.voxel_dimensions,
        config.strict_voxel_size,
    )?;
    let mut graphs = make_track_graphs(&voxels, config.contiguity)?;
    if let Some(merge) = &config.merge {
        graphs = merge_tracks(&mut voxels, &graphs, merge.voxel_size, merge.min_nodes)?;
    }
    assemble_tracks(
        event.event_number,
        event.event_time,
        voxels,
        &graphs,
        config.voxel_dimensions,
        config.blob_radius,
    )
}

/// Reconstructs independent events in parallel.
///
/// Results keep the order of `events`; a failing event does not stop the
/// others.
///
/// # Errors
///
/// Fails as a whole only if the configuration is invalid.
pub fn reconstruct_events(
    events: &[HitEvent],
    config: &ReconstructionConfig,
) -> Result<Vec<Result<TrackCollection>>> {
    config.validate()?;
    Ok(events
        .par_iter()
        .map(|event| reconstruct_validated(event, config))
        .collect())
}
