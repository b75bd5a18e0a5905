//! voxtrack-core: Core types for voxel-based track reconstruction.
//!
//! This crate provides the data model shared by the reconstruction stages:
//! hits, voxels and their per-event arena, tracks, blobs, configuration and
//! errors.
//!

pub mod config;
pub mod error;
pub mod hit;
pub mod track;
pub mod voxel;

pub use config::{validate_dimensions, Contiguity, MergeConfig, ReconstructionConfig};
pub use error::{Error, Result};
pub use hit::{Hit, HitEvent, Position};
pub use track::{Blob, Track, TrackCollection};
pub use voxel::{Voxel, VoxelArena, VoxelId};
