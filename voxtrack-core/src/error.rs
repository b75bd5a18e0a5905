//! Error types for voxtrack-core.

use crate::voxel::VoxelId;
use thiserror::Error;

/// Result type alias for voxtrack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for track reconstruction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No hits were supplied to the voxelizer.
    #[error("cannot voxelize an empty hit collection")]
    EmptyInput,

    /// Extrema were requested on a track with no voxels.
    #[error("cannot find extrema of an empty track")]
    EmptyTrack,

    /// A voxel handle does not resolve in the arena it was used with.
    #[error("voxel {0} is not part of this arena")]
    UnknownVoxel(VoxelId),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
