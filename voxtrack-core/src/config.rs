//! Reconstruction configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Adjacency rule between voxels.
///
/// Two voxels are neighbours when the norm of their separation, measured
/// in units of the voxel size along each axis, is strictly below the
/// threshold of the selected rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Contiguity {
    /// Voxels sharing a face.
    Face,
    /// Voxels sharing a face or an edge.
    Edge,
    /// Voxels sharing a face, an edge or a corner.
    #[default]
    Corner,
}

impl Contiguity {
    /// All rules, in ascending threshold order.
    pub const ALL: [Contiguity; 3] = [Contiguity::Face, Contiguity::Edge, Contiguity::Corner];

    /// Normalized distance below which two voxels are adjacent.
    #[inline]
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Contiguity::Face => 1.2,
            Contiguity::Edge => 1.5,
            Contiguity::Corner => 1.8,
        }
    }

    /// Lower-case rule name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Contiguity::Face => "face",
            Contiguity::Edge => "edge",
            Contiguity::Corner => "corner",
        }
    }
}

impl std::fmt::Display for Contiguity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of the optional track-merging stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeConfig {
    /// Grid pitch used to locate and quantize bridge voxels.
    pub voxel_size: [f64; 3],
    /// Tracks with fewer voxels than this are never merged.
    pub min_nodes: usize,
}

impl MergeConfig {
    /// Creates a merge configuration.
    #[must_use]
    pub fn new(voxel_size: [f64; 3], min_nodes: usize) -> Self {
        Self {
            voxel_size,
            min_nodes,
        }
    }
}

/// Configuration for per-event track reconstruction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReconstructionConfig {
    /// Requested voxel size along each axis.
    pub voxel_dimensions: [f64; 3],
    /// Force voxels to exactly `voxel_dimensions` instead of stretching
    /// the grid to the hit bounding box.
    pub strict_voxel_size: bool,
    /// Adjacency rule for the track graph.
    pub contiguity: Contiguity,
    /// Path-length radius around each extremum that defines a blob.
    pub blob_radius: f64,
    /// Track merging, disabled when `None`.
    pub merge: Option<MergeConfig>,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            voxel_dimensions: [10.0, 10.0, 10.0],
            strict_voxel_size: false,
            contiguity: Contiguity::Corner,
            blob_radius: 30.0,
            merge: None,
        }
    }
}

impl ReconstructionConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the voxel dimensions.
    #[must_use]
    pub fn with_voxel_dimensions(mut self, dimensions: [f64; 3]) -> Self {
        self.voxel_dimensions = dimensions;
        self
    }

    /// Sets the strict voxel size policy.
    #[must_use]
    pub fn with_strict_voxel_size(mut self, strict: bool) -> Self {
        self.strict_voxel_size = strict;
        self
    }

    /// Sets the contiguity rule.
    #[must_use]
    pub fn with_contiguity(mut self, contiguity: Contiguity) -> Self {
        self.contiguity = contiguity;
        self
    }

    /// Sets the blob radius.
    #[must_use]
    pub fn with_blob_radius(mut self, radius: f64) -> Self {
        self.blob_radius = radius;
        self
    }

    /// Enables track merging.
    #[must_use]
    pub fn with_merge(mut self, merge: MergeConfig) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Checks that all lengths are finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first invalid length.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions("voxel dimensions", self.voxel_dimensions)?;
        if !(self.blob_radius.is_finite() && self.blob_radius > 0.0) {
            return Err(Error::ConfigError(format!(
                "blob radius must be positive, got {}",
                self.blob_radius
            )));
        }
        if let Some(merge) = &self.merge {
            validate_dimensions("merge voxel size", merge.voxel_size)?;
        }
        Ok(())
    }
}

/// Checks that every component of `dims` is finite and strictly positive.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] mentioning `what` otherwise.
pub fn validate_dimensions(what: &str, dims: [f64; 3]) -> Result<()> {
    if dims.iter().all(|d| d.is_finite() && *d > 0.0) {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "{what} must be positive, got {dims:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguity_thresholds_ascend() {
        let thresholds: Vec<f64> = Contiguity::ALL.iter().map(|c| c.threshold()).collect();
        assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
        assert!((Contiguity::Corner.threshold() - 1.8).abs() < f64::EPSILON);
        assert_eq!(Contiguity::default(), Contiguity::Corner);
        assert_eq!(Contiguity::Edge.to_string(), "edge");
    }

    #[test]
    fn test_reconstruction_config_builder() {
        let config = ReconstructionConfig::new()
            .with_voxel_dimensions([5.0, 5.0, 2.0])
            .with_strict_voxel_size(true)
            .with_contiguity(Contiguity::Face)
            .with_blob_radius(15.0)
            .with_merge(MergeConfig::new([5.0, 5.0, 2.0], 3));

        assert_eq!(config.voxel_dimensions, [5.0, 5.0, 2.0]);
        assert!(config.strict_voxel_size);
        assert_eq!(config.contiguity, Contiguity::Face);
        assert!((config.blob_radius - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.merge.map(|m| m.min_nodes), Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_lengths() {
        let zero_voxel = ReconstructionConfig::new().with_voxel_dimensions([1.0, 0.0, 1.0]);
        assert!(matches!(zero_voxel.validate(), Err(Error::ConfigError(_))));

        let nan_radius = ReconstructionConfig::new().with_blob_radius(f64::NAN);
        assert!(matches!(nan_radius.validate(), Err(Error::ConfigError(_))));

        let bad_merge =
            ReconstructionConfig::new().with_merge(MergeConfig::new([1.0, 1.0, -1.0], 2));
        assert!(matches!(bad_merge.validate(), Err(Error::ConfigError(_))));
    }
}
