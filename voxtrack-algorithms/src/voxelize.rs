//! Hit voxelization.
//!
//! Hits are binned into a regular 3-D grid spanning their bounding box and
//! the energies falling into each cell are summed, exactly like a weighted
//! 3-D histogram. Only occupied cells become voxels.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::collections::BTreeMap;

use voxtrack_core::{validate_dimensions, Error, Hit, Position, Result, Voxel, VoxelArena};

use crate::bounds::bounding_box;

/// Margin added to both outer grid edges so that hits lying exactly on the
/// bounding box survive floating-point rounding of the bin edges.
pub const EDGE_EPSILON: f64 = 3e-12;

/// Bin edges along one axis.
#[derive(Debug, Clone)]
struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    fn new(lo: f64, hi: f64, pitch: f64, strict_voxel_size: bool) -> Self {
        let extent = hi - lo;
        let bins = ((extent / pitch).ceil() as usize).max(1);
        let centre = (hi + lo) / 2.0;
        let half_range = if strict_voxel_size {
            bins as f64 * pitch / 2.0
        } else {
            extent / 2.0
        };

        let mut first = centre - half_range - EDGE_EPSILON;
        let mut last = centre + half_range + EDGE_EPSILON;
        // Margin lost to rounding at large coordinates.
        if first >= last {
            first -= 0.5;
            last += 0.5;
        }

        let step = (last - first) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| first + i as f64 * step).collect();
        edges[bins] = last;
        Self { edges }
    }

    fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Half-open binning, with the last edge folded into the last bin.
    fn bin(&self, x: f64) -> Option<usize> {
        let first = self.edges[0];
        let last = self.edges[self.bins()];
        if !(first..=last).contains(&x) {
            return None;
        }
        let upper = self.edges.partition_point(|&edge| edge <= x);
        Some((upper - 1).min(self.bins() - 1))
    }

    fn centre(&self, bin: usize) -> f64 {
        (self.edges[bin] + self.edges[bin + 1]) / 2.0
    }

    fn width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }
}

/// Voxelizes a set of hits.
///
/// The number of voxels along each axis is the bounding-box extent divided
/// by the requested dimension, rounded up, and never less than one. With
/// `strict_voxel_size` the voxels have exactly `voxel_dimensions` and the
/// grid grows symmetrically about the box centre; otherwise the grid is
/// stretched to fill the box and the voxels may be slightly smaller than
/// requested. Every returned voxel records the size actually used.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `hits` is empty and
/// [`Error::ConfigError`] if a voxel dimension is not finite and positive.
pub fn voxelize_hits(
    hits: &[Hit],
    voxel_dimensions: [f64; 3],
    strict_voxel_size: bool,
) -> Result<VoxelArena> {
    if hits.is_empty() {
        return Err(Error::EmptyInput);
    }
    validate_dimensions("voxel dimensions", voxel_dimensions)?;

    let bbox = bounding_box(hits);
    let (lo, hi) = (bbox.lo.to_array(), bbox.hi.to_array());
    let axes: [Axis; 3] = std::array::from_fn(|k| {
        Axis::new(lo[k], hi[k], voxel_dimensions[k], strict_voxel_size)
    });

    let mut cells: BTreeMap<[usize; 3], f64> = BTreeMap::new();
    for hit in hits {
        let pos = hit.pos.to_array();
        let (Some(ix), Some(iy), Some(iz)) =
            (axes[0].bin(pos[0]), axes[1].bin(pos[1]), axes[2].bin(pos[2]))
        else {
            continue;
        };
        *cells.entry([ix, iy, iz]).or_insert(0.0) += hit.energy;
    }

    let size = [axes[0].width(), axes[1].width(), axes[2].width()];
    Ok(cells
        .into_iter()
        .filter(|(_, energy)| energy.abs() > 0.0)
        .map(|([ix, iy, iz], energy)| {
            let centre = Position::new(axes[0].centre(ix), axes[1].centre(iy), axes[2].centre(iz));
            Voxel::new(centre, energy, size)
        })
        .collect())
}
