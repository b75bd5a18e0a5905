//! Track assembly.

use voxtrack_core::{Blob, Contiguity, Result, Track, TrackCollection, VoxelArena};

use crate::blobs::blobs_from_distances;
use crate::graph::{make_track_graphs, voxels_from_track_graph, TrackGraph};
use crate::paths::shortest_paths;

/// Builds the tracks of one event from its voxels.
///
/// The voxels are joined under `contiguity`, split into connected
/// components, and each component becomes a [`Track`] whose blobs hold the
/// voxels within `blob_radius` of its extrema, lower-energy blob first.
///
/// # Errors
///
/// Propagates graph and extrema errors; none occur for voxels produced by
/// the voxelizer.
pub fn make_tracks(
    event_number: u64,
    event_time: f64,
    voxels: VoxelArena,
    voxel_dimensions: [f64; 3],
    contiguity: Contiguity,
    blob_radius: f64,
) -> Result<TrackCollection> {
    let graphs = make_track_graphs(&voxels, contiguity)?;
    assemble_tracks(
        event_number,
        event_time,
        voxels,
        &graphs,
        voxel_dimensions,
        blob_radius,
    )
}

/// Packages already built track graphs into a [`TrackCollection`].
///
/// `graphs` must refer to voxels of `voxels`; this is the entry point used
/// after track merging has replaced the original graphs.
///
/// # Errors
///
/// Returns [`voxtrack_core::Error::EmptyTrack`] for a graph without voxels.
pub fn assemble_tracks(
    event_number: u64,
    event_time: f64,
    voxels: VoxelArena,
    graphs: &[TrackGraph],
    voxel_dimensions: [f64; 3],
    blob_radius: f64,
) -> Result<TrackCollection> {
    let mut tracks = Vec::with_capacity(graphs.len());

    for graph in graphs {
        let distances = shortest_paths(graph);
        let blobs = blobs_from_distances(&distances, blob_radius)?;
        let blob_a = Blob::new(blobs.extremum_a, blobs.voxels_a, &voxels);
        let blob_b = Blob::new(blobs.extremum_b, blobs.voxels_b, &voxels);
        tracks.push(Track::new(
            voxels_from_track_graph(graph),
            blob_a,
            blob_b,
            blobs.length,
            &voxels,
        ));
    }

    let mut collection = TrackCollection::new(event_number, event_time, voxel_dimensions, voxels);
    collection.tracks = tracks;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxtrack_core::{Position, Voxel, VoxelId};

    fn voxels(points: &[([f64; 3], f64)]) -> VoxelArena {
        points
            .iter()
            .map(|&(p, e)| Voxel::new(Position::from(p), e, [1.0, 1.0, 1.0]))
            .collect()
    }

    #[test]
    fn test_make_tracks_orders_blobs() {
        // High-energy end first in voxel order.
        let arena = voxels(&[
            ([0.0, 0.0, 0.0], 8.0),
            ([1.0, 0.0, 0.0], 1.0),
            ([2.0, 0.0, 0.0], 1.0),
            ([3.0, 0.0, 0.0], 1.0),
            ([4.0, 0.0, 0.0], 2.0),
        ]);

        let collection = make_tracks(11, 2.5, arena, [1.0, 1.0, 1.0], Contiguity::Corner, 1.5).unwrap();

        assert_eq!(collection.event_number, 11);
        assert_relative_eq!(collection.event_time, 2.5);
        assert_eq!(collection.len(), 1);

        let track = &collection.tracks[0];
        assert_eq!(track.len(), 5);
        assert_relative_eq!(track.length, 4.0);
        assert_relative_eq!(track.energy, 13.0);
        assert_eq!(track.extrema(), (VoxelId(4), VoxelId(0)));
        assert_relative_eq!(track.blob_energies().0, 3.0);
        assert_relative_eq!(track.blob_energies().1, 9.0);
    }

    #[test]
    fn test_every_component_becomes_a_track() {
        let arena = voxels(&[
            ([0.0, 0.0, 0.0], 1.0),
            ([1.0, 1.0, 1.0], 1.0),
            ([20.0, 0.0, 0.0], 4.0),
        ]);

        let collection = make_tracks(0, 0.0, arena, [1.0, 1.0, 1.0], Contiguity::Face, 1.0).unwrap();

        // (0,0,0) and (1,1,1) are corner neighbours only.
        assert_eq!(collection.len(), 3);
        assert_relative_eq!(collection.energy(), 6.0);
        for track in collection.iter() {
            assert_eq!(track.len(), 1);
            assert!(track.length.abs() < f64::EPSILON);
            assert_eq!(track.extrema().0, track.extrema().1);
        }
    }

    #[test]
    fn test_no_voxels_no_tracks() {
        let collection = make_tracks(
            5,
            0.0,
            VoxelArena::new(),
            [1.0, 1.0, 1.0],
            Contiguity::Corner,
            1.0,
        )
        .unwrap();
        assert!(collection.is_empty());
    }
}
