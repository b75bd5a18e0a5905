use approx::assert_relative_eq;
use voxtrack_algorithms::{
    blob_energies, find_extrema_and_length, make_track_graphs, make_tracks, shortest_paths,
    voxelize_hits, Contiguity,
};
use voxtrack_core::Hit;

#[test]
fn test_coincident_hits_make_one_track() {
    let hits = [Hit::new(0.0, 0.0, 0.0, 1.0), Hit::new(0.0, 0.0, 0.0, 2.0)];
    let voxels = voxelize_hits(&hits, [1.0, 1.0, 1.0], false).unwrap();

    assert_eq!(voxels.len(), 1);
    let (id, voxel) = voxels.iter().next().unwrap();
    assert_relative_eq!(voxel.energy, 3.0);
    assert_relative_eq!(voxel.pos.distance(&hits[0].pos), 0.0, epsilon = 1e-11);

    let tracks = make_track_graphs(&voxels, Contiguity::Corner).unwrap();
    assert_eq!(tracks.len(), 1);

    let (a, b, length) = find_extrema_and_length(&shortest_paths(&tracks[0])).unwrap();
    assert_eq!((a, b), (id, id));
    assert!(length.abs() < f64::EPSILON);

    let (low, high) = blob_energies(&voxels, &tracks[0], 1.0).unwrap();
    assert_relative_eq!(low, 3.0);
    assert_relative_eq!(high, 3.0);
}

#[test]
fn test_distant_hits_make_two_tracks() {
    let hits = [
        Hit::new(0.0, 0.0, 0.0, 1.0),
        Hit::new(1000.0, 1000.0, 1000.0, 1.0),
    ];
    let voxels = voxelize_hits(&hits, [1.0, 1.0, 1.0], false).unwrap();
    assert_eq!(voxels.len(), 2);

    let tracks = make_track_graphs(&voxels, Contiguity::Corner).unwrap();
    assert_eq!(tracks.len(), 2, "Found {} tracks, expected 2", tracks.len());
    for track in &tracks {
        assert_eq!(track.node_count(), 1);
        assert_eq!(track.edge_count(), 0);
    }
}

#[test]
fn test_double_ended_track() {
    // A straight 40 mm deposit with dense energy at both ends.
    let mut hits = Vec::new();
    for i in 0..40 {
        let energy = if i < 5 || i >= 35 { 10.0 } else { 1.0 };
        hits.push(Hit::new(f64::from(i), 0.0, 0.0, energy));
    }
    let voxels = voxelize_hits(&hits, [2.0, 2.0, 2.0], false).unwrap();

    let collection = make_tracks(3, 0.25, voxels, [2.0, 2.0, 2.0], Contiguity::Corner, 6.0).unwrap();

    assert_eq!(collection.len(), 1);
    let track = &collection.tracks[0];
    let (low, high) = track.blob_energies();
    assert!(low <= high);
    assert!(low > 40.0, "Low blob energy {low} should hold an end deposit");
    assert_relative_eq!(track.energy, 130.0);
    assert!(track.length > 35.0);
}
