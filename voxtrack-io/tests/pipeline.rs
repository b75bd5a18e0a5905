//! File-to-file reconstruction through the io surfaces.

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::{NamedTempFile, TempDir};
use voxtrack_algorithms::reconstruct_events;
use voxtrack_core::{ReconstructionConfig, TrackCollection};
use voxtrack_io::{HitFileReader, TrackFileWriter};

fn hit_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "event,x,y,z,energy,time").unwrap();
    for i in 0..10 {
        writeln!(file, "7,{},0,0,1.0,2.5", i).unwrap();
    }
    writeln!(file, "3,0,0,0,1.0,4.0").unwrap();
    writeln!(file, "3,0,0,0,2.0,4.0").unwrap();
    file.flush().unwrap();
    file
}

fn reconstruct() -> Vec<TrackCollection> {
    let file = hit_file();
    let events = HitFileReader::open(file.path())
        .unwrap()
        .read_events()
        .unwrap();
    let config = ReconstructionConfig::new()
        .with_voxel_dimensions([1.0, 1.0, 1.0])
        .with_blob_radius(2.0);
    reconstruct_events(&events, &config)
        .unwrap()
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn test_events_keep_file_order() {
    let collections = reconstruct();
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].event_number, 7);
    assert_eq!(collections[1].event_number, 3);
    assert_relative_eq!(collections[0].event_time, 2.5);
    assert_relative_eq!(collections[0].energy(), 10.0);
    assert_relative_eq!(collections[1].energy(), 3.0);
}

#[test]
fn test_json_output_reads_back() {
    let collections = reconstruct();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracks.json");

    TrackFileWriter::create(&path)
        .unwrap()
        .write_json(&collections)
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<TrackCollection> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), collections.len());
    for (read, written) in parsed.iter().zip(&collections) {
        assert_eq!(read.event_number, written.event_number);
        assert_eq!(read.voxels.len(), written.voxels.len());
        assert_eq!(read.len(), written.len());
        assert_relative_eq!(read.energy(), written.energy(), epsilon = 1e-9);
        for (a, b) in read.iter().zip(written.iter()) {
            assert_eq!(a.voxels, b.voxels);
            assert_eq!(a.extrema(), b.extrema());
            assert_relative_eq!(a.length, b.length, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_csv_summary_has_one_row_per_track() {
    let collections = reconstruct();
    let tracks: usize = collections.iter().map(TrackCollection::len).sum();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracks.csv");

    TrackFileWriter::create(&path)
        .unwrap()
        .write_summary_csv(&collections)
        .unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), tracks);
    assert_eq!(&rows[0][0], "7");
    assert_eq!(&rows[tracks - 1][0], "3");
}
