//! File writers for reconstructed tracks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use voxtrack_core::{Position, TrackCollection};

use crate::Result;

/// One row of the per-track CSV summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    /// Event number.
    pub event: u64,
    /// Event time.
    pub time: f64,
    /// Index of the track within its event.
    pub track: usize,
    /// Number of voxels.
    pub voxels: usize,
    /// Track energy.
    pub energy: f64,
    /// Path length between the extrema.
    pub length: f64,
    /// Energy of the lower-energy blob.
    pub blob1_energy: f64,
    /// Energy of the higher-energy blob.
    pub blob2_energy: f64,
    /// Extremum of the first blob, X.
    pub extreme1_x: f64,
    /// Extremum of the first blob, Y.
    pub extreme1_y: f64,
    /// Extremum of the first blob, Z.
    pub extreme1_z: f64,
    /// Extremum of the second blob, X.
    pub extreme2_x: f64,
    /// Extremum of the second blob, Y.
    pub extreme2_y: f64,
    /// Extremum of the second blob, Z.
    pub extreme2_z: f64,
}

/// Builds one summary row per track of `collection`.
#[must_use]
pub fn summarize(collection: &TrackCollection) -> Vec<TrackSummary> {
    let position = |id| {
        collection
            .voxel(id)
            .map_or(Position::new(f64::NAN, f64::NAN, f64::NAN), |v| v.pos)
    };

    collection
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let (a, b) = track.extrema();
            let (pa, pb) = (position(a), position(b));
            let (blob1_energy, blob2_energy) = track.blob_energies();
            TrackSummary {
                event: collection.event_number,
                time: collection.event_time,
                track: index,
                voxels: track.len(),
                energy: track.energy,
                length: track.length,
                blob1_energy,
                blob2_energy,
                extreme1_x: pa.x,
                extreme1_y: pa.y,
                extreme1_z: pa.z,
                extreme2_x: pb.x,
                extreme2_y: pb.y,
                extreme2_z: pb.z,
            }
        })
        .collect()
}

/// Writer for reconstructed track collections.
pub struct TrackFileWriter {
    writer: BufWriter<File>,
}

impl TrackFileWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }

    /// Writes the full collections, voxels included, as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_json(&mut self, collections: &[TrackCollection]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, collections)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes one summary row per track as CSV, with a header.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be serialized or written.
    pub fn write_summary_csv(&mut self, collections: &[TrackCollection]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        for collection in collections {
            for row in summarize(collection) {
                csv_writer.serialize(row)?;
            }
        }
        csv_writer.flush()?;
        drop(csv_writer);
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;
    use voxtrack_core::{Blob, Track, Voxel, VoxelArena};

    fn collection() -> TrackCollection {
        let mut arena = VoxelArena::new();
        let a = arena.push(Voxel::new(Position::new(0.0, 0.0, 0.0), 2.0, [1.0, 1.0, 1.0]));
        let b = arena.push(Voxel::new(Position::new(1.0, 0.0, 0.0), 1.0, [1.0, 1.0, 1.0]));
        let track = Track::new(
            vec![a, b],
            Blob::new(a, vec![a], &arena),
            Blob::new(b, vec![b], &arena),
            1.0,
            &arena,
        );
        let mut collection = TrackCollection::new(42, 1.5, [1.0, 1.0, 1.0], arena);
        collection.push(track);
        collection
    }

    #[test]
    fn test_summarize() {
        let rows = summarize(&collection());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.event, 42);
        assert_eq!(row.voxels, 2);
        assert_relative_eq!(row.blob1_energy, 1.0);
        assert_relative_eq!(row.blob2_energy, 2.0);
        assert_relative_eq!(row.extreme1_x, 1.0);
        assert_relative_eq!(row.extreme2_x, 0.0);
    }

    #[test]
    fn test_write_summary_csv() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = TrackFileWriter::create(file.path()).unwrap();

        writer.write_summary_csv(&[collection()]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("event,time,track,voxels,energy,length"));
        assert!(lines.next().unwrap().starts_with("42,1.5,0,2,3.0,1.0,1.0,2.0"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_json_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = TrackFileWriter::create(file.path()).unwrap();
        let original = vec![collection()];

        writer.write_json(&original).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<TrackCollection> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, original);
    }
}
