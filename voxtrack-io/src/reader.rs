//! Hit file reader.
//!
//! Hits are read from CSV files with an `event,x,y,z,energy` header and an
//! optional `time` column. Rows may be in any order; they are grouped by
//! event number in order of first appearance.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use voxtrack_core::{Hit, HitEvent};

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct HitRecord {
    event: u64,
    x: f64,
    y: f64,
    z: f64,
    energy: f64,
    #[serde(default)]
    time: Option<f64>,
}

/// Parses hit events from CSV data.
///
/// # Errors
///
/// Fails on malformed rows, non-finite coordinates, and negative or
/// non-finite energies.
pub fn read_hit_events<R: Read>(input: R) -> Result<Vec<HitEvent>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let mut events: Vec<HitEvent> = Vec::new();
    let mut slot_of_event: HashMap<u64, usize> = HashMap::new();

    for (row, record) in reader.deserialize::<HitRecord>().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = row + 2;

        if ![record.x, record.y, record.z].iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidFormat(format!(
                "line {line}: non-finite hit position"
            )));
        }
        if !(record.energy.is_finite() && record.energy >= 0.0) {
            return Err(Error::InvalidFormat(format!(
                "line {line}: invalid hit energy {}",
                record.energy
            )));
        }

        let slot = *slot_of_event.entry(record.event).or_insert_with(|| {
            events.push(HitEvent::new(record.event, record.time.unwrap_or(0.0)));
            events.len() - 1
        });
        events[slot].push(Hit::new(record.x, record.y, record.z, record.energy));
    }

    Ok(events)
}

/// Reader for hit CSV files.
#[derive(Debug, Clone)]
pub struct HitFileReader {
    path: PathBuf,
    file_size: u64,
}

impl HitFileReader {
    /// Opens a hit file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file metadata cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_size = std::fs::metadata(&path)?.len();
        Ok(Self { path, file_size })
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file in bytes.
    #[must_use]
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Reads all events of the file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or a row is invalid; see
    /// [`read_hit_events`].
    pub fn read_events(&self) -> Result<Vec<HitEvent>> {
        let file = File::open(&self.path)?;
        read_hit_events(BufReader::new(file))
    }
}
