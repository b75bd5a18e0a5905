//! voxtrack-io: Hit loading and track output for voxtrack.
//!
//! This crate stands in for the collaborators around the reconstruction
//! core: it reads hit events from CSV files and writes track collections
//! as JSON or as a per-track CSV summary.
//!

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{read_hit_events, HitFileReader};
pub use writer::{summarize, TrackFileWriter, TrackSummary};
