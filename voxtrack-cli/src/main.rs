//! voxtrack CLI.
//!
//! Reconstructs tracks and blobs from CSV hit files.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};

use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use voxtrack_algorithms::{reconstruct_events, BoundingBox, ReconstructionStatistics};
use voxtrack_core::{HitEvent, MergeConfig, ReconstructionConfig, TrackCollection};
use voxtrack_io::{HitFileReader, TrackFileWriter};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    VoxtrackIo(#[from] voxtrack_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] voxtrack_core::Error),

    #[error("Unsupported output format '{0}', expected .json or .csv")]
    OutputFormat(String),
}

/// Voxel adjacency criterion.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContiguityArg {
    /// Voxels sharing a face
    Face,
    /// Voxels sharing at least an edge
    Edge,
    /// Voxels sharing at least a corner
    Corner,
}

impl From<ContiguityArg> for voxtrack_core::Contiguity {
    fn from(arg: ContiguityArg) -> Self {
        match arg {
            ContiguityArg::Face => Self::Face,
            ContiguityArg::Edge => Self::Edge,
            ContiguityArg::Corner => Self::Corner,
        }
    }
}

/// Output file format, chosen from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or_else(String::new, str::to_lowercase);
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(CliError::OutputFormat(ext)),
        }
    }
}

/// Voxel-based track and blob reconstruction.
#[derive(Parser)]
#[command(name = "voxtrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct tracks from CSV hit files
    Reconstruct {
        /// Input hit file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Output file path (.json or .csv)
        #[arg(short, long)]
        output: PathBuf,

        /// Voxel dimensions as x,y,z
        #[arg(long, value_delimiter = ',', default_value = "10,10,10")]
        voxel_size: Vec<f64>,

        /// Voxel adjacency criterion
        #[arg(short, long, value_enum, default_value = "corner")]
        contiguity: ContiguityArg,

        /// Blob radius, measured along the track
        #[arg(long, default_value = "30.0")]
        blob_radius: f64,

        /// Use the voxel dimensions exactly instead of fitting the bounding box
        #[arg(long)]
        strict_voxel_size: bool,

        /// Merge nearby tracks with at least this many voxels
        #[arg(long)]
        merge_min_nodes: Option<usize>,
    },

    /// Show information about a hit file
    Info {
        /// Input hit file
        input: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn voxel_dimensions(values: &[f64]) -> Result<[f64; 3]> {
    match values {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(voxtrack_core::Error::ConfigError(format!(
            "voxel size needs three values, got {}",
            values.len()
        ))
        .into()),
    }
}

fn load_events(input: &[PathBuf]) -> Result<Vec<HitEvent>> {
    let mut events = Vec::new();
    for path in input {
        let reader = HitFileReader::open(path)?;
        let file_events = reader.read_events()?;
        debug!(
            "{}: {} bytes, {} events",
            path.display(),
            reader.file_size(),
            file_events.len()
        );
        events.extend(file_events);
    }
    Ok(events)
}

fn reconstruct(
    input: &[PathBuf],
    output: &Path,
    config: &ReconstructionConfig,
) -> Result<ReconstructionStatistics> {
    let format = OutputFormat::from_path(output)?;
    info!("Reading {} file(s)", input.len());
    debug!("Configuration: {:?}", config);

    let events = load_events(input)?;
    let outcomes = reconstruct_events(&events, config)?;

    let mut stats = ReconstructionStatistics::default();
    let mut collections: Vec<TrackCollection> = Vec::with_capacity(events.len());
    for (event, outcome) in events.iter().zip(outcomes) {
        stats.record(event, &outcome);
        match outcome {
            Ok(collection) => {
                debug!(
                    "Event {}: {} hits, {} tracks",
                    event.event_number,
                    event.len(),
                    collection.len()
                );
                collections.push(collection);
            }
            Err(err) => warn!("Skipping event {}: {}", event.event_number, err),
        }
    }

    let mut writer = TrackFileWriter::create(output)?;
    match format {
        OutputFormat::Json => writer.write_json(&collections)?,
        OutputFormat::Csv => writer.write_summary_csv(&collections)?,
    }
    info!("Wrote {} collections to {}", collections.len(), output.display());

    Ok(stats)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Reconstruct {
            input,
            output,
            voxel_size,
            contiguity,
            blob_radius,
            strict_voxel_size,
            merge_min_nodes,
        } => {
            let dimensions = voxel_dimensions(&voxel_size)?;
            let mut config = ReconstructionConfig::new()
                .with_voxel_dimensions(dimensions)
                .with_contiguity(contiguity.into())
                .with_blob_radius(blob_radius)
                .with_strict_voxel_size(strict_voxel_size);
            if let Some(min_nodes) = merge_min_nodes {
                config = config.with_merge(MergeConfig::new(dimensions, min_nodes));
            }

            let start = Instant::now();
            let stats = reconstruct(&input, &output, &config)?;
            let elapsed = start.elapsed();

            println!(
                "Processed {} events in {:.2}s",
                stats.events_processed + stats.events_failed,
                elapsed.as_secs_f64()
            );
            println!("Failed events: {}", stats.events_failed);
            println!("Total hits: {}", stats.hits_processed);
            println!("Total voxels: {}", stats.voxels_created);
            println!("Total tracks: {}", stats.tracks_found);
        }

        Commands::Info { input } => {
            let reader = HitFileReader::open(&input)?;
            let events = reader.read_events()?;
            let hits: usize = events.iter().map(HitEvent::len).sum();
            let energy: f64 = events.iter().map(HitEvent::energy).sum();

            println!("File: {}", input.display());
            println!(
                "Size: {} bytes ({:.2} MB)",
                reader.file_size(),
                reader.file_size() as f64 / 1_000_000.0
            );
            println!("Events: {}", events.len());
            println!("Hits: {}", hits);
            println!("Energy: {:.4}", energy);

            let bounds = events
                .iter()
                .flat_map(|event| &event.hits)
                .fold(BoundingBox::EMPTY, |bounds, hit| bounds.including(hit.pos));
            if !bounds.is_empty() {
                println!("X range: {} - {}", bounds.lo.x, bounds.hi.x);
                println!("Y range: {} - {}", bounds.lo.y, bounds.hi.y);
                println!("Z range: {} - {}", bounds.lo.z, bounds.hi.z);
            }
        }
    }

    Ok(())
}
