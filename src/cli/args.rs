//! Command line argument parsing for the geosearch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// geosearch - radius and bounding box search over geopoints
#[derive(Parser, Debug, Clone)]
#[command(name = "geosearch")]
#[command(about = "Radius and bounding box search over geopoints")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GeoSearchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GeoSearchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find points within a distance of a center
    Search(SearchArgs),

    /// Find points inside a bounding box
    #[command(name = "bbox")]
    BoundingBox(BoundingBoxArgs),
}

/// Points file and search options shared by every command
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Points file (JSONL, one document per line)
    #[arg(short, long, value_name = "POINTS_FILE")]
    pub points: PathBuf,

    /// Geopoint field name
    #[arg(long, default_value = "location")]
    pub field: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Maximum number of clauses per disjunction (0 = unlimited)
    #[arg(long, default_value = "0")]
    pub max_clauses: usize,

    /// Bits dropped between successive indexed precisions (1-15)
    #[arg(long, default_value = "9")]
    pub precision_step: u32,
}

/// Arguments for distance search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Center longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Center latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Search radius with an optional unit, e.g. 500m, 50km, 10mi
    #[arg(short, long)]
    pub distance: String,
}

/// Arguments for bounding box search
#[derive(Parser, Debug, Clone)]
pub struct BoundingBoxArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Top-left longitude
    #[arg(long, allow_hyphen_values = true)]
    pub top_left_lon: f64,

    /// Top-left latitude
    #[arg(long, allow_hyphen_values = true)]
    pub top_left_lat: f64,

    /// Bottom-right longitude (less than the top-left one to wrap the dateline)
    #[arg(long, allow_hyphen_values = true)]
    pub bottom_right_lon: f64,

    /// Bottom-right latitude
    #[arg(long, allow_hyphen_values = true)]
    pub bottom_right_lat: f64,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
