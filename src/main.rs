// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use depthset::constants::DEFAULT_LOG_FILTER;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depthset")]
#[command(about = "Tools for ARCore depth datasets")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Config file (default: <config dir>/depthset/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Frame record layout for `inspect`
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RecordKind {
    /// Time-of-flight frame
    Tof,
    /// ARCore point cloud frame
    Points,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every TOF record in a directory as a PNG next to it
    Tof2png {
        /// Directory holding the JSON records
        dataset_dir: PathBuf,

        /// Encoding method: 1 raw float bits, 2 linear gray, 3 plasma colormap
        #[arg(short, long, allow_negative_numbers = true)]
        method: Option<i64>,

        /// Radius of the square drawn around each point
        #[arg(short, long, allow_negative_numbers = true)]
        radius: Option<i64>,

        /// Background color
        #[arg(
            short,
            long,
            num_args = 4,
            value_names = ["R", "G", "B", "A"],
            allow_negative_numbers = true
        )]
        background: Option<Vec<i64>>,
    },

    /// Align a predicted disparity map to ground truth and report errors
    Evaluate {
        /// Predicted disparity PNG
        #[arg(short, long)]
        prediction: PathBuf,

        /// Ground-truth depth PNG
        #[arg(short, long)]
        ground_truth: PathBuf,

        /// Upper bound of valid ground-truth depth (meters)
        #[arg(long)]
        max_depth: Option<f64>,
    },

    /// Print a frame record
    Inspect {
        /// JSON record
        record: PathBuf,

        /// Record layout (detected from the document when omitted)
        #[arg(short, long, value_enum)]
        kind: Option<RecordKind>,

        /// Also list every point
        #[arg(long)]
        points: bool,
    },

    /// Export the visible points of a point cloud record as LAS
    ExportLas {
        /// Point cloud JSON record
        record: PathBuf,

        /// Output file path (default: record path with .las extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depthset=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = depthset::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Tof2png {
            dataset_dir,
            method,
            radius,
            background,
        } => {
            let mut settings = config.raster;
            if let Some(method) = method {
                settings.method = method;
            }
            if let Some(radius) = radius {
                settings.point_radius = radius;
            }
            if let Some([r, g, b, a]) = background.as_deref() {
                settings.background = [*r, *g, *b, *a];
            }
            cli::tof_to_png(&dataset_dir, &settings.options())
        }
        Commands::Evaluate {
            prediction,
            ground_truth,
            max_depth,
        } => {
            let mut settings = config.evaluation;
            if let Some(max_depth) = max_depth {
                settings.max_depth = max_depth;
            }
            cli::evaluate(&prediction, &ground_truth, &settings)
        }
        Commands::Inspect {
            record,
            kind,
            points,
        } => cli::inspect(&record, kind, points),
        Commands::ExportLas { record, output } => cli::export_las(&record, output),
    }
}
