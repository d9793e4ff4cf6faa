//! mlu-router CLI entry point

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod report;
mod results;

#[derive(Parser)]
#[command(name = "mlu-router")]
#[command(about = "Place a flow on the path that minimizes maximum link utilization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (.toml, .yaml or .json) supplying defaults for any flag
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Topology and flow request; each flag falls back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct FlowArgs {
    /// Topology file (.gml or .json)
    #[arg(short, long)]
    pub topology: Option<PathBuf>,

    /// Shared link capacity (defaults to the file's, then 10)
    #[arg(long)]
    pub capacity: Option<f64>,

    /// Source node label
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target node label
    #[arg(short = 'd', long)]
    pub target: Option<String>,

    /// Bandwidth to place on the path
    #[arg(short, long)]
    pub bandwidth: Option<f64>,

    /// Upper bound on path length in hops
    #[arg(short = 'H', long)]
    pub max_hops: Option<usize>,

    /// Evaluate candidates in parallel
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all simple paths and report the one with the lowest MLU
    Optimize {
        #[command(flatten)]
        flow: FlowArgs,

        /// How many ranked alternatives to list
        #[arg(long)]
        top: Option<usize>,

        /// Print the selection as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Write the solution as timestamped JSON into this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Evaluate a proposed path and compare it with the optimum
    Evaluate {
        #[command(flatten)]
        flow: FlowArgs,

        /// Proposed path as comma-separated node labels, e.g. "1,4,3"
        #[arg(short, long, value_delimiter = ',', required = true)]
        path: Vec<String>,
    },
    /// Summarize a topology: size, capacity, current MLU, busiest links
    Inspect {
        /// Topology file (.gml or .json)
        #[arg(short, long)]
        topology: Option<PathBuf>,

        /// Shared link capacity
        #[arg(long)]
        capacity: Option<f64>,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "mlu_router={0},mlu_core={0},mlu_loader={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("mlu-router v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };

    match cli.command {
        Commands::Optimize {
            flow,
            top,
            json,
            save,
        } => commands::optimize(&config, &flow, top, json, save),
        Commands::Evaluate { flow, path } => commands::evaluate(&config, &flow, &path),
        Commands::Inspect { topology, capacity } => {
            commands::inspect(&config, topology, capacity)
        }
        Commands::Version => {
            println!("mlu-router v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
