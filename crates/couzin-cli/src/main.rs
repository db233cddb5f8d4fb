//! Couzin CLI - drive swarm and consensus runs from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::Swarm;

#[derive(Parser)]
#[command(name = "couzin")]
#[command(author, version, about = "Couzin - zone-model swarms and interaction-network connectivity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default couzin.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing couzin.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Run a zone-steering swarm
    Run {
        /// Number of ticks to run
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Swarm composition
        #[arg(short, long, value_enum)]
        swarm: Option<Swarm>,

        /// Number of agents
        #[arg(short = 'n', long)]
        agents: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print one JSON line of metrics per tick
        #[arg(long)]
        json: bool,
    },

    /// Run Laplacian consensus dynamics
    Consensus {
        /// Number of ticks to run
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Number of agents
        #[arg(short = 'n', long)]
        agents: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print one JSON line per tick
        #[arg(long)]
        json: bool,
    },

    /// Analyse the interaction graph of one random board
    Probe {
        /// Adjacency flavor
        #[arg(short, long, value_enum, default_value = "radius")]
        metric: ProbeMetric,

        /// Outer radius for the radius metric
        #[arg(short, long, default_value = "5.0")]
        radius: f64,

        /// Inner radius for the radius metric
        #[arg(long, default_value = "0.0")]
        min_radius: f64,

        /// Neighbour count for the nearest metric
        #[arg(short, long, default_value = "5")]
        k: usize,

        /// Number of agents
        #[arg(short = 'n', long)]
        agents: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the adjacency matrix
        #[arg(long)]
        matrix: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProbeMetric {
    Radius,
    Nearest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library events go to stderr so JSON output stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Run { ticks, swarm, agents, seed, json } => {
            commands::run::run(commands::run::RunArgs { ticks, swarm, agents, seed, json })
        }
        Commands::Consensus { ticks, agents, seed, json } => {
            commands::consensus::run(ticks, agents, seed, json)
        }
        Commands::Probe { metric, radius, min_radius, k, agents, seed, matrix } => {
            let probe = match metric {
                ProbeMetric::Radius => commands::probe::Probe::Radius { max: radius, min: min_radius },
                ProbeMetric::Nearest => commands::probe::Probe::Nearest { k },
            };
            commands::probe::run(probe, agents, seed, matrix)
        }
    }
}
