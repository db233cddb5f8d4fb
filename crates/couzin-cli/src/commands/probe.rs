//! Analyse the interaction graph of one random board.

use anyhow::{Context, Result};
use colored::Colorize;
use couzin::prelude::*;

use super::{fmt_fiedler, load_config};

/// Adjacency flavor to probe.
pub enum Probe {
    Radius { max: f64, min: f64 },
    Nearest { k: usize },
}

pub fn run(probe: Probe, agents: Option<usize>, seed: Option<u64>, matrix: bool) -> Result<()> {
    let config = load_config(agents, seed)?;
    let board = BoardBuilder::new()
        .with_config(config.board.clone())
        .build(|b| Population::Generic.spawn(b))
        .context("Failed to build board")?;

    let (label, adjacency) = match probe {
        Probe::Radius { max, min } => (format!("radius [{}, {})", min, max), board.radius_adjacency(max, min)),
        Probe::Nearest { k } => (format!("{} nearest", k), board.nearest_adjacency(k).adjacency),
    };
    let metrics = Board::connectivity(&adjacency, config.run.tolerance);

    println!(
        "{} {} agents in [-{m}, {m}]², {} adjacency",
        "→".blue(),
        board.n().to_string().cyan(),
        label.cyan(),
        m = board.half_extent()
    );
    if matrix {
        for row in adjacency.to_rows() {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            println!("  {}", cells.join(" "));
        }
    }
    println!("  Edges: {}", metrics.edges.to_string().cyan());
    println!("  Average degree: {:.3}", metrics.average_degree);
    println!("  Components: {}", metrics.components);
    println!("  Fiedler value: {}", fmt_fiedler(metrics.fiedler).cyan());
    println!(
        "  Connected: {}",
        if metrics.connected { "yes".green() } else { "no".red() }
    );
    Ok(())
}
