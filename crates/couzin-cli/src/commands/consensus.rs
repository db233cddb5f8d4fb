//! Run Laplacian consensus dynamics.

use anyhow::{Context, Result};
use colored::Colorize;
use couzin::prelude::*;

use super::{fmt_fiedler, load_config};

pub fn run(ticks: Option<u64>, agents: Option<usize>, seed: Option<u64>, json: bool) -> Result<()> {
    let config = load_config(agents, seed)?;
    let ticks = ticks.unwrap_or(config.run.ticks);

    let mut board = BoardBuilder::new()
        .with_config(config.board.clone())
        .build_consensus(config.consensus.clone(), |b| Population::Generic.spawn(b))
        .context("Failed to build consensus board")?;

    if !json {
        println!(
            "{} Consensus dynamics: {} agents, dt {}, {} ticks",
            "→".blue(),
            board.board().n().to_string().cyan(),
            config.consensus.dt,
            ticks.to_string().cyan()
        );
        println!(
            "  {:>6}  {:>12}  {:>12}  {:>12}  {:>8}",
            "tick", "λ2(L_rep)", "λ2(L_att)", "λ2(diff)", "avg conn"
        );
    }

    for _ in 0..ticks {
        let report = board.step().context("Consensus step failed")?;
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "  {:>6}  {:>12}  {:>12}  {:>12}  {:>8.3}",
                report.tick,
                fmt_fiedler(report.repulsion_fiedler),
                fmt_fiedler(report.attraction_fiedler),
                fmt_fiedler(report.combined_fiedler),
                report.average_connectivity
            );
        }
    }

    if !json {
        println!();
        println!("{} Consensus run complete!", "✓".green().bold());
    }
    Ok(())
}
