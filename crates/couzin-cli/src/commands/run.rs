//! Run a zone-steering swarm.

use anyhow::{Context, Result};
use colored::Colorize;
use couzin::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use super::{fmt_fiedler, load_config};
use crate::config::Swarm;

/// Command-line overrides for `couzin run`.
pub struct RunArgs {
    pub ticks: Option<u64>,
    pub swarm: Option<Swarm>,
    pub agents: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

/// One JSON line per tick.
#[derive(Serialize)]
struct TickLine<'a> {
    report: &'a TickReport,
    metrics: SwarmMetrics,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.agents, args.seed)?;
    if let Some(swarm) = args.swarm {
        config.run.swarm = swarm;
    }
    let ticks = args.ticks.unwrap_or(config.run.ticks);
    let tolerance = config.run.tolerance;
    let population = config.run.population();

    let mut board = BoardBuilder::new()
        .with_config(config.board.clone())
        .with_steering(config.steering.clone())
        .build(|b| population.spawn(b))
        .context("Failed to build board")?;

    let initial = SwarmMetrics::measure(&board, tolerance);
    if !args.json {
        println!(
            "{} Running {} {:?} agents for {} ticks (seed {})...",
            "→".blue(),
            board.n().to_string().cyan(),
            config.run.swarm,
            ticks.to_string().cyan(),
            config.board.seed
        );
    }

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(ticks);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        pb
    };

    for _ in 0..ticks {
        let report = board.step().context("Tick failed")?;
        if args.json {
            let line = TickLine {
                report: &report,
                metrics: SwarmMetrics::measure(&board, tolerance),
            };
            println!("{}", serde_json::to_string(&line)?);
        } else if !report.deaths.is_empty() {
            pb.println(format!(
                "  tick {}: {} died",
                report.tick,
                report.deaths.len().to_string().red()
            ));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.json {
        return Ok(());
    }

    let last = SwarmMetrics::measure(&board, tolerance);
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!(
        "  Polarization: {} → {}",
        format!("{:.3}", initial.polarization).yellow(),
        format!("{:.3}", last.polarization).green()
    );
    println!(
        "  Interaction fiedler: {} → {}",
        fmt_fiedler(initial.interaction.fiedler).yellow(),
        fmt_fiedler(last.interaction.fiedler).green()
    );
    println!(
        "  Components: {} → {}",
        initial.interaction.components.to_string().yellow(),
        last.interaction.components.to_string().green()
    );
    println!(
        "  Connected: {}",
        if last.interaction.connected { "yes".green() } else { "no".red() }
    );
    if config.run.swarm == Swarm::PredPrey {
        println!(
            "  Prey: {} alive, {} dead, {} predators",
            last.prey.to_string().green(),
            last.dead.to_string().red(),
            last.predators
        );
    }

    Ok(())
}
