//! Configuration management for the couzin CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use couzin::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the current and parent directories.
pub const CONFIG_FILE: &str = "couzin.toml";

/// Project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
}

/// Which swarm `couzin run` simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Swarm {
    Topological,
    Nearest,
    #[value(name = "predprey")]
    PredPrey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default = "default_swarm")]
    pub swarm: Swarm,
    #[serde(default = "default_predator_fraction")]
    pub predator_fraction: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

// Default value functions
fn default_ticks() -> u64 { 100 }
fn default_swarm() -> Swarm { Swarm::Topological }
fn default_predator_fraction() -> f64 { 0.04 }
fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            swarm: default_swarm(),
            predator_fraction: default_predator_fraction(),
            tolerance: default_tolerance(),
        }
    }
}

impl RunConfig {
    pub fn population(&self) -> Population {
        match self.swarm {
            Swarm::Topological => Population::Topological,
            Swarm::Nearest => Population::Nearest,
            Swarm::PredPrey => Population::PredPrey {
                predator_fraction: self.predator_fraction,
            },
        }
    }
}

impl Config {
    /// Load config from couzin.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Check every section before anything is built.
    pub fn validate(&self) -> Result<()> {
        self.board.validate().context("Invalid [board] section")?;
        self.steering.validate().context("Invalid [steering] section")?;
        self.consensus.validate().context("Invalid [consensus] section")?;
        if !(0.0..=1.0).contains(&self.run.predator_fraction) {
            anyhow::bail!(
                "Invalid [run] section: predator_fraction must be within [0, 1], got {}",
                self.run.predator_fraction
            );
        }
        Ok(())
    }
}

/// Find couzin.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.board, BoardConfig::default());
        assert_eq!(loaded.steering, SteeringConfig::default());
        assert_eq!(loaded.consensus, ConsensusConfig::default());
        assert_eq!(loaded.run.swarm, Swarm::Topological);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[run]\nswarm = \"predprey\"\n\n[board]\nagent_count = 12\n\n\
             [consensus.attraction]\nmetric = \"nearest\"\nk = 3\n"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.run.swarm, Swarm::PredPrey);
        assert_eq!(config.run.ticks, 100);
        assert_eq!(config.board.agent_count, 12);
        assert_eq!(config.board.half_extent, 10.0);
        assert_eq!(config.consensus.attraction, AttractionMetric::Nearest { k: 3 });
        assert_eq!(config.consensus.dt, 0.1);
        assert_eq!(
            config.run.population(),
            Population::PredPrey { predator_fraction: 0.04 }
        );
    }

    #[test]
    fn nested_zone_radii_are_enforced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[steering]\nrepulsion_radius = 5.0\norientation_radius = 2.0\n").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[board\nagent_count = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
