//! Consensus dynamics — Laplacian-driven attraction and repulsion.
//!
//! Instead of per-agent steering, all positions are integrated at once:
//!
//! ```text
//! x <- x + dt * ((L_rep - L_att) x + noise)
//! ```
//!
//! applied independently to the x and y coordinate vectors. `L_rep` comes
//! from the radius adjacency within the repulsion radius; `L_att` from a
//! radius band or from the k-nearest graph. Both are recomputed at the
//! start of every step.

use crate::board::Board;
use couzin_core::adjacency::AdjacencyMatrix;
use couzin_core::error::{CouzinError, Result};
use couzin_core::spectral::Laplacian;
use couzin_core::types::{AgentIndex, Tick};
use nalgebra::DVector;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How the attraction graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "lowercase")]
pub enum AttractionMetric {
    /// Everyone in `[min, max)`.
    Radius { min: f64, max: f64 },
    /// The k nearest others (directed).
    Nearest { k: usize },
}

impl AttractionMetric {
    fn adjacency(&self, board: &Board) -> AdjacencyMatrix {
        match *self {
            AttractionMetric::Radius { min, max } => board.radius_adjacency(max, min),
            AttractionMetric::Nearest { k } => board.nearest_adjacency(k).adjacency,
        }
    }
}

/// Parameters of the consensus integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Radius of the repulsion graph (default: 1.0).
    pub repulsion_radius: f64,
    /// Integration timestep (default: 0.1).
    pub dt: f64,
    /// Standard deviation of the per-agent, per-axis noise (default: 0.001).
    pub noise_std: f64,
    /// Attraction graph (default: radius band `[1.0, 16.0)`).
    pub attraction: AttractionMetric,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            repulsion_radius: 1.0,
            dt: 0.1,
            noise_std: 0.001,
            attraction: AttractionMetric::Radius { min: 1.0, max: 16.0 },
        }
    }
}

impl ConsensusConfig {
    pub fn validate(&self) -> Result<()> {
        finite_non_negative("repulsion_radius", self.repulsion_radius)?;
        finite_non_negative("noise_std", self.noise_std)?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(CouzinError::invalid_config("dt", self.dt.to_string(), "must be positive"));
        }
        if let AttractionMetric::Radius { min, max } = self.attraction {
            finite_non_negative("attraction.min", min)?;
            finite_non_negative("attraction.max", max)?;
            if max < min {
                return Err(CouzinError::invalid_config(
                    "attraction.max",
                    max.to_string(),
                    "must not be smaller than attraction.min",
                ));
            }
        }
        Ok(())
    }
}

fn finite_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CouzinError::out_of_range(field, 0.0, f64::MAX, value));
    }
    Ok(())
}

/// Neighbour counts of one agent in the current repulsion and attraction graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneOccupancy {
    pub index: AgentIndex,
    pub repulsion: usize,
    pub attraction: usize,
}

/// Scalar summaries of one consensus step, taken from the Laplacians that
/// drove it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsensusReport {
    pub tick: Tick,
    pub repulsion_fiedler: Option<f64>,
    pub attraction_fiedler: Option<f64>,
    /// Fiedler value of `L_rep - L_att`.
    pub combined_fiedler: Option<f64>,
    pub average_connectivity: f64,
}

/// A board integrated by consensus dynamics.
#[derive(Debug, Clone)]
pub struct ConsensusBoard {
    board: Board,
    config: ConsensusConfig,
    noise: Normal<f64>,
    repulsion: Laplacian,
    attraction: Laplacian,
}

impl ConsensusBoard {
    pub fn new(board: Board, config: ConsensusConfig) -> Result<Self> {
        config.validate()?;
        let noise = Normal::new(0.0, config.noise_std).map_err(|e| {
            CouzinError::invalid_config("noise_std", config.noise_std.to_string(), e.to_string())
        })?;
        let repulsion = Laplacian::from_adjacency(&board.radius_adjacency(config.repulsion_radius, 0.0));
        let attraction = Laplacian::from_adjacency(&config.attraction.adjacency(&board));
        Ok(Self {
            board,
            config,
            noise,
            repulsion,
            attraction,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.board.tick()
    }

    pub fn repulsion_laplacian(&self) -> &Laplacian {
        &self.repulsion
    }

    pub fn attraction_laplacian(&self) -> &Laplacian {
        &self.attraction
    }

    /// `L_rep - L_att`.
    pub fn combined_laplacian(&self) -> Result<Laplacian> {
        self.repulsion.difference(&self.attraction)
    }

    /// Recompute both Laplacians from the current positions.
    pub fn refresh(&mut self) {
        self.repulsion =
            Laplacian::from_adjacency(&self.board.radius_adjacency(self.config.repulsion_radius, 0.0));
        self.attraction = Laplacian::from_adjacency(&self.config.attraction.adjacency(&self.board));
    }

    /// Fiedler values of `L_rep` and `L_att`.
    pub fn fiedlers(&self) -> (Option<f64>, Option<f64>) {
        (self.repulsion.fiedler(), self.attraction.fiedler())
    }

    pub fn combined_fiedler(&self) -> Result<Option<f64>> {
        Ok(self.combined_laplacian()?.fiedler())
    }

    /// Mean number of nonzero off-diagonal entries per row of `L_rep - L_att`.
    pub fn average_connectivity(&self) -> Result<f64> {
        let combined = self.combined_laplacian()?;
        let n = combined.n();
        if n == 0 {
            return Ok(0.0);
        }
        Ok(combined.off_diagonal_nonzeros() as f64 / n as f64)
    }

    pub fn state_vectors(&self) -> (Vec<f64>, Vec<f64>) {
        self.board.state_vectors()
    }

    /// Move agents; the Laplacians follow on the next [`refresh`](Self::refresh) or step.
    pub fn set_positions(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        self.board.set_positions(x, y)
    }

    /// Neighbour counts per agent in the current Laplacians.
    pub fn zone_occupancy(&self) -> Vec<ZoneOccupancy> {
        (0..self.repulsion.n())
            .map(|i| ZoneOccupancy {
                index: i,
                repulsion: off_diagonal_in_row(&self.repulsion, i),
                attraction: off_diagonal_in_row(&self.attraction, i),
            })
            .collect()
    }

    /// Integrate one timestep.
    #[instrument(skip(self), fields(tick = self.board.tick()))]
    pub fn step(&mut self) -> Result<ConsensusReport> {
        self.refresh();
        let combined = self.combined_laplacian()?;

        let (x, y) = self.board.state_vectors();
        let x = DVector::from_vec(x);
        let y = DVector::from_vec(y);
        let drift_x = combined.apply(&x)?;
        let drift_y = combined.apply(&y)?;

        let n = self.board.n();
        let rng = self.board.rng_mut();
        let mut noise_x = DVector::zeros(n);
        let mut noise_y = DVector::zeros(n);
        for i in 0..n {
            noise_x[i] = self.noise.sample(rng);
            noise_y[i] = self.noise.sample(rng);
        }

        let dt = self.config.dt;
        let next_x = &x + (drift_x + noise_x) * dt;
        let next_y = &y + (drift_y + noise_y) * dt;
        self.board.set_positions(next_x.as_slice(), next_y.as_slice())?;

        let report = ConsensusReport {
            tick: self.board.tick(),
            repulsion_fiedler: self.repulsion.fiedler(),
            attraction_fiedler: self.attraction.fiedler(),
            combined_fiedler: combined.fiedler(),
            average_connectivity: self.average_connectivity()?,
        };
        debug!(
            combined_fiedler = ?report.combined_fiedler,
            average_connectivity = report.average_connectivity,
            "consensus step"
        );
        self.board.advance_tick();
        Ok(report)
    }

    /// Step `ticks` times, stopping at the first failure.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<ConsensusReport>> {
        (0..ticks).map(|_| self.step()).collect()
    }
}

fn off_diagonal_in_row(laplacian: &Laplacian, i: usize) -> usize {
    (0..laplacian.n())
        .filter(|&j| j != i && laplacian.get(i, j) != 0.0)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ConsensusConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let config = ConsensusConfig {
            dt: 0.0,
            ..ConsensusConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_attraction_band_is_rejected() {
        let config = ConsensusConfig {
            attraction: AttractionMetric::Radius { min: 5.0, max: 2.0 },
            ..ConsensusConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn attraction_metric_uses_a_tag() {
        let toml_like = serde_json::to_string(&AttractionMetric::Nearest { k: 4 }).unwrap();
        assert_eq!(toml_like, r#"{"metric":"nearest","k":4}"#);
    }
}
