//! Ready-made agent factories.
//!
//! Each population places its agents at random points of the board with
//! random headings.

use crate::board::Board;
use couzin_agents::agent::Agent;
use serde::{Deserialize, Serialize};

/// Composition of a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Population {
    /// Position-only agents, for consensus runs and graph probes.
    Generic,
    Topological,
    Nearest,
    /// `ceil(fraction * n)` predators first, prey after.
    PredPrey { predator_fraction: f64 },
}

impl Population {
    /// The predator/prey mix of the reference experiments (4% predators).
    pub fn pred_prey() -> Self {
        Population::PredPrey {
            predator_fraction: 0.04,
        }
    }

    /// Produce exactly `board.n()` agents.
    pub fn spawn(&self, board: &mut Board) -> Vec<Agent> {
        let n = board.n();
        let predators = match *self {
            Population::PredPrey { predator_fraction } => {
                ((predator_fraction.clamp(0.0, 1.0) * n as f64).ceil() as usize).min(n)
            }
            _ => 0,
        };
        (0..n)
            .map(|i| {
                let p = board.random_point();
                let o = board.random_orientation();
                match self {
                    Population::Generic => Agent::generic(p),
                    Population::Topological => Agent::topological(p, o),
                    Population::Nearest => Agent::nearest(p, o),
                    Population::PredPrey { .. } if i < predators => Agent::predator(p, o),
                    Population::PredPrey { .. } => Agent::prey(p, o),
                }
            })
            .collect()
    }
}
