//! Shared types used across the couzin crates.

use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of an agent in its board's agent sequence.
pub type AgentIndex = usize;

/// The current tick of the simulation.
pub type Tick = u64;

/// The closed set of agent kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Position-only agent with no steering rule.
    Generic,
    /// Metric zone-steering agent.
    Topological,
    /// Zone-steering agent restricted to its k nearest neighbours.
    Nearest,
    Predator,
    Prey,
    /// A former prey; inert and index-stable.
    Dead,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Generic => "generic",
            Kind::Topological => "topological",
            Kind::Nearest => "nearest",
            Kind::Predator => "predator",
            Kind::Prey => "prey",
            Kind::Dead => "dead",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable per-tick view of one agent.
///
/// All zone and neighbour queries of a tick read from a slice of these,
/// captured before any agent moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub index: AgentIndex,
    pub kind: Kind,
    pub position: Vector2D,
    pub orientation: Vector2D,
    pub speed: f64,
}

/// A serializable view of every agent at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub tick: Tick,
    pub agents: Vec<AgentSnapshot>,
}

impl BoardSnapshot {
    /// Number of agents of the given kind.
    pub fn count(&self, kind: Kind) -> usize {
        self.agents.iter().filter(|a| a.kind == kind).count()
    }
}
