//! Per-tick reports and summary metrics for external loggers.
//!
//! Everything here is `Serialize` so that renderers and time-series
//! loggers outside the core can consume it as JSON.

use crate::board::Board;
use couzin_agents::zones::ZoneAdjacency;
use couzin_core::spectral::ConnectivityMetrics;
use couzin_core::types::{AgentIndex, Kind, Tick};
use couzin_core::vector::Vector2D;
use serde::Serialize;

/// Edge counts of the zone adjacencies used in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub repulsion_edges: usize,
    pub orientation_edges: usize,
    pub attraction_edges: usize,
    /// Directed edges of the k-nearest graph.
    pub nearest_edges: usize,
}

impl ZoneSummary {
    pub fn from_zones(zones: &ZoneAdjacency) -> Self {
        Self {
            repulsion_edges: zones.repulsion.edge_count(),
            orientation_edges: zones.orientation.edge_count(),
            attraction_edges: zones.attraction.edge_count(),
            nearest_edges: zones.nearest.adjacency.edge_count(),
        }
    }
}

/// Outcome of one [`Board::step`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    /// Indices that transitioned to dead during this tick.
    pub deaths: Vec<AgentIndex>,
    pub zones: ZoneSummary,
}

/// Swarm-level state of a board at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SwarmMetrics {
    pub tick: Tick,
    pub prey: usize,
    pub predators: usize,
    pub dead: usize,
    /// Length of the mean heading of all moving agents, in `[0, 1]`.
    pub polarization: f64,
    /// Connectivity of everyone within the attraction radius.
    pub interaction: ConnectivityMetrics,
    /// Connectivity of the k-nearest graph.
    pub nearest: ConnectivityMetrics,
}

impl SwarmMetrics {
    /// Measure the board's current positions.
    pub fn measure(board: &Board, tolerance: f64) -> Self {
        let zones = board.zone_adjacency();
        Self {
            tick: board.tick(),
            prey: board.count(Kind::Prey),
            predators: board.count(Kind::Predator),
            dead: board.count(Kind::Dead),
            polarization: polarization(board),
            interaction: ConnectivityMetrics::measure(&zones.interaction(), tolerance),
            nearest: ConnectivityMetrics::measure(&zones.nearest.adjacency, tolerance),
        }
    }
}

/// Length of the mean unit heading over agents with non-zero speed.
pub fn polarization(board: &Board) -> f64 {
    let moving: Vec<Vector2D> = board
        .agents()
        .iter()
        .filter(|a| a.speed() > 0.0)
        .map(|a| a.orientation())
        .collect();
    if moving.is_empty() {
        return 0.0;
    }
    let mut sum = Vector2D::ZERO;
    for o in &moving {
        sum += *o;
    }
    sum.length() / moving.len() as f64
}
