//! Board — the spatial domain and the zone-steering tick loop.
//!
//! The board owns an index-stable sequence of agents placed initially in
//! `[-m, m]²` (not enforced afterwards; agents may leave the box).
//!
//! Each tick:
//! 1. Snapshot every agent and build the zone adjacencies from it
//! 2. Every agent plans its motion from the snapshot
//! 3. All motions are committed
//! 4. Replacements (prey -> dead) are applied in place
//! 5. The tick counter advances

use crate::metrics::{TickReport, ZoneSummary};
use couzin_agents::agent::Agent;
use couzin_agents::params::SteeringConfig;
use couzin_agents::zones::{Neighborhood, ZoneAdjacency};
use couzin_core::adjacency::{AdjacencyMatrix, NearestNeighbors};
use couzin_core::error::{AgentError, ConstructionError, CouzinError, GraphError, Result};
use couzin_core::spectral::{ConnectivityMetrics, Laplacian};
use couzin_core::types::{AgentIndex, AgentSnapshot, BoardSnapshot, Kind, Tick};
use couzin_core::vector::Vector2D;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info, instrument, warn};

/// Size of the domain and the seed of its random source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of agents `n`, fixed for the board's lifetime (default: 50).
    pub agent_count: usize,
    /// Initial positions are drawn from `[-m, m]²` (default: 10.0).
    pub half_extent: f64,
    /// Seed of the board's ChaCha8 generator (default: 0).
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            agent_count: 50,
            half_extent: 10.0,
            seed: 0,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.agent_count == 0 {
            return Err(ConstructionError::EmptyBoard.into());
        }
        if !self.half_extent.is_finite() || self.half_extent < 0.0 {
            return Err(CouzinError::out_of_range("half_extent", 0.0, f64::MAX, self.half_extent));
        }
        Ok(())
    }
}

/// The spatial domain.
#[derive(Debug, Clone)]
pub struct Board {
    n: usize,
    half_extent: f64,
    agents: Vec<Agent>,
    steering: SteeringConfig,
    rng: ChaCha8Rng,
    tick: Tick,
    total_died: usize,
}

impl Board {
    /// Build a board of `config.agent_count` agents produced by `factory`.
    ///
    /// The factory receives the (still empty) board so it can draw random
    /// points and orientations. It must return exactly `n` agents; indices
    /// are assigned here, in order.
    pub fn new<F>(config: &BoardConfig, steering: SteeringConfig, rng: ChaCha8Rng, factory: F) -> Result<Self>
    where
        F: FnOnce(&mut Board) -> Vec<Agent>,
    {
        config.validate()?;
        steering.validate()?;
        let mut board = Self {
            n: config.agent_count,
            half_extent: config.half_extent,
            agents: Vec::new(),
            steering,
            rng,
            tick: 0,
            total_died: 0,
        };
        let mut agents = factory(&mut board);
        if agents.len() != board.n {
            return Err(CouzinError::count_mismatch(board.n, agents.len()));
        }
        for (i, agent) in agents.iter_mut().enumerate() {
            agent.assign_index(i);
        }
        board.agents = agents;
        if let Some(clamped) = board.nearest_k_clamp() {
            warn!(k = board.steering.k, n = board.n, clamped, "k exceeds n - 1, clamping");
        }
        debug!(n = board.n, m = board.half_extent, "board constructed");
        Ok(board)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn steering(&self) -> &SteeringConfig {
        &self.steering
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: AgentIndex) -> Result<&Agent> {
        self.agents
            .get(index)
            .ok_or_else(|| AgentError::IndexOutOfRange { index, n: self.n }.into())
    }

    /// Number of agents of the given kind.
    pub fn count(&self, kind: Kind) -> usize {
        self.agents.iter().filter(|a| a.kind() == kind).count()
    }

    /// Deaths since construction.
    pub fn total_died(&self) -> usize {
        self.total_died
    }

    /// A point drawn uniformly from `[-m, m]²`.
    pub fn random_point(&mut self) -> Vector2D {
        let m = self.half_extent;
        Vector2D::new(self.rng.gen_range(-m..=m), self.rng.gen_range(-m..=m))
    }

    /// A unit vector with uniformly random heading.
    pub fn random_orientation(&mut self) -> Vector2D {
        Vector2D::from_angle(self.rng.gen_range(-PI..PI))
    }

    pub fn positions(&self) -> Vec<Vector2D> {
        self.agents.iter().map(Agent::position).collect()
    }

    /// Coordinate vectors `(x, y)` of every agent, in index order.
    pub fn state_vectors(&self) -> (Vec<f64>, Vec<f64>) {
        self.agents.iter().map(|a| (a.position().x, a.position().y)).unzip()
    }

    /// Overwrite every agent position from coordinate vectors.
    pub fn set_positions(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        for len in [x.len(), y.len()] {
            if len != self.n {
                return Err(GraphError::StateLength {
                    expected: self.n,
                    found: len,
                }
                .into());
            }
        }
        for (agent, (&px, &py)) in self.agents.iter_mut().zip(x.iter().zip(y)) {
            agent.set_position(Vector2D::new(px, py));
        }
        Ok(())
    }

    /// Symmetric adjacency over the band `[min_radius, max_radius)`.
    pub fn radius_adjacency(&self, max_radius: f64, min_radius: f64) -> AdjacencyMatrix {
        AdjacencyMatrix::from_radius(&self.positions(), max_radius, min_radius)
    }

    /// Directed k-nearest adjacency plus each agent's neighbour set.
    pub fn nearest_adjacency(&self, k: usize) -> NearestNeighbors {
        self.warn_if_clamped(k);
        NearestNeighbors::from_positions(&self.positions(), k)
    }

    /// `L = D - A` with in-degree on the diagonal.
    pub fn laplacian(adjacency: &AdjacencyMatrix) -> Laplacian {
        Laplacian::from_adjacency(adjacency)
    }

    pub fn is_connected(laplacian: &Laplacian, tolerance: f64) -> bool {
        laplacian.is_connected(tolerance)
    }

    /// Spectral and combinatorial summary of an adjacency.
    pub fn connectivity(adjacency: &AdjacencyMatrix, tolerance: f64) -> ConnectivityMetrics {
        ConnectivityMetrics::measure(adjacency, tolerance)
    }

    /// The four matrices one steering tick consumes, from current positions.
    pub fn zone_adjacency(&self) -> ZoneAdjacency {
        ZoneAdjacency::from_positions(&self.positions(), &self.steering)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tick: self.tick,
            agents: self.agents.iter().map(Agent::snapshot).collect(),
        }
    }

    /// Advance the swarm by one tick.
    ///
    /// Every agent plans from the same pre-tick snapshot; no agent observes
    /// another's update. Deaths take effect after all motions are committed.
    /// Fails without moving any agent if any agent cannot plan; the random
    /// source may still have advanced.
    #[instrument(skip(self), fields(tick = self.tick))]
    pub fn step(&mut self) -> Result<TickReport> {
        let snapshot: Vec<AgentSnapshot> = self.agents.iter().map(Agent::snapshot).collect();
        let zones = self.zone_adjacency();
        let ctx = Neighborhood::new(&snapshot, &zones, &self.steering)?;

        let mut plans = Vec::with_capacity(self.n);
        for agent in &self.agents {
            plans.push(agent.plan(&ctx, &mut self.rng)?);
        }

        let mut replacements = Vec::new();
        for plan in plans {
            self.agents[plan.index].apply(&plan.motion);
            if let Some(replacement) = plan.replace_with {
                replacements.push((plan.index, replacement));
            }
        }

        let mut deaths = Vec::new();
        for (index, mut replacement) in replacements {
            replacement.assign_index(index);
            let was = self.agents[index].kind();
            if replacement.kind() == Kind::Dead {
                info!(index, tick = self.tick, from = %was, "agent died");
                deaths.push(index);
            }
            self.agents[index] = replacement;
        }
        self.total_died += deaths.len();

        let summary = ZoneSummary::from_zones(&zones);
        debug!(
            repulsion = summary.repulsion_edges,
            orientation = summary.orientation_edges,
            attraction = summary.attraction_edges,
            deaths = deaths.len(),
            "tick complete"
        );

        let report = TickReport {
            tick: self.tick,
            deaths,
            zones: summary,
        };
        self.tick += 1;
        Ok(report)
    }

    /// Step `ticks` times, stopping at the first failure.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<TickReport>> {
        (0..ticks).map(|_| self.step()).collect()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    fn warn_if_clamped(&self, k: usize) {
        let limit = self.n.saturating_sub(1);
        if k > limit {
            warn!(k, n = self.n, clamped = limit, "k exceeds n - 1, clamping");
        }
    }

    /// The clamped k when nearest agents are present and `steering.k`
    /// exceeds `n - 1`.
    fn nearest_k_clamp(&self) -> Option<usize> {
        let limit = self.n.saturating_sub(1);
        let uses_nearest = self.agents.iter().any(|a| a.kind() == Kind::Nearest);
        (uses_nearest && self.steering.k > limit).then_some(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generic_board(n: usize, m: f64, seed: u64) -> Board {
        let config = BoardConfig {
            agent_count: n,
            half_extent: m,
            seed,
        };
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Board::new(&config, SteeringConfig::default(), rng, |b| {
            (0..b.n()).map(|_| Agent::generic(b.random_point())).collect()
        })
        .unwrap()
    }

    #[test]
    fn indices_follow_factory_order() {
        let board = generic_board(6, 4.0, 3);
        for (i, agent) in board.agents().iter().enumerate() {
            assert_eq!(agent.index(), i);
        }
    }

    #[test]
    fn state_vectors_round_trip_through_set_positions() {
        let mut board = generic_board(4, 4.0, 9);
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![-1.0, -2.0, -3.0, -4.0];
        board.set_positions(&x, &y).unwrap();
        assert_eq!(board.state_vectors(), (x, y));
    }

    #[test]
    fn set_positions_rejects_wrong_length() {
        let mut board = generic_board(4, 4.0, 9);
        let err = board.set_positions(&[0.0; 3], &[0.0; 4]).unwrap_err();
        assert_eq!(
            err,
            CouzinError::Graph(GraphError::StateLength { expected: 4, found: 3 })
        );
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let board = generic_board(2, 1.0, 0);
        assert!(board.agent(1).is_ok());
        assert!(matches!(
            board.agent(2),
            Err(CouzinError::Agent(AgentError::IndexOutOfRange { index: 2, n: 2 }))
        ));
    }

    fn small_board(n: usize, make: fn(Vector2D, Vector2D) -> Agent) -> Board {
        let config = BoardConfig {
            agent_count: n,
            ..BoardConfig::default()
        };
        let rng = ChaCha8Rng::seed_from_u64(5);
        Board::new(&config, SteeringConfig::default(), rng, |b| {
            (0..b.n())
                .map(|_| {
                    let p = b.random_point();
                    let o = b.random_orientation();
                    make(p, o)
                })
                .collect()
        })
        .unwrap()
    }

    #[test]
    fn k_clamp_only_applies_to_nearest_swarms() {
        assert!(SteeringConfig::default().k > 2);
        assert_eq!(small_board(3, Agent::topological).nearest_k_clamp(), None);
        assert_eq!(small_board(3, Agent::prey).nearest_k_clamp(), None);
        assert_eq!(small_board(3, Agent::nearest).nearest_k_clamp(), Some(2));
        assert_eq!(small_board(20, Agent::nearest).nearest_k_clamp(), None);
    }

    #[test]
    fn empty_board_is_rejected() {
        let config = BoardConfig {
            agent_count: 0,
            ..BoardConfig::default()
        };
        let rng = ChaCha8Rng::seed_from_u64(0);
        let err = Board::new(&config, SteeringConfig::default(), rng, |_| Vec::new()).unwrap_err();
        assert_eq!(err, CouzinError::Construction(ConstructionError::EmptyBoard));
    }
}
