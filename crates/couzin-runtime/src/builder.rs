//! Board builder.
//!
//! Collects the domain size, steering geometry and random source before
//! handing them to [`Board::new`] together with an agent factory.
//!
//! # Example
//!
//! ```rust
//! use couzin_runtime::builder::BoardBuilder;
//! use couzin_runtime::populate::Population;
//!
//! let mut board = BoardBuilder::new()
//!     .agent_count(20)
//!     .half_extent(5.0)
//!     .seed(7)
//!     .build(|b| Population::Topological.spawn(b))
//!     .unwrap();
//!
//! board.run(10).unwrap();
//! assert_eq!(board.tick(), 10);
//! ```

use crate::board::{Board, BoardConfig};
use crate::consensus::{ConsensusBoard, ConsensusConfig};
use couzin_agents::agent::Agent;
use couzin_agents::params::SteeringConfig;
use couzin_core::error::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Builder for [`Board`] and [`ConsensusBoard`].
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    config: BoardConfig,
    steering: SteeringConfig,
    rng: Option<ChaCha8Rng>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace size and seed at once.
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn agent_count(mut self, n: usize) -> Self {
        self.config.agent_count = n;
        self
    }

    pub fn half_extent(mut self, m: f64) -> Self {
        self.config.half_extent = m;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_steering(mut self, steering: SteeringConfig) -> Self {
        self.steering = steering;
        self
    }

    /// Use this generator instead of one seeded from the config.
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build a steering board.
    pub fn build<F>(self, factory: F) -> Result<Board>
    where
        F: FnOnce(&mut Board) -> Vec<Agent>,
    {
        let rng = self
            .rng
            .unwrap_or_else(|| ChaCha8Rng::seed_from_u64(self.config.seed));
        Board::new(&self.config, self.steering, rng, factory)
    }

    /// Build a board integrated by consensus dynamics.
    pub fn build_consensus<F>(self, consensus: ConsensusConfig, factory: F) -> Result<ConsensusBoard>
    where
        F: FnOnce(&mut Board) -> Vec<Agent>,
    {
        ConsensusBoard::new(self.build(factory)?, consensus)
    }
}
