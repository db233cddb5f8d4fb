//! # Couzin
//!
//! Collective motion on a 2D board following Couzin's zone model, and
//! spectral analysis of the interaction network it induces.
//!
//! ## Quick Start
//!
//! ```rust
//! use couzin::prelude::*;
//!
//! // A swarm of 30 zone-steering agents in [-5, 5]²
//! let mut board = BoardBuilder::new()
//!     .agent_count(30)
//!     .half_extent(5.0)
//!     .seed(42)
//!     .build(|b| Population::Topological.spawn(b))
//!     .unwrap();
//!
//! // Run the simulation
//! board.run(20).unwrap();
//!
//! // Is everyone within attraction range of the group?
//! let metrics = SwarmMetrics::measure(&board, DEFAULT_TOLERANCE);
//! println!("fiedler = {:?}, connected = {}", metrics.interaction.fiedler, metrics.interaction.connected);
//! ```
//!
//! ## Architecture
//!
//! - [`couzin_core`] - vectors, adjacency matrices, Laplacians, errors
//! - [`couzin_agents`] - zone steering, nearest-neighbour and predator/prey agents
//! - [`couzin_runtime`] - the board, its tick loop and consensus dynamics
//!
//! ## Zones
//!
//! | Zone | Band | Effect |
//! |------|------|--------|
//! | Repulsion | `[0, rr)` | steer away; overrides everything else |
//! | Orientation | `[rr, ro)` | align with neighbours' headings |
//! | Attraction | `[ro, ra)` | steer towards neighbours |
//!
//! Headings change by at most `thetamax` radians per tick.
//!
//! ## Consensus Dynamics
//!
//! ```rust
//! use couzin::prelude::*;
//!
//! let mut board = BoardBuilder::new()
//!     .agent_count(10)
//!     .build_consensus(ConsensusConfig::default(), |b| Population::Generic.spawn(b))
//!     .unwrap();
//!
//! let report = board.step().unwrap();
//! println!("average connectivity {}", report.average_connectivity);
//! ```

// Re-export all subcrates
pub use couzin_core as core;
pub use couzin_agents as agents;
pub use couzin_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use couzin::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use couzin_core::types::{AgentIndex, AgentSnapshot, BoardSnapshot, Kind, Tick};
    pub use couzin_core::vector::{angle_between, wrap_angle, Vector2D};

    // Graphs
    pub use couzin_core::adjacency::{AdjacencyMatrix, NearestNeighbors};
    pub use couzin_core::spectral::{ConnectivityMetrics, Laplacian, DEFAULT_TOLERANCE};

    // Error types
    pub use couzin_core::error::{CouzinError, Result};

    // Agents
    pub use couzin_agents::agent::{Agent, Behavior, StepPlan};
    pub use couzin_agents::params::{PredatorParams, PreyParams, SteeringConfig, SteeringParams};
    pub use couzin_agents::zones::ZoneAdjacency;

    // Runtime
    pub use couzin_runtime::board::{Board, BoardConfig};
    pub use couzin_runtime::builder::BoardBuilder;
    pub use couzin_runtime::consensus::{
        AttractionMetric, ConsensusBoard, ConsensusConfig, ConsensusReport,
    };
    pub use couzin_runtime::metrics::{SwarmMetrics, TickReport};
    pub use couzin_runtime::populate::Population;
}
