//! Couzin Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use couzin_runtime::prelude::*;
//! ```

// Re-export board
pub use crate::board::{Board, BoardConfig};

// Re-export builder
pub use crate::builder::BoardBuilder;

// Re-export consensus dynamics
pub use crate::consensus::{
    AttractionMetric, ConsensusBoard, ConsensusConfig, ConsensusReport, ZoneOccupancy,
};

// Re-export metrics
pub use crate::metrics::{polarization, SwarmMetrics, TickReport, ZoneSummary};

// Re-export factories
pub use crate::populate::Population;

// Re-export from agents
pub use couzin_agents::prelude::*;
