//! Couzin Agents Prelude — convenient imports for common usage.
//!
//! ```rust
//! use couzin_agents::prelude::*;
//! ```

// Agent types
pub use crate::agent::{Agent, Behavior, StepPlan};
pub use crate::params::{PredatorParams, PreyParams, SteeringConfig, SteeringParams};
pub use crate::steering::{clamp_turn, Motion};
pub use crate::zones::{Neighborhood, ZoneAdjacency, Zones};

// Re-export from core
pub use couzin_core::prelude::*;
