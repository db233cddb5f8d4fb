//! Couzin Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use couzin_core::prelude::*;
//! ```

pub use crate::types::{AgentIndex, AgentSnapshot, BoardSnapshot, Kind, Tick};

pub use crate::vector::{angle_between, wrap_angle, Vector2D};

pub use crate::adjacency::{AdjacencyMatrix, NearestNeighbors};

pub use crate::spectral::{ConnectivityMetrics, Laplacian, DEFAULT_TOLERANCE};

pub use crate::error::{
    AgentError, ConfigError, ConstructionError, CouzinError, GraphError, Result,
};
