//! # Couzin Core
//!
//! Geometry and graph primitives shared by every couzin crate:
//!
//! - **Vector2D** — 2D vector arithmetic and heading utilities
//! - **AdjacencyMatrix** — metric (radius band) and topological (k nearest)
//!   interaction graphs built from agent positions
//! - **Laplacian** — `D - A` with in-degree, eigenvalues, Fiedler value and
//!   the connectivity test
//! - **CouzinError** — the error taxonomy for construction, agents,
//!   graphs and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use couzin_core::prelude::*;
//!
//! let points = [Vector2D::new(0.0, 0.0), Vector2D::new(3.0, 0.0)];
//! let a = AdjacencyMatrix::from_radius(&points, 5.0, 0.0);
//! let l = Laplacian::from_adjacency(&a);
//! assert!(l.is_connected(DEFAULT_TOLERANCE));
//! ```

pub mod vector;
pub mod types;
pub mod adjacency;
pub mod spectral;
pub mod error;
pub mod prelude;
