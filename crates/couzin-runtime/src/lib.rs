//! # Couzin Runtime
//!
//! Board management and the two dynamical models.
//!
//! The board is the spatial domain: it owns an index-stable agent
//! sequence, builds the interaction graphs from agent positions and runs
//! the tick loop. Zone steering advances every agent from a shared
//! pre-tick snapshot; consensus dynamics integrates all positions at once
//! through graph Laplacians.

pub mod board;
pub mod builder;
pub mod consensus;
pub mod metrics;
pub mod populate;
pub mod prelude;
