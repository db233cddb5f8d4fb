//! # Couzin Agents
//!
//! Steering rules for swarm members. Every agent plans its tick from the
//! same pre-tick snapshot; the board commits all plans together.
//!
//! - **Topological** — metric Couzin zones: repulsion within `rr`,
//!   orientation in `[rr, ro)`, attraction in `[ro, ra)`
//! - **Nearest** — the same rule over the k nearest neighbours
//! - **Predator** — chases the nearest prey, desists from stragglers
//! - **Prey** — zone steering among prey, flees predators, dies on contact
//! - **Dead** — inert, replaces a killed prey at the same index
//!
//! Steering is bounded: an agent turns at most `thetamax` radians per tick
//! after a Gaussian heading perturbation.

pub mod params;
pub mod zones;
pub mod steering;
pub mod agent;
pub mod nearest;
pub mod predprey;
pub mod prelude;
