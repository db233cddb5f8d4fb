//! Zones — repulsion, orientation and attraction membership.
//!
//! An agent is in a zone with respect to another iff the corresponding
//! adjacency entry for the ordered pair (self, other) is 1. All lookups
//! read the pre-tick snapshot carried by [`Neighborhood`].

use crate::params::SteeringConfig;
use couzin_core::adjacency::{AdjacencyMatrix, NearestNeighbors};
use couzin_core::error::{CouzinError, Result};
use couzin_core::types::{AgentIndex, AgentSnapshot};
use couzin_core::vector::Vector2D;
use rand_distr::Normal;
use serde::Serialize;

/// The adjacency matrices one tick of zone steering consumes.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneAdjacency {
    /// `radius(rr)`
    pub repulsion: AdjacencyMatrix,
    /// `radius(ro, rr)`
    pub orientation: AdjacencyMatrix,
    /// `radius(ra, ro)`
    pub attraction: AdjacencyMatrix,
    /// `nearest(k)`
    pub nearest: NearestNeighbors,
}

impl ZoneAdjacency {
    /// Build all four matrices for one tick.
    pub fn from_positions(positions: &[Vector2D], config: &SteeringConfig) -> Self {
        let rr = config.repulsion_radius;
        let ro = config.orientation_radius;
        let ra = config.attraction_radius;
        Self {
            repulsion: AdjacencyMatrix::from_radius(positions, rr, 0.0),
            orientation: AdjacencyMatrix::from_radius(positions, ro, rr),
            attraction: AdjacencyMatrix::from_radius(positions, ra, ro),
            nearest: NearestNeighbors::from_positions(positions, config.k),
        }
    }

    pub fn n(&self) -> usize {
        self.repulsion.n()
    }

    /// Union of the three metric zones: everything within `ra`.
    pub fn interaction(&self) -> AdjacencyMatrix {
        let n = self.n();
        let mut union = AdjacencyMatrix::zeros(n, true);
        for i in 0..n {
            for m in [&self.repulsion, &self.orientation, &self.attraction] {
                for j in m.neighbors(i) {
                    union.set(i, j);
                }
            }
        }
        union
    }
}

/// Read-only context handed to every agent while it plans a tick.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a> {
    pub snapshot: &'a [AgentSnapshot],
    pub zones: &'a ZoneAdjacency,
    pub config: &'a SteeringConfig,
    pub(crate) heading_noise: Normal<f64>,
}

impl<'a> Neighborhood<'a> {
    pub fn new(
        snapshot: &'a [AgentSnapshot],
        zones: &'a ZoneAdjacency,
        config: &'a SteeringConfig,
    ) -> Result<Self> {
        if snapshot.len() != zones.n() {
            return Err(CouzinError::dimension_mismatch(snapshot.len(), zones.n()));
        }
        let heading_noise = Normal::new(0.0, config.heading_noise).map_err(|e| {
            CouzinError::invalid_config("heading_noise", config.heading_noise.to_string(), e.to_string())
        })?;
        Ok(Self {
            snapshot,
            zones,
            config,
            heading_noise,
        })
    }

    pub fn agent(&self, index: AgentIndex) -> &AgentSnapshot {
        &self.snapshot[index]
    }

    /// Everyone except `index`.
    pub fn others(&self, index: AgentIndex) -> impl Iterator<Item = &AgentSnapshot> {
        self.snapshot.iter().filter(move |a| a.index != index)
    }
}

/// Neighbours of one agent sorted into the three zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zones {
    pub repulsion: Vec<AgentIndex>,
    pub orientation: Vec<AgentIndex>,
    pub attraction: Vec<AgentIndex>,
}

impl Zones {
    /// Metric zones of `index`, keeping only neighbours accepted by `admit`.
    pub fn metric<F>(ctx: &Neighborhood<'_>, index: AgentIndex, admit: F) -> Self
    where
        F: Fn(&AgentSnapshot) -> bool,
    {
        let pick = |m: &AdjacencyMatrix| -> Vec<AgentIndex> {
            m.neighbors(index)
                .into_iter()
                .filter(|&j| admit(ctx.agent(j)))
                .collect()
        };
        Self {
            repulsion: pick(&ctx.zones.repulsion),
            orientation: pick(&ctx.zones.orientation),
            attraction: pick(&ctx.zones.attraction),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repulsion.is_empty() && self.orientation.is_empty() && self.attraction.is_empty()
    }

    /// Desired direction for the agent at `me`.
    ///
    /// Repulsion dominates: with any repulsion neighbour the result is the
    /// negated, normalized sum of bearings to them. Otherwise the
    /// normalized orientation and attraction resultants are averaged.
    /// Returns the zero vector when every zone is empty.
    pub fn direction(&self, me: &AgentSnapshot, snapshot: &[AgentSnapshot]) -> Vector2D {
        if !self.repulsion.is_empty() {
            let mut d_r = Vector2D::ZERO;
            for &j in &self.repulsion {
                d_r -= me.position.direction_to(&snapshot[j].position);
            }
            return d_r.normalize();
        }

        let mut d_o = Vector2D::ZERO;
        for &j in &self.orientation {
            d_o += snapshot[j].orientation.normalize();
        }
        let mut d_a = Vector2D::ZERO;
        for &j in &self.attraction {
            d_a += me.position.direction_to(&snapshot[j].position);
        }
        (d_o.normalize() * 0.5 + d_a.normalize() * 0.5).normalize()
    }
}
