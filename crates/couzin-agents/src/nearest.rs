//! Nearest-neighbour zones.
//!
//! Topological variant of the zone model: only the agent's k nearest
//! neighbours are considered, split by distance into repulsion
//! (`d < rr`), orientation (`d < ro`) and attraction (everything else).

use crate::zones::{Neighborhood, Zones};
use couzin_core::types::AgentIndex;
use tracing::trace;

/// Zones of `index` drawn from its k-nearest set.
pub fn zones(ctx: &Neighborhood<'_>, index: AgentIndex) -> Zones {
    let me = ctx.agent(index);
    let mut zones = Zones::default();
    for &j in ctx.zones.nearest.neighbors_of(index) {
        let d = me.position.distance_to(&ctx.agent(j).position);
        if d < ctx.config.repulsion_radius {
            zones.repulsion.push(j);
        } else if d < ctx.config.orientation_radius {
            zones.orientation.push(j);
        } else {
            zones.attraction.push(j);
        }
    }
    trace!(
        index,
        repulsion = zones.repulsion.len(),
        orientation = zones.orientation.len(),
        attraction = zones.attraction.len(),
        "nearest zones"
    );
    zones
}
