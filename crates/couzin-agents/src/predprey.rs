//! Predator/prey overlay on the zone model.
//!
//! Predators chase the nearest prey, give up on scattered stragglers and
//! halt once no prey remain. Prey die when a predator comes within the
//! kill radius, flee at boosted speed from closer predators and steer
//! away from the dead. Otherwise prey follow the zone model restricted
//! to other live prey.

use crate::agent::{Agent, StepPlan};
use crate::params::{PredatorParams, PreyParams};
use crate::steering::Motion;
use crate::zones::{Neighborhood, Zones};
use couzin_core::types::Kind;
use couzin_core::vector::Vector2D;
use rand::Rng;
use tracing::debug;

/// Plan one predator tick.
pub fn plan_predator<R: Rng + ?Sized>(
    agent: &Agent,
    params: &PredatorParams,
    ctx: &Neighborhood<'_>,
    rng: &mut R,
) -> Motion {
    let me = ctx.agent(agent.index());

    let mut prey_count = 0usize;
    let mut in_desist = 0usize;
    let mut toward_prey = Vector2D::ZERO;
    let mut away_from_predators = Vector2D::ZERO;
    let mut nearest: Option<(f64, Vector2D)> = None;

    for other in ctx.others(me.index) {
        let d = me.position.distance_to(&other.position);
        match other.kind {
            Kind::Prey => {
                prey_count += 1;
                toward_prey += me.position.direction_to(&other.position);
                if d <= params.desist_radius {
                    in_desist += 1;
                }
                if nearest.map_or(true, |(best, _)| d < best) {
                    nearest = Some((d, other.position));
                }
            }
            Kind::Predator if d <= params.predator_radius => {
                away_from_predators -= me.position.direction_to(&other.position);
            }
            _ => {}
        }
    }

    let spacing = away_from_predators.normalize();
    match nearest {
        None => {
            debug!(index = me.index, "no prey left, predator halts");
            agent.steer(spacing, 0.0, 0.0, ctx, rng)
        }
        Some(_) if in_desist < params.desist_count && prey_count > params.desist_count => {
            // Too few prey close by while many survive: rejoin the main body.
            let desired = (toward_prey.normalize() + spacing).normalize();
            agent.steer(desired, params.speed, params.thetamax, ctx, rng)
        }
        Some((_, target)) => {
            let desired = (me.position.direction_to(&target) + spacing).normalize();
            agent.steer(desired, params.speed, params.thetamax, ctx, rng)
        }
    }
}

/// Plan one prey tick. A kill yields a plan whose `replace_with` holds the
/// dead agent taking over this index.
pub fn plan_prey<R: Rng + ?Sized>(
    agent: &Agent,
    params: &PreyParams,
    ctx: &Neighborhood<'_>,
    rng: &mut R,
) -> StepPlan {
    let me = ctx.agent(agent.index());

    let mut speed = params.base_speed;
    let mut flee = Vector2D::ZERO;
    let mut evade = Vector2D::ZERO;
    let mut running = false;
    let mut evading = false;

    for other in ctx.others(me.index) {
        let d = me.position.distance_to(&other.position);
        match other.kind {
            Kind::Predator => {
                if d <= params.kill_radius {
                    return killed(agent);
                }
                if d <= params.predator_repulsion {
                    running = true;
                    speed = params.base_speed * params.flee_multiplier;
                    flee -= me.position.direction_to(&other.position);
                }
            }
            Kind::Dead if d <= params.dead_repulsion => {
                evading = true;
                evade -= me.position.direction_to(&other.position);
            }
            _ => {}
        }
    }

    let base = Zones::metric(ctx, me.index, |other| other.kind == Kind::Prey)
        .direction(me, ctx.snapshot);
    let desired = if running {
        (flee.normalize() + base).normalize()
    } else if evading {
        (evade.normalize() + base).normalize()
    } else {
        base
    };

    StepPlan {
        index: agent.index(),
        motion: agent.steer(desired, speed, params.thetamax, ctx, rng),
        replace_with: None,
    }
}

fn killed(agent: &Agent) -> StepPlan {
    StepPlan {
        index: agent.index(),
        motion: Motion {
            speed: 0.0,
            thetamax: 0.0,
            ..agent.stationary()
        },
        replace_with: Some(Agent::dead(agent.index(), agent.position(), agent.orientation())),
    }
}
