//! Agent — one member of the swarm.
//!
//! An agent carries its kinematic state and a [`Behavior`], a closed
//! tagged variant that selects the steering rule. Planning a tick never
//! mutates the agent: it returns a [`StepPlan`] that the board commits
//! once every agent has planned.

use crate::nearest;
use crate::params::{PredatorParams, PreyParams, SteeringParams};
use crate::predprey;
use crate::steering::{steer, Motion};
use crate::zones::{Neighborhood, Zones};
use couzin_core::error::{CouzinError, Result};
use couzin_core::types::{AgentIndex, AgentSnapshot, Kind};
use couzin_core::vector::Vector2D;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Steering rule of an agent, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Behavior {
    /// No steering rule; only usable for graph analysis and consensus runs.
    Generic,
    /// Metric Couzin zones.
    Topological,
    /// Couzin zones over the k nearest neighbours.
    Nearest,
    Predator(PredatorParams),
    Prey(PreyParams),
    Dead,
}

impl Behavior {
    pub fn kind(&self) -> Kind {
        match self {
            Behavior::Generic => Kind::Generic,
            Behavior::Topological => Kind::Topological,
            Behavior::Nearest => Kind::Nearest,
            Behavior::Predator(_) => Kind::Predator,
            Behavior::Prey(_) => Kind::Prey,
            Behavior::Dead => Kind::Dead,
        }
    }
}

/// What an agent wants to happen at the end of the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    pub index: AgentIndex,
    pub motion: Motion,
    /// Replacement occupying the same index (e.g. prey -> dead).
    pub replace_with: Option<Agent>,
}

/// A swarm member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    index: AgentIndex,
    position: Vector2D,
    orientation: Vector2D,
    speed: f64,
    /// Maximum heading change per tick, radians.
    thetamax: f64,
    behavior: Behavior,
}

impl Agent {
    /// Create an agent. The orientation is normalized; a zero orientation
    /// becomes +x. The index is assigned later by the board.
    pub fn new(behavior: Behavior, position: Vector2D, orientation: Vector2D) -> Self {
        let (speed, thetamax) = match &behavior {
            Behavior::Topological | Behavior::Nearest => {
                let p = SteeringParams::default();
                (p.speed, p.thetamax)
            }
            Behavior::Predator(p) => (p.speed, p.thetamax),
            Behavior::Prey(p) => (p.base_speed, p.thetamax),
            Behavior::Generic | Behavior::Dead => (0.0, 0.0),
        };
        let orientation = match orientation.normalize() {
            o if o.is_zero() => Vector2D::new(1.0, 0.0),
            o => o,
        };
        Self {
            index: 0,
            position,
            orientation,
            speed,
            thetamax,
            behavior,
        }
    }

    pub fn generic(position: Vector2D) -> Self {
        Self::new(Behavior::Generic, position, Vector2D::new(1.0, 0.0))
    }

    pub fn topological(position: Vector2D, orientation: Vector2D) -> Self {
        Self::new(Behavior::Topological, position, orientation)
    }

    pub fn nearest(position: Vector2D, orientation: Vector2D) -> Self {
        Self::new(Behavior::Nearest, position, orientation)
    }

    pub fn predator(position: Vector2D, orientation: Vector2D) -> Self {
        Self::new(Behavior::Predator(PredatorParams::default()), position, orientation)
    }

    pub fn prey(position: Vector2D, orientation: Vector2D) -> Self {
        Self::new(Behavior::Prey(PreyParams::default()), position, orientation)
    }

    /// An inert agent taking over `index`.
    pub fn dead(index: AgentIndex, position: Vector2D, orientation: Vector2D) -> Self {
        let mut agent = Self::new(Behavior::Dead, position, orientation);
        agent.index = index;
        agent
    }

    /// Override speed and turn rate of a topological or nearest agent.
    ///
    /// Predators and prey take both from their own parameter structs every
    /// tick, so for every other kind this leaves the agent unchanged.
    pub fn with_steering(mut self, params: SteeringParams) -> Self {
        if matches!(self.behavior, Behavior::Topological | Behavior::Nearest) {
            self.speed = params.speed;
            self.thetamax = params.thetamax;
        }
        self
    }

    pub fn index(&self) -> AgentIndex {
        self.index
    }

    /// Set by the board once, at construction.
    pub fn assign_index(&mut self, index: AgentIndex) {
        self.index = index;
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    pub fn orientation(&self) -> Vector2D {
        self.orientation
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn thetamax(&self) -> f64 {
        self.thetamax
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn kind(&self) -> Kind {
        self.behavior.kind()
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            index: self.index,
            kind: self.kind(),
            position: self.position,
            orientation: self.orientation,
            speed: self.speed,
        }
    }

    /// Compute this agent's action for the tick from the pre-tick view.
    ///
    /// Fails for [`Behavior::Generic`], which has no steering rule.
    pub fn plan<R: Rng + ?Sized>(&self, ctx: &Neighborhood<'_>, rng: &mut R) -> Result<StepPlan> {
        let motion = match &self.behavior {
            Behavior::Generic => {
                return Err(CouzinError::not_implemented(self.index, self.kind().name()));
            }
            Behavior::Dead => self.stationary(),
            Behavior::Topological => {
                let me = ctx.agent(self.index);
                let desired = Zones::metric(ctx, self.index, |_| true).direction(me, ctx.snapshot);
                self.steer(desired, self.speed, self.thetamax, ctx, rng)
            }
            Behavior::Nearest => {
                let me = ctx.agent(self.index);
                let desired = nearest::zones(ctx, self.index).direction(me, ctx.snapshot);
                self.steer(desired, self.speed, self.thetamax, ctx, rng)
            }
            Behavior::Predator(params) => predprey::plan_predator(self, params, ctx, rng),
            Behavior::Prey(params) => return Ok(predprey::plan_prey(self, params, ctx, rng)),
        };
        Ok(StepPlan {
            index: self.index,
            motion,
            replace_with: None,
        })
    }

    /// Commit a planned motion.
    pub fn apply(&mut self, motion: &Motion) {
        self.position = motion.position;
        self.orientation = motion.orientation;
        self.speed = motion.speed;
        self.thetamax = motion.thetamax;
    }

    pub(crate) fn steer<R: Rng + ?Sized>(
        &self,
        desired: Vector2D,
        speed: f64,
        thetamax: f64,
        ctx: &Neighborhood<'_>,
        rng: &mut R,
    ) -> Motion {
        steer(self.position, self.orientation, desired, speed, thetamax, ctx, rng)
    }

    pub(crate) fn stationary(&self) -> Motion {
        Motion {
            position: self.position,
            orientation: self.orientation,
            speed: self.speed,
            thetamax: self.thetamax,
        }
    }
}
