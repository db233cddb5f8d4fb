//! Behavioral parameters for agents and boards.
//!
//! Defaults reproduce the reference experiments: prey cruise at 0.5 and
//! turn at most 0.05 rad per tick, predators move twice as fast and turn
//! four times as sharply.

use couzin_core::error::{CouzinError, Result};
use serde::{Deserialize, Serialize};

/// Board-wide zone geometry and heading noise for steering agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Radius of the zone of repulsion (`rr`).
    pub repulsion_radius: f64,
    /// Outer radius of the zone of orientation (`ro`).
    pub orientation_radius: f64,
    /// Outer radius of the zone of attraction (`ra`).
    pub attraction_radius: f64,
    /// Neighbour count for nearest-neighbour agents.
    pub k: usize,
    /// Standard deviation (radians) of the per-tick heading perturbation.
    pub heading_noise: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            repulsion_radius: 1.0,
            orientation_radius: 2.0,
            attraction_radius: 16.0,
            k: 5,
            heading_noise: 0.05,
        }
    }
}

impl SteeringConfig {
    pub fn new(repulsion_radius: f64, orientation_radius: f64, attraction_radius: f64, k: usize) -> Self {
        Self {
            repulsion_radius,
            orientation_radius,
            attraction_radius,
            k,
            ..Self::default()
        }
    }

    pub fn with_heading_noise(mut self, heading_noise: f64) -> Self {
        self.heading_noise = heading_noise;
        self
    }

    /// Radii must be finite, non-negative and nested `rr <= ro <= ra`.
    pub fn validate(&self) -> Result<()> {
        non_negative("repulsion_radius", self.repulsion_radius)?;
        non_negative("orientation_radius", self.orientation_radius)?;
        non_negative("attraction_radius", self.attraction_radius)?;
        non_negative("heading_noise", self.heading_noise)?;
        if self.orientation_radius < self.repulsion_radius {
            return Err(CouzinError::invalid_config(
                "orientation_radius",
                self.orientation_radius.to_string(),
                "must not be smaller than repulsion_radius",
            ));
        }
        if self.attraction_radius < self.orientation_radius {
            return Err(CouzinError::invalid_config(
                "attraction_radius",
                self.attraction_radius.to_string(),
                "must not be smaller than orientation_radius",
            ));
        }
        Ok(())
    }
}

/// Speed and turning rate of a plain zone-steering agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringParams {
    pub speed: f64,
    /// Maximum heading change per tick, radians.
    pub thetamax: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            speed: 0.5,
            thetamax: 0.1,
        }
    }
}

/// Predator chase parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredatorParams {
    pub speed: f64,
    pub thetamax: f64,
    /// Minimum number of nearby prey worth chasing.
    pub desist_count: usize,
    /// Radius in which nearby prey are counted.
    pub desist_radius: f64,
    /// Other predators closer than this are avoided.
    pub predator_radius: f64,
}

impl Default for PredatorParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            thetamax: 0.20,
            desist_count: 3,
            desist_radius: 5.0,
            predator_radius: 3.0,
        }
    }
}

impl PredatorParams {
    pub fn validate(&self) -> Result<()> {
        non_negative("predator.speed", self.speed)?;
        non_negative("predator.thetamax", self.thetamax)?;
        non_negative("predator.desist_radius", self.desist_radius)?;
        non_negative("predator.predator_radius", self.predator_radius)
    }
}

/// Prey evasion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreyParams {
    pub base_speed: f64,
    pub thetamax: f64,
    /// Predators closer than this trigger flight.
    pub predator_repulsion: f64,
    /// Dead agents closer than this are avoided.
    pub dead_repulsion: f64,
    /// Predators at or within this distance kill the prey.
    pub kill_radius: f64,
    /// Speed multiplier while fleeing.
    pub flee_multiplier: f64,
}

impl Default for PreyParams {
    fn default() -> Self {
        Self {
            base_speed: 0.5,
            thetamax: 0.05,
            predator_repulsion: 5.0,
            dead_repulsion: 7.0,
            kill_radius: 0.75,
            flee_multiplier: 3.0,
        }
    }
}

impl PreyParams {
    pub fn validate(&self) -> Result<()> {
        non_negative("prey.base_speed", self.base_speed)?;
        non_negative("prey.thetamax", self.thetamax)?;
        non_negative("prey.predator_repulsion", self.predator_repulsion)?;
        non_negative("prey.dead_repulsion", self.dead_repulsion)?;
        non_negative("prey.kill_radius", self.kill_radius)?;
        non_negative("prey.flee_multiplier", self.flee_multiplier)?;
        if self.kill_radius > self.predator_repulsion {
            return Err(CouzinError::invalid_config(
                "prey.kill_radius",
                self.kill_radius.to_string(),
                "must not exceed predator_repulsion",
            ));
        }
        Ok(())
    }
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CouzinError::out_of_range(field, 0.0, f64::MAX, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SteeringConfig::default().validate().is_ok());
        assert!(PredatorParams::default().validate().is_ok());
        assert!(PreyParams::default().validate().is_ok());
    }

    #[test]
    fn equal_radii_are_allowed() {
        // All three zones collapse onto one radius in the "flee" setup.
        assert!(SteeringConfig::new(5.0, 5.0, 5.0, 5).validate().is_ok());
    }

    #[test]
    fn zones_must_nest() {
        assert!(SteeringConfig::new(5.0, 2.0, 16.0, 5).validate().is_err());
        assert!(SteeringConfig::new(1.0, 20.0, 16.0, 5).validate().is_err());
    }

    #[test]
    fn negative_or_nan_values_rejected() {
        assert!(SteeringConfig::new(-1.0, 2.0, 3.0, 5).validate().is_err());
        assert!(SteeringConfig::default()
            .with_heading_noise(f64::NAN)
            .validate()
            .is_err());
        let prey = PreyParams {
            kill_radius: 10.0,
            ..PreyParams::default()
        };
        assert!(prey.validate().is_err());
    }
}
