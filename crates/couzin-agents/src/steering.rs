//! Steering — heading noise, bounded turning and integration.
//!
//! Every steering kind funnels its desired direction through the same
//! pipeline:
//! 1. perturb the heading with zero-mean Gaussian noise
//! 2. clamp the heading change to `thetamax`
//! 3. move `speed` along the new heading

use crate::zones::Neighborhood;
use couzin_core::vector::{angle_between, Vector2D};
use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;

/// The committed outcome of one agent's tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub position: Vector2D,
    pub orientation: Vector2D,
    pub speed: f64,
    pub thetamax: f64,
}

/// Add a heading perturbation to `desired` and renormalize.
///
/// The noise is a unit vector at the desired heading (or the current one
/// when nothing is desired) rotated by a Gaussian angle. An agent with no
/// neighbours therefore performs a random walk in heading.
pub fn perturb<R: Rng + ?Sized>(
    desired: Vector2D,
    current: Vector2D,
    ctx: &Neighborhood<'_>,
    rng: &mut R,
) -> Vector2D {
    let base = if desired.is_zero() { current } else { desired };
    let jitter: f64 = ctx.heading_noise.sample(rng);
    let noise = Vector2D::from_angle(base.angle() + jitter);
    (desired + noise).normalize()
}

/// Turn from `current` towards `desired` by at most `thetamax` radians.
///
/// Returns `current` unchanged when `desired` is the zero vector.
pub fn clamp_turn(current: Vector2D, desired: Vector2D, thetamax: f64) -> Vector2D {
    if desired.is_zero() {
        return current;
    }
    let limit = thetamax.max(0.0);
    let delta = angle_between(&current, &desired).max(-limit).min(limit);
    Vector2D::from_angle(current.angle() + delta)
}

/// Run the full pipeline from a desired direction to a [`Motion`].
pub fn steer<R: Rng + ?Sized>(
    position: Vector2D,
    orientation: Vector2D,
    desired: Vector2D,
    speed: f64,
    thetamax: f64,
    ctx: &Neighborhood<'_>,
    rng: &mut R,
) -> Motion {
    let wanted = perturb(desired, orientation, ctx, rng);
    let heading = clamp_turn(orientation, wanted, thetamax);
    Motion {
        position: position + heading * speed,
        orientation: heading,
        speed,
        thetamax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn clamp_never_exceeds_thetamax() {
        let thetamax = 0.1;
        for i in 0..64 {
            let current = Vector2D::from_angle(i as f64 * 0.37);
            for j in 0..64 {
                let desired = Vector2D::from_angle(j as f64 * 0.91 - PI);
                let next = clamp_turn(current, desired, thetamax);
                let turned = angle_between(&current, &next).abs();
                assert!(turned <= thetamax + 1e-12, "turned {} > {}", turned, thetamax);
            }
        }
    }

    #[test]
    fn small_turns_are_taken_exactly() {
        let current = Vector2D::from_angle(0.0);
        let desired = Vector2D::from_angle(0.05);
        let next = clamp_turn(current, desired, 0.1);
        assert!((next.angle() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn turning_across_the_branch_cut_goes_the_short_way() {
        let current = Vector2D::from_angle(PI - 0.02);
        let desired = Vector2D::from_angle(-PI + 0.02);
        let next = clamp_turn(current, desired, 0.5);
        assert!((angle_between(&current, &next) - 0.04).abs() < 1e-9);
    }

    #[test]
    fn zero_thetamax_keeps_heading() {
        let current = Vector2D::new(0.0, 1.0);
        let next = clamp_turn(current, Vector2D::new(1.0, 0.0), 0.0);
        assert!((next.x - current.x).abs() < 1e-12 && (next.y - current.y).abs() < 1e-12);
    }

    #[test]
    fn zero_desire_keeps_heading() {
        let current = Vector2D::new(0.6, 0.8);
        assert_eq!(clamp_turn(current, Vector2D::ZERO, 1.0), current);
    }
}
