//! Heading evolution and facing-angle computation
//!
//! A wolf's *heading* (direction of travel, radians, math convention) and
//! its visible *orientation* (shape rotation, degrees, display convention)
//! are independent: the heading drifts under a configurable policy while the
//! orientation is recomputed every frame from the target position.

use glam::DVec2;
use rand::Rng;
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, wrap_degrees};

/// Angular units for facing-angle output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnits {
    #[default]
    #[serde(rename = "deg")]
    Degrees,
    #[serde(rename = "rad")]
    Radians,
}

/// Angle from an agent to its target, in the display convention.
///
/// `atan2` gives the mathematical angle (0 = +x, counter-clockwise); shape
/// renderers rotate clockwise from "up", so the result is
/// `(90 − degrees(atan2(dy, dx))) mod 360`. A target directly above the
/// agent is 0°, directly to the right is 90°.
///
/// Coincident positions degenerate to `atan2(0, 0) == 0`, i.e. 90°.
pub fn facing_angle(agent_pos: DVec2, target_pos: DVec2, units: AngleUnits) -> f64 {
    let delta = target_pos - agent_pos;
    let math_deg = delta.y.atan2(delta.x).to_degrees();
    let display_deg = wrap_degrees(90.0 - math_deg);
    match units {
        AngleUnits::Degrees => display_deg,
        AngleUnits::Radians => display_deg.to_radians(),
    }
}

/// How an autonomous agent's heading evolves over frames.
///
/// The task exists in two variants: darts that visibly wander every frame,
/// and darts that hold a course then snap to a new one. Both are exposed
/// here and selected per agent kind in the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// Every frame: `heading += Normal(0, noise)`.
    Jitter { noise: f64 },
    /// Hold the heading; every `interval = [min, max)` frames offset it once
    /// by `Uniform(-window/2, window/2)`.
    WindowedResample { window: f64, interval: (u32, u32) },
}

/// Per-agent heading driver: the policy plus the resample countdown.
#[derive(Debug, Clone)]
pub struct DirectionModel {
    policy: DirectionPolicy,
    frames_until_resample: u32,
}

impl DirectionModel {
    pub fn new(policy: DirectionPolicy, rng: &mut Pcg32) -> Self {
        let frames_until_resample = match policy {
            DirectionPolicy::Jitter { .. } => 0,
            DirectionPolicy::WindowedResample {
                interval: (min, max),
                ..
            } => rng.random_range(min..max),
        };
        Self {
            policy,
            frames_until_resample,
        }
    }

    /// Advance the heading by one frame. For the windowed policy most
    /// frames only tick the countdown and return the heading unchanged.
    pub fn advance(&mut self, heading: f64, rng: &mut Pcg32) -> f64 {
        match self.policy {
            DirectionPolicy::Jitter { noise } => {
                let z: f64 = rng.sample(StandardNormal);
                normalize_angle(heading + z * noise)
            }
            DirectionPolicy::WindowedResample {
                window,
                interval: (min, max),
            } => {
                self.frames_until_resample = self.frames_until_resample.saturating_sub(1);
                if self.frames_until_resample > 0 {
                    return heading;
                }
                self.frames_until_resample = rng.random_range(min..max);
                let offset = rng.random_range(-window / 2.0..window / 2.0);
                normalize_angle(heading + offset)
            }
        }
    }
}
