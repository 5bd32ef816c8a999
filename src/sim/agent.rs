//! Agents: the pointer-driven sheep and the autonomous wolves
//!
//! A `Wolf` advances along its heading every frame, bounces off the arena
//! walls, drifts its heading under its `DirectionModel`, and rotates its
//! shape toward (or 90° away from) the target. A `Sheep` just follows
//! incremental pointer motion and stalls at the walls.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arena::Arena;
use super::heading::{AngleUnits, DirectionModel, DirectionPolicy, facing_angle};
use crate::{consts, heading_vector, normalize_angle, wrap_degrees};

/// RGB in [0, 1]
pub type Color = [f32; 3];

/// Typed capability error: the shape variant does not carry the attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{shape} has no {attribute}")]
    UnsupportedAttribute {
        shape: &'static str,
        attribute: &'static str,
    },
}

/// What an agent looks like. Only `Dart` has a meaningful rotation; a
/// circle is rotation-invariant and rejects orientation access outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Circle {
        radius: f64,
        color: Color,
    },
    Dart {
        /// Closed polygon outline in the shape's unit box
        vertices: Vec<DVec2>,
        size: f64,
        color: Color,
    },
}

impl ShapeSpec {
    /// The standard chevron dart
    pub fn dart(size: f64, color: Color) -> Self {
        ShapeSpec::Dart {
            vertices: consts::DART_VERTICES
                .iter()
                .map(|&(x, y)| DVec2::new(x, y))
                .collect(),
            size,
            color,
        }
    }

    pub fn circle(radius: f64, color: Color) -> Self {
        ShapeSpec::Circle { radius, color }
    }

    fn name(&self) -> &'static str {
        match self {
            ShapeSpec::Circle { .. } => "circle",
            ShapeSpec::Dart { .. } => "dart",
        }
    }

    fn unsupported(&self, attribute: &'static str) -> ShapeError {
        ShapeError::UnsupportedAttribute {
            shape: self.name(),
            attribute,
        }
    }

    /// Whether rotating this shape is visible at all
    pub fn has_orientation(&self) -> bool {
        matches!(self, ShapeSpec::Dart { .. })
    }

    pub fn color(&self) -> Color {
        match self {
            ShapeSpec::Circle { color, .. } | ShapeSpec::Dart { color, .. } => *color,
        }
    }

    pub fn set_color(&mut self, new_color: Color) {
        match self {
            ShapeSpec::Circle { color, .. } | ShapeSpec::Dart { color, .. } => *color = new_color,
        }
    }

    pub fn radius(&self) -> Result<f64, ShapeError> {
        match self {
            ShapeSpec::Circle { radius, .. } => Ok(*radius),
            other => Err(other.unsupported("radius")),
        }
    }

    pub fn set_radius(&mut self, new_radius: f64) -> Result<(), ShapeError> {
        match self {
            ShapeSpec::Circle { radius, .. } => {
                *radius = new_radius;
                Ok(())
            }
            other => Err(other.unsupported("radius")),
        }
    }

    pub fn size(&self) -> Result<f64, ShapeError> {
        match self {
            ShapeSpec::Dart { size, .. } => Ok(*size),
            other => Err(other.unsupported("size")),
        }
    }

    pub fn vertices(&self) -> Result<&[DVec2], ShapeError> {
        match self {
            ShapeSpec::Dart { vertices, .. } => Ok(vertices),
            other => Err(other.unsupported("vertices")),
        }
    }

    /// Radius of the circle used for caught detection
    pub fn collision_radius(&self) -> f64 {
        match self {
            ShapeSpec::Circle { radius, .. } => *radius,
            ShapeSpec::Dart { size, .. } => size / 2.0,
        }
    }
}

/// Everything needed to spawn one autonomous agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Travel per frame, arena units
    pub speed: f64,
    pub shape: ShapeSpec,
    /// Point the shape at the target, or 90° away from it
    pub face_target: bool,
    pub direction: DirectionPolicy,
}

/// An autonomous agent. Owns its RNG stream, so per-frame updates are
/// independent of every other agent and reproducible from the session seed.
#[derive(Debug, Clone)]
pub struct Wolf {
    pub pos: DVec2,
    /// Direction of travel, radians in [0, 2π)
    pub heading: f64,
    pub speed: f64,
    pub shape: ShapeSpec,
    pub face_target: bool,
    /// Visible rotation, degrees in the display convention
    orientation: f64,
    direction: DirectionModel,
    rng: Pcg32,
}

impl Wolf {
    /// Spawn at a uniform random position with a uniform random heading.
    pub fn spawn(config: &AgentConfig, arena: &Arena, mut rng: Pcg32) -> Self {
        let pos = DVec2::new(
            rng.random_range(-arena.half_width..=arena.half_width),
            rng.random_range(-arena.half_height..=arena.half_height),
        );
        let heading = rng.random_range(0.0..std::f64::consts::TAU);
        let direction = DirectionModel::new(config.direction, &mut rng);
        Self {
            pos,
            heading,
            speed: config.speed,
            shape: config.shape.clone(),
            face_target: config.face_target,
            orientation: 0.0,
            direction,
            rng,
        }
    }

    /// Aim the heading straight at a point (the hunter does this every
    /// frame before its update, making it heat-seeking).
    pub fn steer_toward(&mut self, target: DVec2) {
        let delta = target - self.pos;
        self.heading = normalize_angle(delta.y.atan2(delta.x));
    }

    /// One frame: advance, bounce, drift heading, rotate toward the target.
    pub fn update(&mut self, target_pos: DVec2, arena: &Arena) {
        let candidate = self.pos + self.speed * heading_vector(self.heading);
        let (pos, heading) = arena.reflect(candidate, self.heading);
        self.pos = pos;
        self.heading = self.direction.advance(heading, &mut self.rng);

        if self.shape.has_orientation() {
            let facing = facing_angle(self.pos, target_pos, AngleUnits::Degrees);
            self.orientation = if self.face_target {
                facing
            } else {
                // "face away" is a perpendicular offset, not a reversal
                wrap_degrees(facing + 90.0)
            };
        }
    }

    /// Visible rotation in degrees. Circles have none.
    pub fn orientation(&self) -> Result<f64, ShapeError> {
        if self.shape.has_orientation() {
            Ok(self.orientation)
        } else {
            Err(self.shape.unsupported("orientation"))
        }
    }

    pub fn collision_radius(&self) -> f64 {
        self.shape.collision_radius()
    }
}

/// The player-controlled agent. No heading: it mirrors incremental pointer
/// motion and simply stalls at the walls.
#[derive(Debug, Clone)]
pub struct Sheep {
    pub pos: DVec2,
    pub shape: ShapeSpec,
    /// Visible rotation, degrees; holds its last value while the pointer rests
    orientation: f64,
    last_pointer: DVec2,
}

impl Sheep {
    pub fn new(shape: ShapeSpec, pos: DVec2, pointer: DVec2) -> Self {
        Self {
            pos,
            shape,
            orientation: 0.0,
            last_pointer: pointer,
        }
    }

    /// One frame: apply the pointer delta since last frame, clamped.
    pub fn update(&mut self, pointer: DVec2, arena: &Arena) {
        let delta = pointer - self.last_pointer;
        self.pos = arena.clamp(self.pos + delta);

        if self.shape.has_orientation() && delta != DVec2::ZERO {
            self.orientation = wrap_degrees(90.0 - delta.y.atan2(delta.x).to_degrees());
        }
        self.last_pointer = pointer;
    }

    pub fn orientation(&self) -> Result<f64, ShapeError> {
        if self.shape.has_orientation() {
            Ok(self.orientation)
        } else {
            Err(self.shape.unsupported("orientation"))
        }
    }

    pub fn collision_radius(&self) -> f64 {
        self.shape.collision_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn arena() -> Arena {
        Arena::new(10.0, 8.0)
    }

    fn dart_config(face_target: bool) -> AgentConfig {
        AgentConfig {
            speed: 0.1,
            shape: ShapeSpec::dart(1.5, consts::COLOR_RED),
            face_target,
            direction: DirectionPolicy::Jitter { noise: 0.1 },
        }
    }

    #[test]
    fn test_circle_rejects_orientation_and_radius_works() {
        let circle = ShapeSpec::circle(0.5, consts::COLOR_WHITE);
        assert!(!circle.has_orientation());
        assert_eq!(circle.radius(), Ok(0.5));
        assert_eq!(
            circle.vertices(),
            Err(ShapeError::UnsupportedAttribute {
                shape: "circle",
                attribute: "vertices",
            })
        );
    }

    #[test]
    fn test_dart_rejects_radius() {
        let mut dart = ShapeSpec::dart(1.5, consts::COLOR_BLUE);
        assert!(dart.has_orientation());
        assert!(dart.radius().is_err());
        assert!(dart.set_radius(2.0).is_err());
        assert_eq!(dart.size(), Ok(1.5));
        assert_eq!(dart.vertices().map(<[DVec2]>::len), Ok(5));
    }

    #[test]
    fn test_color_on_both_variants() {
        let mut circle = ShapeSpec::circle(0.5, consts::COLOR_WHITE);
        circle.set_color(consts::COLOR_RED);
        assert_eq!(circle.color(), consts::COLOR_RED);
    }

    #[test]
    fn test_unknown_shape_tag_rejected() {
        let err = serde_json::from_str::<ShapeSpec>(r#"{"kind": "triangle", "size": 1.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_wolf_spawns_in_bounds() {
        let arena = arena();
        for seed in 0..50 {
            let wolf = dart(seed, &arena, true);
            assert!(arena.contains(wolf.pos), "seed {seed}: {:?}", wolf.pos);
            assert!((0.0..std::f64::consts::TAU).contains(&wolf.heading));
        }
    }

    fn dart(seed: u64, arena: &Arena, face_target: bool) -> Wolf {
        Wolf::spawn(&dart_config(face_target), arena, Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_wolf_stays_in_bounds() {
        let arena = arena();
        let mut wolf = dart(3, &arena, true);
        wolf.speed = 1.7;
        for _ in 0..5000 {
            wolf.update(DVec2::ZERO, &arena);
            assert!(arena.contains(wolf.pos));
        }
    }

    #[test]
    fn test_wolf_bounces_off_right_wall() {
        let arena = Arena::new(10.0, 10.0);
        let mut wolf = dart(1, &arena, true);
        wolf.pos = DVec2::new(9.95, 0.0);
        wolf.heading = 0.0;
        wolf.speed = 0.1;
        // Jitter perturbs the heading after the bounce, so use a quiet model
        wolf.direction = DirectionModel::new(
            DirectionPolicy::WindowedResample {
                window: PI,
                interval: (100, 200),
            },
            &mut Pcg32::seed_from_u64(0),
        );
        wolf.update(DVec2::ZERO, &arena);
        assert!((wolf.pos.x - 10.0).abs() < EPS);
        assert!((wolf.heading - PI).abs() < EPS);
    }

    #[test]
    fn test_wolf_faces_target() {
        let arena = arena();
        let mut wolf = dart(5, &arena, true);
        wolf.pos = DVec2::ZERO;
        wolf.speed = 0.0;
        wolf.update(DVec2::new(1.0, 0.0), &arena);
        let facing = wolf.orientation().unwrap();
        // target to the right, allow for the tiny drift of one position step
        assert!((facing - 90.0).abs() < 1.0, "got {facing}");
    }

    #[test]
    fn test_face_away_is_perpendicular() {
        let arena = arena();
        let target = DVec2::new(3.0, -2.0);

        let mut facing_wolf = dart(11, &arena, true);
        let mut averted_wolf = facing_wolf.clone();
        averted_wolf.face_target = false;

        facing_wolf.update(target, &arena);
        averted_wolf.update(target, &arena);

        let facing = facing_wolf.orientation().unwrap();
        let averted = averted_wolf.orientation().unwrap();
        assert!((averted - wrap_degrees(facing + 90.0)).abs() < EPS);
        assert!((averted - wrap_degrees(facing + 180.0)).abs() > 1.0);
    }

    #[test]
    fn test_circle_wolf_orientation_unsupported() {
        let arena = arena();
        let config = AgentConfig {
            speed: 0.1,
            shape: ShapeSpec::circle(0.5, consts::COLOR_RED),
            face_target: true,
            direction: DirectionPolicy::Jitter { noise: 0.1 },
        };
        let mut wolf = Wolf::spawn(&config, &arena, Pcg32::seed_from_u64(2));
        wolf.update(DVec2::ZERO, &arena);
        assert!(wolf.orientation().is_err());
    }

    #[test]
    fn test_steer_toward_aims_at_target() {
        let arena = arena();
        let mut wolf = dart(8, &arena, true);
        wolf.pos = DVec2::ZERO;
        wolf.steer_toward(DVec2::new(0.0, 5.0));
        assert!((wolf.heading - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_sheep_follows_pointer_delta() {
        let arena = arena();
        let mut sheep = Sheep::new(
            ShapeSpec::circle(0.5, consts::COLOR_WHITE),
            DVec2::ZERO,
            DVec2::new(100.0, 100.0),
        );
        sheep.update(DVec2::new(101.0, 99.5), &arena);
        assert!((sheep.pos - DVec2::new(1.0, -0.5)).length() < EPS);
    }

    #[test]
    fn test_sheep_stalls_at_wall() {
        let arena = arena();
        let mut sheep = Sheep::new(
            ShapeSpec::circle(0.5, consts::COLOR_WHITE),
            DVec2::new(9.5, 0.0),
            DVec2::ZERO,
        );
        sheep.update(DVec2::new(5.0, 0.0), &arena);
        assert_eq!(sheep.pos, DVec2::new(10.0, 0.0));
        // Pointer keeps pushing right; sheep stays pinned
        sheep.update(DVec2::new(8.0, 0.0), &arena);
        assert_eq!(sheep.pos, DVec2::new(10.0, 0.0));
    }

    #[test]
    fn test_dart_sheep_orientation_from_motion() {
        let arena = arena();
        let mut sheep = Sheep::new(
            ShapeSpec::dart(1.0, consts::COLOR_WHITE),
            DVec2::ZERO,
            DVec2::ZERO,
        );
        // Move straight up: display angle 0
        sheep.update(DVec2::new(0.0, 1.0), &arena);
        assert!((sheep.orientation().unwrap() - 0.0).abs() < EPS);
        // No motion: orientation holds
        sheep.update(DVec2::new(0.0, 1.0), &arena);
        assert!((sheep.orientation().unwrap() - 0.0).abs() < EPS);
    }
}
