//! Rectangular arena bounds and boundary reflection
//!
//! The arena is centered on the origin and expressed in the same units as
//! agent positions (degrees of visual angle). Agents never leave it: a
//! proposed position past a wall is clamped back onto the wall and the
//! offending heading component is mirrored.

use glam::DVec2;

use crate::normalize_angle;

/// Half-extents of the play area. Constant for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub half_width: f64,
    pub half_height: f64,
}

impl Arena {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        debug_assert!(half_width > 0.0 && half_height > 0.0);
        Self {
            half_width,
            half_height,
        }
    }

    /// A position exactly on the boundary counts as inside.
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x.abs() <= self.half_width && pos.y.abs() <= self.half_height
    }

    /// Clamp a position onto the arena, axis by axis. Idempotent.
    pub fn clamp(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            pos.x.clamp(-self.half_width, self.half_width),
            pos.y.clamp(-self.half_height, self.half_height),
        )
    }

    /// Bounce a proposed position off the walls.
    ///
    /// Returns the clamped position and the heading after reflection:
    /// crossing a vertical wall mirrors the heading across the vertical
    /// axis (`π − h`), crossing a horizontal wall mirrors it across the
    /// horizontal axis (`−h`). A corner applies both, x-rule first. This is
    /// single-step: a speed large enough to require a double bounce in one
    /// frame still produces one reflection and a clamped position.
    pub fn reflect(&self, proposed: DVec2, heading: f64) -> (DVec2, f64) {
        let mut heading = heading;
        if proposed.x.abs() > self.half_width {
            heading = std::f64::consts::PI - heading;
        }
        if proposed.y.abs() > self.half_height {
            heading = -heading;
        }
        (self.clamp(proposed), normalize_angle(heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_in_bounds_unchanged() {
        let arena = Arena::new(10.0, 8.0);
        let pos = DVec2::new(3.0, -7.5);
        let (p, h) = arena.reflect(pos, 1.25);
        assert_eq!(p, pos);
        assert!((h - 1.25).abs() < EPS);
    }

    #[test]
    fn test_boundary_position_is_inside() {
        let arena = Arena::new(10.0, 8.0);
        let pos = DVec2::new(10.0, -8.0);
        assert!(arena.contains(pos));
        let (p, h) = arena.reflect(pos, 0.5);
        assert_eq!(p, pos);
        assert!((h - 0.5).abs() < EPS);
    }

    #[test]
    fn test_reflect_x_wall() {
        // Half-extents (10, 10), agent at (9.95, 0) heading 0 at speed 0.1:
        // the proposed (10.05, 0) lands on the wall moving in -x.
        let arena = Arena::new(10.0, 10.0);
        let (p, h) = arena.reflect(DVec2::new(10.05, 0.0), 0.0);
        assert_eq!(p, DVec2::new(10.0, 0.0));
        assert!((h - PI).abs() < EPS);
    }

    #[test]
    fn test_reflect_y_wall() {
        let arena = Arena::new(10.0, 8.0);
        let heading = PI / 3.0;
        let (p, h) = arena.reflect(DVec2::new(0.0, 8.2), heading);
        assert_eq!(p, DVec2::new(0.0, 8.0));
        assert!((h - normalize_angle(-heading)).abs() < EPS);
    }

    #[test]
    fn test_reflect_corner_composes() {
        // Both walls exceeded: x-rule then y-rule, so h -> -(π − h).
        let arena = Arena::new(5.0, 5.0);
        let heading = 0.7;
        let (p, h) = arena.reflect(DVec2::new(5.5, -5.5), heading);
        assert_eq!(p, DVec2::new(5.0, -5.0));
        let expected = normalize_angle(-(PI - heading));
        assert!((h - expected).abs() < EPS);
    }

    #[test]
    fn test_clamp_idempotent() {
        let arena = Arena::new(4.0, 3.0);
        let p = DVec2::new(-9.0, 2.0);
        assert_eq!(arena.clamp(arena.clamp(p)), arena.clamp(p));
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_bounds(
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
            h in 0.0f64..std::f64::consts::TAU,
        ) {
            let arena = Arena::new(10.0, 8.0);
            let (p, _) = arena.reflect(DVec2::new(x, y), h);
            prop_assert!(p.x >= -10.0 && p.x <= 10.0);
            prop_assert!(p.y >= -8.0 && p.y <= 8.0);
        }

        #[test]
        fn prop_in_bounds_is_identity(
            x in -10.0f64..=10.0,
            y in -8.0f64..=8.0,
            h in 0.0f64..std::f64::consts::TAU,
        ) {
            let arena = Arena::new(10.0, 8.0);
            let pos = DVec2::new(x, y);
            let (p, new_h) = arena.reflect(pos, h);
            prop_assert_eq!(p, pos);
            prop_assert!((new_h - h).abs() < 1e-9);
        }
    }
}
