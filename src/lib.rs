//! Don't Get Caught - a predator-avoidance attention task
//!
//! A mouse-tracked "sheep" shares a rectangular arena with autonomous
//! "wolves": a hunter that pursues the player plus dart/circle distractors
//! that drift and bounce off the walls (Gao et al. 2010, Experiment 2).
//!
//! Core modules:
//! - `sim`: Deterministic agent simulation (arena, headings, per-frame tick)
//! - `config`: Session configuration and arena derivation from the monitor
//! - `renderer`: Drawing seam (the core never rasterizes anything itself)
//! - `platform`: Pointer/key input seam

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::Config;

use glam::DVec2;

/// Default task parameters (degrees of visual angle, frames)
pub mod consts {
    /// Physical monitor width in centimeters
    pub const MONITOR_WIDTH_CM: f64 = 31.26;
    /// Eye-to-screen distance in centimeters
    pub const VIEWING_DISTANCE_CM: f64 = 57.0;
    /// Monitor resolution in pixels
    pub const RESOLUTION_PX: (u32, u32) = (1512, 982);

    /// Wolf travel per frame, degrees of visual angle
    pub const WOLF_SPEED: f64 = 0.1;
    /// Wolf dart bounding size, degrees
    pub const WOLF_SIZE: f64 = 1.5;
    /// Stddev of the per-frame Gaussian heading jitter, radians
    pub const DIRECTION_NOISE: f64 = 0.1;
    /// Width of the windowed heading resample offset, radians
    pub const DIRECTION_UPDATE_WINDOW: f64 = std::f64::consts::FRAC_PI_2;
    /// Frames between windowed heading resamples, [min, max)
    pub const DIRECTION_UPDATE_INTERVAL: (u32, u32) = (30, 90);

    /// Sheep circle radius, degrees
    pub const SHEEP_RADIUS: f64 = 0.5;

    pub const COLOR_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    pub const COLOR_RED: [f32; 3] = [1.0, 0.0, 0.0];
    pub const COLOR_BLUE: [f32; 3] = [0.0, 0.0, 1.0];

    /// Chevron outline for the dart shape (closed polygon, unit box)
    pub const DART_VERTICES: [(f64, f64); 5] = [
        (-0.5, -0.5), // bottom-left
        (0.0, 0.5),   // tip
        (0.5, -0.5),  // bottom-right
        (0.0, -0.2),  // inner notch
        (-0.5, -0.5), // back to start
    ];
}

/// Wrap an angle in radians to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Unit vector pointing along a heading (radians, math convention)
#[inline]
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}
