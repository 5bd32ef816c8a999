//! Pointer and key input seam
//!
//! The core never polls devices. Once per frame the driver asks an
//! `InputSource` for the latest sample; the call must not block. Key
//! bindings are matched against the pass-through strings in `KeyConfig`
//! by whatever windowing layer sits behind the real implementation.

use glam::DVec2;

use crate::sim::TickInput;

pub trait InputSource {
    /// Latest pointer position plus any edge-triggered key events.
    fn sample(&mut self) -> TickInput;
}

/// Deterministic input for demos and soak tests: the pointer orbits the
/// arena center, the facing condition toggles on a fixed cadence, and the
/// session quits after a set number of frames.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frame: u64,
    frames_total: u64,
    orbit_radius: f64,
    /// Radians of orbit per frame
    orbit_step: f64,
    toggle_every: Option<u64>,
}

impl ScriptedInput {
    pub fn orbit(orbit_radius: f64, orbit_step: f64, frames_total: u64) -> Self {
        Self {
            frame: 0,
            frames_total,
            orbit_radius,
            orbit_step,
            toggle_every: None,
        }
    }

    pub fn with_toggle_every(mut self, frames: u64) -> Self {
        self.toggle_every = Some(frames);
        self
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> TickInput {
        let theta = self.frame as f64 * self.orbit_step;
        let toggle = self
            .toggle_every
            .is_some_and(|n| self.frame > 0 && self.frame % n == 0);
        let input = TickInput {
            pointer_pos: self.orbit_radius * DVec2::new(theta.cos(), theta.sin()),
            toggle_face_target: toggle,
            quit: self.frame >= self.frames_total,
        };
        self.frame += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_quits_after_budget() {
        let mut input = ScriptedInput::orbit(5.0, 0.1, 3);
        assert!(!input.sample().quit);
        assert!(!input.sample().quit);
        assert!(!input.sample().quit);
        assert!(input.sample().quit);
    }

    #[test]
    fn test_toggle_cadence() {
        let mut input = ScriptedInput::orbit(5.0, 0.1, 100).with_toggle_every(2);
        let toggles: Vec<bool> = (0..6).map(|_| input.sample().toggle_face_target).collect();
        assert_eq!(toggles, vec![false, false, true, false, true, false]);
    }

    #[test]
    fn test_pointer_stays_on_orbit() {
        let mut input = ScriptedInput::orbit(3.0, 0.25, 100);
        for _ in 0..50 {
            let sample = input.sample();
            assert!((sample.pointer_pos.length() - 3.0).abs() < 1e-9);
        }
    }
}
