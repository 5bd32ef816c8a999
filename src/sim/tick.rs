//! Per-frame session tick
//!
//! One tick advances every agent exactly once (player first, then hunters,
//! then distractors, always in spawn order) and reports any events. The
//! driving loop samples input, calls [`tick`], then hands [`SessionState::sprites`]
//! to the renderer.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::{Sheep, ShapeSpec, Wolf};
use super::arena::Arena;
use crate::config::{Config, ConfigError};

/// Input sample for a single frame. `toggle_face_target` and `quit` are
/// edge-triggered: the input source reports them true for one frame only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current pointer position in arena units
    pub pointer_pos: DVec2,
    /// Flip face-toward/face-away on every oriented autonomous agent
    pub toggle_face_target: bool,
    /// End the session
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Finished,
}

/// Observable outcomes of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FaceTargetToggled(bool),
    /// A hunter's collision circle overlapped the player's
    PlayerCaught { hunter: usize },
}

/// What the renderer needs for one agent this frame
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub position: DVec2,
    /// Degrees, display convention; `None` for rotation-invariant shapes
    pub orientation: Option<f64>,
    pub shape: &'a ShapeSpec,
}

/// One session: the player, the wolves and the arena they share.
///
/// Every autonomous agent owns an RNG stream derived from the session seed
/// and its spawn index, so a run is reproducible from `(config, seed)` plus
/// the input script, and per-agent updates never read each other's state.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub seed: u64,
    pub arena: Arena,
    pub player: Sheep,
    pub hunters: Vec<Wolf>,
    pub distractors: Vec<Wolf>,
    pub phase: SessionPhase,
    /// Current face-toward/face-away condition for oriented agents
    pub face_target: bool,
    pub time_ticks: u64,
}

/// Independent per-agent stream from the session seed
fn agent_rng(seed: u64, index: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

impl SessionState {
    /// Validate the config, derive the arena and spawn all agents.
    pub fn new(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let arena = config.arena()?;

        let mut stream = 0u64;
        let mut spawn = |agent: &super::agent::AgentConfig| {
            stream += 1;
            Wolf::spawn(agent, &arena, agent_rng(seed, stream))
        };

        let hunters: Vec<Wolf> = (0..config.hunter.count)
            .map(|_| spawn(&config.hunter.agent))
            .collect();
        let mut distractors: Vec<Wolf> = (0..config.dart_distractors.count)
            .map(|_| spawn(&config.dart_distractors.agent))
            .collect();
        distractors.extend((0..config.circle_distractors.count).map(|_| spawn(&config.circle_distractors.agent)));

        let player = Sheep::new(
            ShapeSpec::circle(config.sheep.radius, config.sheep.color),
            DVec2::ZERO,
            DVec2::ZERO,
        );

        Ok(Self {
            seed,
            arena,
            player,
            hunters,
            distractors,
            phase: SessionPhase::Running,
            face_target: config.dart_distractors.agent.face_target,
            time_ticks: 0,
        })
    }

    /// Draw list for this frame: distractors first, hunters above them,
    /// player on top.
    pub fn sprites(&self) -> Vec<Sprite<'_>> {
        let mut sprites: Vec<Sprite<'_>> = Vec::with_capacity(self.distractors.len() + self.hunters.len() + 1);
        for wolf in self.distractors.iter().chain(&self.hunters) {
            sprites.push(Sprite {
                position: wolf.pos,
                orientation: wolf.orientation().ok(),
                shape: &wolf.shape,
            });
        }
        sprites.push(Sprite {
            position: self.player.pos,
            orientation: self.player.orientation().ok(),
            shape: &self.player.shape,
        });
        sprites
    }
}

/// Advance the session by one frame.
pub fn tick(state: &mut SessionState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == SessionPhase::Finished {
        return events;
    }
    if input.quit {
        state.phase = SessionPhase::Finished;
        return events;
    }

    if input.toggle_face_target {
        state.face_target = !state.face_target;
        for wolf in state.hunters.iter_mut().chain(&mut state.distractors) {
            if wolf.shape.has_orientation() {
                wolf.face_target = state.face_target;
            }
        }
        events.push(GameEvent::FaceTargetToggled(state.face_target));
    }

    state.player.update(input.pointer_pos, &state.arena);
    let target = state.player.pos;

    for (i, hunter) in state.hunters.iter_mut().enumerate() {
        hunter.steer_toward(target);
        hunter.update(target, &state.arena);

        let reach = hunter.collision_radius() + state.player.collision_radius();
        if hunter.pos.distance(target) < reach {
            events.push(GameEvent::PlayerCaught { hunter: i });
            state.phase = SessionPhase::Finished;
        }
    }

    for wolf in &mut state.distractors {
        wolf.update(target, &state.arena);
    }

    state.time_ticks += 1;
    events
}
