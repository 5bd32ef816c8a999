//! Deterministic agent simulation
//!
//! All task behavior lives here. This module must stay pure and deterministic:
//! - One update per agent per frame
//! - Seeded RNG only, one independent stream per agent
//! - Stable agent order (spawn order)
//! - No rendering or platform dependencies

pub mod agent;
pub mod arena;
pub mod heading;
pub mod tick;

pub use agent::{AgentConfig, Color, ShapeError, ShapeSpec, Sheep, Wolf};
pub use arena::Arena;
pub use heading::{AngleUnits, DirectionModel, DirectionPolicy, facing_angle};
pub use tick::{GameEvent, SessionPhase, SessionState, Sprite, TickInput, tick};
