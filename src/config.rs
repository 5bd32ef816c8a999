//! Session configuration
//!
//! Everything is loaded once at startup, validated, and passed into the
//! session by value; nothing in the core reads ambient global state. The
//! arena half-extents are derived here from the physical monitor description
//! the same way the stimulus toolkit does it: pixels → centimeters on the
//! screen → degrees of visual angle at the viewing distance, minus a margin
//! so agent shapes never poke past the screen edge.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;
use crate::sim::{AgentConfig, Arena, Color, DirectionPolicy, ShapeSpec};

/// Centimeters subtended by one degree of visual angle at 1 cm distance
/// (tan of 1°; the toolkit's linearized conversion constant).
const CM_PER_DEG_CM: f64 = 0.017455;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive, got {width:.3} x {height:.3} deg")]
    NonPositiveArena { width: f64, height: f64 },
    #[error("{kind}: speed must be positive, got {speed}")]
    NonPositiveSpeed { kind: &'static str, speed: f64 },
    #[error("{kind}: {dimension} must be positive, got {value}")]
    NonPositiveShape {
        kind: &'static str,
        dimension: &'static str,
        value: f64,
    },
    #[error("{kind}: dart outline needs at least 3 vertices")]
    DegenerateDart { kind: &'static str },
    #[error("{kind}: direction noise must not be negative, got {noise}")]
    NegativeNoise { kind: &'static str, noise: f64 },
    #[error("{kind}: resample window must be positive, got {window}")]
    NonPositiveWindow { kind: &'static str, window: f64 },
    #[error("{kind}: resample interval [{min}, {max}) is empty or starts at 0")]
    BadInterval {
        kind: &'static str,
        min: u32,
        max: u32,
    },
    #[error("monitor description must be positive")]
    BadMonitor,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Physical monitor description, used once to derive the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width_cm: f64,
    pub viewing_distance_cm: f64,
    pub resolution_px: (u32, u32),
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width_cm: consts::MONITOR_WIDTH_CM,
            viewing_distance_cm: consts::VIEWING_DISTANCE_CM,
            resolution_px: consts::RESOLUTION_PX,
        }
    }
}

impl DisplayConfig {
    /// Degrees of visual angle spanned by `px` pixels along the width axis.
    fn pix_to_deg(&self, px: f64) -> f64 {
        let cm = px * self.width_cm / self.resolution_px.0 as f64;
        cm / (self.viewing_distance_cm * CM_PER_DEG_CM)
    }
}

/// One kind of autonomous agent plus how many of it to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WolfConfig {
    pub count: usize,
    #[serde(flatten)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheepConfig {
    pub radius: f64,
    pub color: Color,
}

impl Default for SheepConfig {
    fn default() -> Self {
        Self {
            radius: consts::SHEEP_RADIUS,
            color: consts::COLOR_WHITE,
        }
    }
}

/// Key binding strings, passed through to the input layer uninterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub quit: Vec<String>,
    pub toggle_condition: Vec<String>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: vec!["escape".into()],
            toggle_condition: vec!["space".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub sheep: SheepConfig,
    /// Heat-seeking circle, visually identical to the circle distractors
    pub hunter: WolfConfig,
    pub dart_distractors: WolfConfig,
    pub circle_distractors: WolfConfig,
    pub keys: KeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::demo()
    }
}

impl Config {
    /// The calibration demo: eight jittering red darts, no hunter.
    pub fn demo() -> Self {
        Self {
            display: DisplayConfig::default(),
            sheep: SheepConfig::default(),
            hunter: WolfConfig {
                count: 0,
                agent: Self::hunter_agent(),
            },
            dart_distractors: WolfConfig {
                count: 8,
                agent: AgentConfig {
                    speed: consts::WOLF_SPEED,
                    shape: ShapeSpec::dart(consts::WOLF_SIZE, consts::COLOR_RED),
                    face_target: true,
                    direction: DirectionPolicy::Jitter {
                        noise: consts::DIRECTION_NOISE,
                    },
                },
            },
            circle_distractors: WolfConfig {
                count: 0,
                agent: Self::circle_agent(),
            },
            keys: KeyConfig::default(),
        }
    }

    /// The task proper: one hunter hidden among circle distractors, plus
    /// blue darts whose facing condition the space bar toggles.
    pub fn dont_get_caught() -> Self {
        Self {
            display: DisplayConfig::default(),
            sheep: SheepConfig::default(),
            hunter: WolfConfig {
                count: 1,
                agent: Self::hunter_agent(),
            },
            dart_distractors: WolfConfig {
                count: 6,
                agent: AgentConfig {
                    speed: consts::WOLF_SPEED,
                    shape: ShapeSpec::dart(consts::WOLF_SIZE, consts::COLOR_BLUE),
                    face_target: true,
                    direction: DirectionPolicy::WindowedResample {
                        window: consts::DIRECTION_UPDATE_WINDOW,
                        interval: consts::DIRECTION_UPDATE_INTERVAL,
                    },
                },
            },
            circle_distractors: WolfConfig {
                count: 4,
                agent: Self::circle_agent(),
            },
            keys: KeyConfig::default(),
        }
    }

    fn hunter_agent() -> AgentConfig {
        AgentConfig {
            speed: 0.08,
            shape: ShapeSpec::circle(consts::SHEEP_RADIUS, consts::COLOR_RED),
            face_target: true,
            direction: DirectionPolicy::WindowedResample {
                window: consts::DIRECTION_UPDATE_WINDOW,
                interval: consts::DIRECTION_UPDATE_INTERVAL,
            },
        }
    }

    fn circle_agent() -> AgentConfig {
        // Same look and motion as the hunter, so the hunter is nondescript
        Self::hunter_agent()
    }

    /// Load a JSON config file; missing fields fall back to the demo preset.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn wolf_kinds(&self) -> [(&'static str, &WolfConfig); 3] {
        [
            ("hunter", &self.hunter),
            ("dart_distractors", &self.dart_distractors),
            ("circle_distractors", &self.circle_distractors),
        ]
    }

    /// Fatal pre-session checks; the frame loop never starts on any error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width_cm <= 0.0
            || self.display.viewing_distance_cm <= 0.0
            || self.display.resolution_px.0 == 0
            || self.display.resolution_px.1 == 0
        {
            return Err(ConfigError::BadMonitor);
        }
        if self.sheep.radius <= 0.0 {
            return Err(ConfigError::NonPositiveShape {
                kind: "sheep",
                dimension: "radius",
                value: self.sheep.radius,
            });
        }

        for (kind, wolf) in self.wolf_kinds() {
            if wolf.count == 0 {
                continue;
            }
            let agent = &wolf.agent;
            if agent.speed <= 0.0 {
                return Err(ConfigError::NonPositiveSpeed {
                    kind,
                    speed: agent.speed,
                });
            }
            match &agent.shape {
                ShapeSpec::Circle { radius, .. } => {
                    if *radius <= 0.0 {
                        return Err(ConfigError::NonPositiveShape {
                            kind,
                            dimension: "radius",
                            value: *radius,
                        });
                    }
                }
                ShapeSpec::Dart { vertices, size, .. } => {
                    if *size <= 0.0 {
                        return Err(ConfigError::NonPositiveShape {
                            kind,
                            dimension: "size",
                            value: *size,
                        });
                    }
                    if vertices.len() < 3 {
                        return Err(ConfigError::DegenerateDart { kind });
                    }
                }
            }
            match agent.direction {
                DirectionPolicy::Jitter { noise } => {
                    if noise < 0.0 {
                        return Err(ConfigError::NegativeNoise { kind, noise });
                    }
                }
                DirectionPolicy::WindowedResample {
                    window,
                    interval: (min, max),
                } => {
                    if window <= 0.0 {
                        return Err(ConfigError::NonPositiveWindow { kind, window });
                    }
                    if min == 0 || min >= max {
                        return Err(ConfigError::BadInterval { kind, min, max });
                    }
                }
            }
        }
        Ok(())
    }

    /// Half-extents of the play area, in degrees of visual angle.
    ///
    /// The screen's angular half-size shrinks by the largest configured
    /// agent half-size, so no shape is ever drawn past the screen edge.
    pub fn arena(&self) -> Result<Arena, ConfigError> {
        let width_deg = self.display.pix_to_deg(self.display.resolution_px.0 as f64);
        let height_deg = self.display.pix_to_deg(self.display.resolution_px.1 as f64);

        let margin = self
            .wolf_kinds()
            .iter()
            .filter(|(_, wolf)| wolf.count > 0)
            .map(|(_, wolf)| wolf.agent.shape.collision_radius())
            .fold(0.0f64, f64::max);

        let half_width = width_deg / 2.0 - margin;
        let half_height = height_deg / 2.0 - margin;
        if half_width <= 0.0 || half_height <= 0.0 {
            return Err(ConfigError::NonPositiveArena {
                width: half_width,
                height: half_height,
            });
        }
        Ok(Arena::new(half_width, half_height))
    }
}
