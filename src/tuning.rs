//! Data-driven game balance and match configuration
//!
//! Loaded from JSON; every field has a default so partial files work.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_PLAYERS;
use crate::sim::stage::StageId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Player count must be between 1 and {max}, got {got}")]
    PlayerCount { got: usize, max: usize },
    #[error("Tuning value `{0}` must be positive")]
    NonPositive(&'static str),
    #[error("Drag constant `{0}` must be in (0, 1]")]
    DragOutOfRange(&'static str),
}

/// Per-player balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Hitbox size (pixels)
    pub width: f32,
    pub height: f32,
    pub max_health: f32,

    /// Horizontal control acceleration (pixels/s²)
    pub move_accel: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    pub x_drag: f32,
    pub y_drag: f32,
    pub ang_drag: f32,

    /// Jump launch speed (pixels/s)
    pub jump_power: f32,
    /// Fall speed forced while ground pounding (pixels/s)
    pub ground_pound_speed: f32,

    /// Reach of a normal attack (pixels)
    pub attack_range: f32,
    pub base_damage: f32,
    /// Knockback speed given to targets (pixels/s)
    pub attack_power: f32,
    /// Seconds before attacking again at zero combo
    pub attack_cooldown: f32,
    /// Cooldown removed per combo step
    pub combo_cooldown: f32,
    pub special_cooldown: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 60.0,
            max_health: 100.0,

            move_accel: 3000.0,
            gravity: 2200.0,
            x_drag: 0.005,
            y_drag: 0.4,
            ang_drag: 0.1,

            jump_power: 900.0,
            ground_pound_speed: 1600.0,

            attack_range: 100.0,
            base_damage: 4.0,
            attack_power: 600.0,
            attack_cooldown: 0.6,
            combo_cooldown: 0.1,
            special_cooldown: 5.0,
        }
    }
}

impl PlayerTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("max_health", self.max_health),
            ("jump_power", self.jump_power),
            ("attack_range", self.attack_range),
            ("base_damage", self.base_damage),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }

        let drags = [
            ("x_drag", self.x_drag),
            ("y_drag", self.y_drag),
            ("ang_drag", self.ang_drag),
        ];
        for (name, value) in drags {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::DragOutOfRange(name));
            }
        }
        Ok(())
    }
}

/// Win condition selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamemodeConfig {
    /// First to `threshold` kills
    Kills { threshold: u32 },
    /// Last player with lives left
    Stock { lives: u32 },
}

impl Default for GamemodeConfig {
    fn default() -> Self {
        GamemodeConfig::Stock { lives: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seed for spawn assignment
    pub seed: u64,
    pub player_count: usize,
    pub stage: StageId,
    pub gamemode: GamemodeConfig,
    /// Seconds a dead player waits before respawning
    pub respawn_delay: f32,
    pub tuning: PlayerTuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_count: 2,
            stage: StageId::Battlefield,
            gamemode: GamemodeConfig::default(),
            respawn_delay: 2.0,
            tuning: PlayerTuning::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                got: self.player_count,
                max: MAX_PLAYERS,
            });
        }
        if !self.respawn_delay.is_finite() || self.respawn_delay < 0.0 {
            return Err(ConfigError::NonPositive("respawn_delay"));
        }
        self.tuning.validate()
    }
}
