//! Brawl Sim - simulation core for a local-multiplayer platform fighter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, game state)
//! - `tuning`: Data-driven game balance and match configuration
//! - `web`: Browser bindings (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tuning::{ConfigError, GamemodeConfig, MatchConfig, PlayerTuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (66 Hz)
    pub const SIM_DT: f32 = 1.0 / 66.0;
    /// Largest dt a single tick may integrate (25 FPS equivalent)
    pub const MAX_DT: f32 = 1.0 / 25.0;
    /// Maximum fixed steps per frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Maximum supported players per match
    pub const MAX_PLAYERS: usize = 4;

    /// Knockback vectors are clamped to this magnitude before modifiers
    pub const MAX_KNOCKBACK: f32 = 3000.0;

    /// Jump re-enable delay after a jump (seconds)
    pub const JUMP_REENABLE_DELAY: f32 = 0.2;
    /// Grounded jumps get this power bonus
    pub const GROUND_JUMP_BONUS: f32 = 1.25;
    /// Double jumps restored on landing
    pub const MAX_DOUBLE_JUMPS: u32 = 2;

    /// How long a phase lasts (seconds)
    pub const PHASE_DURATION: f32 = 0.5;

    /// Attack button debounce (seconds)
    pub const ATTACK_DEBOUNCE: f32 = 0.15;
    /// Damage bonus per combo step
    pub const COMBO_DAMAGE_STEP: f32 = 0.5;
    /// Ground pound impact damage divisor
    pub const GROUND_POUND_DAMAGE_DIVISOR: f32 = 4.0;

    /// Heal pulses scheduled by the special
    pub const HEAL_PULSES: u32 = 5;
    /// Seconds between heal pulses
    pub const HEAL_PULSE_INTERVAL: f32 = 1.0;
    /// Health restored per pulse (before clamping to max)
    pub const HEAL_PER_PULSE: f32 = 4.0;

    /// Damage flash duration (cosmetic)
    pub const DAMAGE_FLASH_DURATION: f32 = 0.3;
    /// Landing visual offset decay rate (cosmetic, per second)
    pub const VISUAL_OFFSET_DECAY: f32 = 0.0001;
}
