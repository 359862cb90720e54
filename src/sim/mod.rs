//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation-clock timers only, never wall-clock
//! - Seeded RNG only
//! - Stable iteration order (by player slot, then platform order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod gamemode;
pub mod hitbox;
pub mod input;
pub mod platform;
pub mod player;
pub mod scheduler;
pub mod stage;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::PhysicsBody;
pub use collision::resolve_platform_player_collisions;
pub use gamemode::{Gamemode, Kills, Stock, Winner};
pub use hitbox::{CollisionError, Hitbox, ShapeKind, is_colliding};
pub use input::{Control, ControlState, InputSource, PointerButton, TickInput};
pub use platform::{Platform, PlatformEffect, PlatformMotion};
pub use player::{Modifiers, Opponents, Player, split_roster};
pub use scheduler::{Scheduler, TimerHandle};
pub use stage::{Bounds, Stage, StageId};
pub use state::{MatchPhase, MatchState, SimEvent, Snapshot};
pub use tick::tick;
pub use vector::Vector2D;
