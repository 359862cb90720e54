//! Stage geometry
//!
//! Platforms are built once per stage load. Kinematic platforms move along a
//! fixed path in `update`; everything else they carry is either collision
//! data or cosmetic animation state.

use serde::{Deserialize, Serialize};

use super::hitbox::Hitbox;
use super::player::Player;
use super::vector::Vector2D;

/// What touching the platform does to a player, on top of landing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlatformEffect {
    #[default]
    Inert,
    /// Damage applied every tick of contact
    Hazard { damage: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlatformMotion {
    #[default]
    Static,
    /// Sine sweep of `extent` around `origin`, one cycle per `period` seconds
    Oscillate {
        origin: Vector2D,
        extent: Vector2D,
        period: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vector2D,
    /// Always a rectangle
    pub hitbox: Hitbox,
    pub is_phaseable: bool,
    pub is_wall: bool,
    #[serde(default)]
    pub effect: PlatformEffect,
    #[serde(default)]
    pub motion: PlatformMotion,
    /// Seconds since the stage loaded (drives motion and shimmer)
    #[serde(skip)]
    pub anim_time: f32,
}

impl Platform {
    /// Solid floor centred on `pos`
    pub fn solid(id: u32, pos: Vector2D, w: f32, h: f32) -> Self {
        Self {
            id,
            pos,
            hitbox: Hitbox::rect(w, h),
            is_phaseable: false,
            is_wall: false,
            effect: PlatformEffect::Inert,
            motion: PlatformMotion::Static,
            anim_time: 0.0,
        }
    }

    /// Thin platform players can drop through
    pub fn phaseable(id: u32, pos: Vector2D, w: f32, h: f32) -> Self {
        Self {
            is_phaseable: true,
            ..Self::solid(id, pos, w, h)
        }
    }

    pub fn wall(id: u32, pos: Vector2D, w: f32, h: f32) -> Self {
        Self {
            is_wall: true,
            ..Self::solid(id, pos, w, h)
        }
    }

    pub fn with_effect(mut self, effect: PlatformEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Make the platform sweep around its current position
    pub fn oscillating(mut self, extent: Vector2D, period: f32) -> Self {
        self.motion = PlatformMotion::Oscillate {
            origin: self.pos,
            extent,
            period,
        };
        self
    }

    /// World-space y of the walkable top surface
    #[inline]
    pub fn surface_y(&self) -> f32 {
        self.hitbox.top(&self.pos)
    }

    pub fn update(&mut self, dt: f32) {
        self.anim_time += dt;
        if let PlatformMotion::Oscillate {
            origin,
            extent,
            period,
        } = self.motion
        {
            if period > 0.0 {
                let s = (std::f32::consts::TAU * self.anim_time / period).sin();
                let mut pos = extent;
                pos.scale_by(s, None).add_in_place(&origin);
                self.pos = pos;
            }
        }
    }

    /// Platform side of a contact; runs before the player's own response
    pub fn on_collision(&self, player: &mut Player, _body_index: usize) {
        match self.effect {
            PlatformEffect::Inert => {}
            PlatformEffect::Hazard { damage } => {
                if !player.is_dead {
                    player.take_damage(damage, false);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PlayerTuning;

    #[test]
    fn test_surface_y() {
        let p = Platform::solid(1, Vector2D::xy(0.0, 500.0), 800.0, 40.0);
        assert_eq!(p.surface_y(), 480.0);
    }

    #[test]
    fn test_static_platform_stays_put() {
        let mut p = Platform::solid(1, Vector2D::xy(10.0, 20.0), 100.0, 10.0);
        p.update(1.0);
        assert_eq!(p.pos, Vector2D::xy(10.0, 20.0));
        assert_eq!(p.anim_time, 1.0);
    }

    #[test]
    fn test_oscillating_platform_sweeps() {
        let mut p = Platform::solid(1, Vector2D::xy(0.0, 100.0), 100.0, 10.0)
            .oscillating(Vector2D::xy(200.0, 0.0), 4.0);
        p.update(1.0);
        assert!((p.pos.x - 200.0).abs() < 1e-3);
        assert!((p.pos.y - 100.0).abs() < 1e-3);
        p.update(2.0);
        assert!((p.pos.x + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_hazard_damages_on_contact() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(1, Vector2D::zero(), &tuning);
        let lava = Platform::solid(1, Vector2D::zero(), 100.0, 10.0)
            .with_effect(PlatformEffect::Hazard { damage: 5.0 });

        lava.on_collision(&mut player, 0);
        assert_eq!(player.health, tuning.max_health - 5.0);
    }

    #[test]
    fn test_inert_platform_does_nothing() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(1, Vector2D::zero(), &tuning);
        let floor = Platform::solid(1, Vector2D::zero(), 100.0, 10.0);

        floor.on_collision(&mut player, 0);
        assert_eq!(player.health, tuning.max_health);
    }
}
