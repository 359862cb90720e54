//! Position/velocity/rotation integrator with exponential drag
//!
//! Drag constants are in (0, 1]: a velocity component scales by
//! `exp(dt * ln(drag))` per update, so `1.0` never decays and values near
//! zero decay almost instantly.

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub pos: Vector2D,
    pub vel: Vector2D,
    pub rot: f32,
    pub ang_vel: f32,
    pub x_drag: f32,
    pub y_drag: f32,
    pub ang_drag: f32,
    pub elasticity: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            pos: Vector2D::zero(),
            vel: Vector2D::zero(),
            rot: 0.0,
            ang_vel: 0.0,
            x_drag: 1.0,
            y_drag: 1.0,
            ang_drag: 1.0,
            elasticity: 0.0,
        }
    }
}

/// Per-update decay factor for a drag constant
#[inline]
pub fn drag_factor(drag: f32, dt: f32) -> f32 {
    (dt * drag.ln()).exp()
}

impl PhysicsBody {
    pub fn at(pos: Vector2D) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    pub fn with_drag(mut self, x_drag: f32, y_drag: f32, ang_drag: f32) -> Self {
        self.x_drag = x_drag;
        self.y_drag = y_drag;
        self.ang_drag = ang_drag;
        self
    }

    /// Advance by `dt` seconds. `dt` must be positive and already clamped.
    pub fn update(&mut self, dt: f32) {
        let step = Vector2D::xy(self.vel.x * dt, self.vel.y * dt);
        self.pos.add_in_place(&step);
        self.vel
            .scale_by(drag_factor(self.x_drag, dt), Some(drag_factor(self.y_drag, dt)));

        self.rot += self.ang_vel * dt;
        self.ang_vel *= drag_factor(self.ang_drag, dt);
    }
}
