//! Platform-player collision pass
//!
//! Non-wall platforms are one-way: a body that is rising, or whose centre is
//! already below the platform's top surface, skips the geometric test so a
//! player can never be pushed up through a floor from below. Walls are
//! always tested. Both callbacks fire on every tick the overlap persists.

use super::hitbox::{CollisionError, is_colliding};
use super::platform::Platform;
use super::player::{Player, split_roster};

/// True when the one-way filter lets `player`'s body pass `platform` untested
#[inline]
fn passes_through(platform: &Platform, vel_y: f32, pos_y: f32) -> bool {
    !platform.is_wall && (vel_y < 0.0 || pos_y > platform.surface_y())
}

pub fn resolve_platform_player_collisions(
    platforms: &[Platform],
    players: &mut [Player],
) -> Result<(), CollisionError> {
    for index in 0..players.len() {
        let (player, mut opponents) = split_roster(players, index);
        for platform in platforms {
            for body_index in 0..player.bodies().len() {
                let body = &player.bodies()[body_index];
                if passes_through(platform, body.vel.y, body.pos.y) {
                    continue;
                }
                if !is_colliding(&body.pos, &player.hitbox, &platform.pos, &platform.hitbox)? {
                    continue;
                }
                platform.on_collision(player, body_index);
                player.on_platform_collision(platform, body_index, &mut opponents);
            }
        }
    }
    Ok(())
}
