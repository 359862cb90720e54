//! Fixed timestep simulation tick
//!
//! One call advances the whole match by `dt` seconds in a fixed order:
//! platform-player collisions, platform motion, player updates (slot
//! order), blast zone, death bookkeeping, respawns, then the win check.

use super::collision::resolve_platform_player_collisions;
use super::hitbox::CollisionError;
use super::input::TickInput;
use super::player::split_roster;
use super::state::{MatchPhase, MatchState};
use crate::consts::*;

/// Advance the match by one step
///
/// Non-positive or non-finite `dt` is ignored and large steps are clamped
/// to [`MAX_DT`]. An unsupported hitbox pair aborts the tick with the error.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) -> Result<(), CollisionError> {
    if state.phase == MatchPhase::GameOver {
        return Ok(());
    }
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Ignoring tick with dt={}", dt);
        return Ok(());
    }
    if dt > MAX_DT {
        log::debug!("Clamping dt {:.3} to {:.3}", dt, MAX_DT);
    }
    let dt = dt.min(MAX_DT);

    state.time_ticks += 1;

    // Grounding is re-derived from this tick's contacts
    for player in &mut state.players {
        player.is_grounded = false;
    }
    resolve_platform_player_collisions(&state.stage.platforms, &mut state.players)?;

    // Move kinematic platforms
    for platform in &mut state.stage.platforms {
        platform.update(dt);
    }

    // Players act in slot order
    for slot in 0..state.players.len() {
        let controls = input.for_slot(slot);
        let (player, mut opponents) = split_roster(&mut state.players, slot);
        player.update(dt, &controls, &mut opponents);
    }

    // Match bookkeeping
    state.enforce_blast_zone();
    state.collect_events();
    state.record_deaths();
    state.process_respawns(dt);
    // Check win condition
    state.check_game_over();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gamemode::Winner;
    use crate::sim::hitbox::Hitbox;
    use crate::sim::input::{Control, ControlState};
    use crate::sim::state::SimEvent;
    use crate::sim::vector::Vector2D;
    use crate::tuning::{GamemodeConfig, MatchConfig};

    fn new_match(gamemode: GamemodeConfig) -> MatchState {
        MatchState::new(MatchConfig {
            seed: 12345,
            player_count: 2,
            gamemode,
            ..Default::default()
        })
        .unwrap()
    }

    fn run(state: &mut MatchState, input: &TickInput, ticks: usize) {
        for _ in 0..ticks {
            tick(state, input, SIM_DT).unwrap();
        }
    }

    fn knock_out(state: &mut MatchState, slot: usize, by: u8) {
        state.players[slot].last_hit_by = Some(by);
        state.players[slot].body.pos = Vector2D::xy(0.0, 5000.0);
    }

    #[test]
    fn test_idle_players_settle_on_platforms() {
        let mut state = MatchState::new(MatchConfig {
            seed: 4,
            player_count: 4,
            ..Default::default()
        })
        .unwrap();
        run(&mut state, &TickInput::default(), 200);

        let events = state.drain_events();
        for player in &state.players {
            assert!(player.is_grounded, "player {} airborne", player.number);
            assert!(!player.is_dead);
            let landings = events
                .iter()
                .filter(|e| matches!(e, SimEvent::Landed { player: n, .. } if *n == player.number))
                .count();
            assert_eq!(landings, 1);
        }
        assert_eq!(state.time_ticks, 200);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_match(GamemodeConfig::default());
        let mut state2 = new_match(GamemodeConfig::default());

        let mut inputs = Vec::new();
        for i in 0..240 {
            let mut input = TickInput::default();
            input.players[0] = ControlState::default().with(Control::Right);
            if i % 20 == 0 {
                input.players[0].set(Control::Attack, true);
                input.players[1].set(Control::Jump, true);
            }
            if i % 45 == 0 {
                input.players[1].set(Control::Special, true);
            }
            inputs.push(input);
        }

        for input in &inputs {
            tick(&mut state1, input, SIM_DT).unwrap();
            tick(&mut state2, input, SIM_DT).unwrap();
        }

        let a = serde_json::to_string(&state1.snapshot()).unwrap();
        let b = serde_json::to_string(&state2.snapshot()).unwrap();
        assert_eq!(a, b);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut state = new_match(GamemodeConfig::default());
        let before = state.players[0].body.pos;
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            tick(&mut state, &TickInput::default(), dt).unwrap();
        }
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.players[0].body.pos, before);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut slow = new_match(GamemodeConfig::default());
        let mut clamped = new_match(GamemodeConfig::default());
        tick(&mut slow, &TickInput::default(), 1.0).unwrap();
        tick(&mut clamped, &TickInput::default(), MAX_DT).unwrap();
        assert_eq!(slow.players[0].body.pos, clamped.players[0].body.pos);
        assert_eq!(slow.players[0].body.vel, clamped.players[0].body.vel);
    }

    #[test]
    fn test_input_routes_by_slot() {
        let mut state = new_match(GamemodeConfig::default());
        let mut input = TickInput::default();
        input.players[1] = ControlState::default().with(Control::Left);
        tick(&mut state, &input, SIM_DT).unwrap();
        assert_eq!(state.players[0].body.vel.x, 0.0);
        assert!(state.players[1].body.vel.x < 0.0);
    }

    #[test]
    fn test_attack_through_tick_emits_events() {
        let mut state = new_match(GamemodeConfig::default());
        let pos = state.players[0].body.pos;
        state.players[1].body.pos = Vector2D::xy(pos.x + 50.0, pos.y);

        let mut input = TickInput::default();
        input.players[0] = ControlState::default().with(Control::Attack);
        tick(&mut state, &input, SIM_DT).unwrap();

        let events = state.drain_events();
        assert!(events.contains(&SimEvent::Attacked { player: 1, hits: 1 }));
        assert!(events.iter().any(|e| matches!(e, SimEvent::Damaged { player: 2, .. })));
        assert_eq!(state.players[1].last_hit_by, Some(1));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_blast_zone_death_credits_and_respawns() {
        let mut state = new_match(GamemodeConfig::default());
        knock_out(&mut state, 1, 1);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        assert!(state.players[1].is_dead);
        assert_eq!(state.players[0].kills, 1);
        assert_eq!(state.players[1].lives, 2);
        assert!(state.drain_events().contains(&SimEvent::Died {
            player: 2,
            killer: Some(1),
        }));

        run(&mut state, &TickInput::default(), 140);
        assert!(!state.players[1].is_dead);
        assert_eq!(state.players[1].lives, 2);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert!(state.drain_events().contains(&SimEvent::Respawned { player: 2 }));
    }

    #[test]
    fn test_self_destruct_credits_nobody() {
        let mut state = new_match(GamemodeConfig::default());
        state.players[0].body.pos = Vector2D::xy(0.0, -5000.0);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        assert!(state.players[0].is_dead);
        assert_eq!(state.players[1].kills, 0);
    }

    #[test]
    fn test_stock_match_ends_when_one_player_has_lives() {
        let mut state = new_match(GamemodeConfig::Stock { lives: 1 });
        knock_out(&mut state, 1, 1);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(state.winner, Some(Winner::Player(1)));
        assert!(state.drain_events().contains(&SimEvent::GameOver {
            winner: Winner::Player(1),
        }));

        // frozen from here on
        let ticks = state.time_ticks;
        run(&mut state, &TickInput::default(), 10);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.players[1].is_dead);
    }

    #[test]
    fn test_kills_match_ends_at_threshold() {
        let mut state = new_match(GamemodeConfig::Kills { threshold: 2 });
        knock_out(&mut state, 1, 1);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        assert_eq!(state.phase, MatchPhase::Playing);

        run(&mut state, &TickInput::default(), 140);
        assert!(!state.players[1].is_dead);
        knock_out(&mut state, 1, 1);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        assert_eq!(state.players[0].kills, 2);
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(state.winner, Some(Winner::Player(1)));
    }

    #[test]
    fn test_unsupported_hitbox_aborts_tick() {
        let mut state = new_match(GamemodeConfig::default());
        // settle first so the player is in contact with a platform
        run(&mut state, &TickInput::default(), 100);
        state.players[0].hitbox = Hitbox::Circle {
            offset: Vector2D::zero(),
            r: 30.0,
        };
        assert!(tick(&mut state, &TickInput::default(), SIM_DT).is_err());
    }
}
