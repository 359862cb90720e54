//! Brawl Sim entry point
//!
//! Native builds run a headless match between scripted bots and log the
//! result. Usage: `brawl-sim [config.json]`. The browser build drives the
//! library through `web::WebMatch` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use brawl_sim::MatchConfig;
    use brawl_sim::consts::*;
    use brawl_sim::sim::{Control, ControlState, MatchPhase, MatchState, Player, TickInput, tick};

    /// Five simulated minutes
    const TICK_LIMIT: u64 = 66 * 60 * 5;

    /// Chase the nearest living opponent and swing when close
    fn bot_controls(state: &MatchState, slot: usize) -> ControlState {
        let me = &state.players[slot];
        let mut controls = ControlState::default();
        if me.is_dead {
            return controls;
        }

        let target = state
            .players
            .iter()
            .filter(|p| p.number != me.number && !p.is_dead)
            .min_by(|a, b| {
                let da = me.body.pos.squared_distance(&a.body.pos);
                let db = me.body.pos.squared_distance(&b.body.pos);
                da.total_cmp(&db)
            });
        let Some(target) = target else {
            return controls;
        };

        let delta = target.body.pos.subtract(&me.body.pos);
        if delta.x < -10.0 {
            controls.set(Control::Left, true);
        } else if delta.x > 10.0 {
            controls.set(Control::Right, true);
        }
        // y grows downward
        if delta.y < -80.0 {
            controls.set(Control::Jump, true);
        } else if delta.y > 80.0 && me.is_grounded {
            controls.set(Control::Phase, true);
        } else if delta.y > 40.0 && delta.x.abs() < 60.0 {
            controls.set(Control::Down, true);
        }

        if delta.magnitude() < me.stats.attack_range {
            controls.set(Control::Attack, true);
        }
        if is_hurt(me) {
            controls.set(Control::Special, true);
        }
        controls
    }

    fn is_hurt(player: &Player) -> bool {
        player.health < player.max_health * 0.4
    }

    fn load_config() -> Result<MatchConfig, Box<dyn Error>> {
        match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading match config from {}", path);
                let json = std::fs::read_to_string(&path)?;
                Ok(MatchConfig::from_json(&json)?)
            }
            None => Ok(MatchConfig::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let config = load_config()?;
        let mut state = MatchState::new(config)?;

        while state.phase == MatchPhase::Playing && state.time_ticks < TICK_LIMIT {
            let mut input = TickInput::default();
            for slot in 0..state.players.len() {
                input.players[slot] = bot_controls(&state, slot);
            }
            tick(&mut state, &input, SIM_DT)?;

            for event in state.drain_events() {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }
        }

        match &state.winner {
            Some(winner) => log::info!("Winner: {:?}", winner),
            None => log::info!("No result after {} ticks", state.time_ticks),
        }
        for player in &state.players {
            log::info!(
                "Player {}: kills={} lives={} health={:.1}",
                player.number,
                player.kills,
                player.lives,
                player.health
            );
        }
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brawl Sim (native) starting...");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
