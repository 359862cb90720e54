//! Match state and core simulation types
//!
//! `MatchState` owns everything one match needs: the stage, the roster, the
//! win condition, and the respawn clock. It is created from a `MatchConfig`
//! and advanced by [`super::tick::tick`].

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::gamemode::{Gamemode, Winner};
use super::hitbox::Hitbox;
use super::platform::{Platform, PlatformEffect};
use super::player::Player;
use super::scheduler::Scheduler;
use super::stage::Stage;
use super::vector::Vector2D;
use crate::tuning::{ConfigError, MatchConfig};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    GameOver,
}

/// Things that happened during a tick, for audio/visual hooks and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Drives the damage colour pulse and text particle
    Damaged { player: u8, amount: f32, is_crit: bool },
    Healed { player: u8, amount: f32 },
    Jumped { player: u8, grounded: bool },
    /// First contact with a platform after being airborne
    Landed { player: u8, speed: f32 },
    Attacked { player: u8, hits: u32 },
    GroundPoundImpact { player: u8, hits: u32 },
    SpecialUsed { player: u8 },
    Died { player: u8, killer: Option<u8> },
    Respawned { player: u8 },
    GameOver { winner: Winner },
}

#[derive(Debug)]
pub struct MatchState {
    pub config: MatchConfig,
    pub stage: Stage,
    /// Roster in slot order; player number = slot + 1
    pub players: Vec<Player>,
    pub phase: MatchPhase,
    pub winner: Option<Winner>,
    /// Simulation tick counter
    pub time_ticks: u64,
    gamemode: Box<dyn Gamemode>,
    respawns: Scheduler<usize>,
    deaths_recorded: Vec<bool>,
    rng: Pcg32,
    events: Vec<SimEvent>,
}

impl MatchState {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let stage = Stage::load(config.stage);
        let gamemode = config.gamemode.build();
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let mut spawn_order: Vec<usize> = (0..stage.spawn_points.len()).collect();
        spawn_order.shuffle(&mut rng);

        let players: Vec<Player> = (0..config.player_count)
            .map(|slot| {
                let spawn = stage.spawn_points[spawn_order[slot % spawn_order.len()]];
                let mut player = Player::new(slot as u8 + 1, spawn, &config.tuning);
                player.lives = gamemode.starting_lives();
                player
            })
            .collect();

        log::info!(
            "Match started: stage={:?}, players={}, mode={:?}, seed={}",
            config.stage,
            players.len(),
            config.gamemode,
            config.seed
        );

        Ok(Self {
            deaths_recorded: vec![false; players.len()],
            config,
            stage,
            players,
            phase: MatchPhase::Playing,
            winner: None,
            time_ticks: 0,
            gamemode,
            respawns: Scheduler::new(),
            rng,
            events: Vec::new(),
        })
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.stage.platforms
    }

    pub fn player(&self, number: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }

    pub fn gamemode(&self) -> &dyn Gamemode {
        self.gamemode.as_ref()
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Kill anyone who left the stage bounds
    pub(crate) fn enforce_blast_zone(&mut self) {
        let zone = self.stage.blast_zone;
        for player in &mut self.players {
            if !player.is_dead && !zone.contains(&player.body.pos) {
                let health = player.health;
                log::debug!("Player {} left the blast zone", player.number);
                player.take_damage(health, false);
                // a damage multiplier below 1 must not leave health behind
                if !player.is_dead {
                    player.health = 0.0;
                    player.is_dead = true;
                }
            }
        }
    }

    /// Move per-player events into the match queue
    pub(crate) fn collect_events(&mut self) {
        for player in &mut self.players {
            self.events.extend(player.drain_events());
        }
    }

    /// Credit kills and spend lives for deaths first seen this tick
    pub(crate) fn record_deaths(&mut self) {
        for index in 0..self.players.len() {
            if !self.players[index].is_dead || self.deaths_recorded[index] {
                continue;
            }
            self.deaths_recorded[index] = true;

            let victim = self.players[index].number;
            let killer = self.players[index]
                .last_hit_by
                .filter(|&number| number != victim);
            if let Some(number) = killer {
                if let Some(attacker) = self.players.iter_mut().find(|p| p.number == number) {
                    attacker.kills += 1;
                }
            }

            let player = &mut self.players[index];
            player.lives = player.lives.saturating_sub(1);
            log::info!(
                "Player {} died (killer: {:?}, lives left: {})",
                victim,
                killer,
                player.lives
            );
            self.events.push(SimEvent::Died {
                player: victim,
                killer,
            });

            if self.gamemode.allows_respawn(player.lives) {
                let delay = self.config.respawn_delay;
                log::debug!("Player {} respawns in {:.1}s", victim, delay);
                self.respawns.schedule_after(delay, index);
            }
        }
    }

    pub(crate) fn process_respawns(&mut self, dt: f32) {
        for index in self.respawns.advance(dt) {
            let spawn = self.pick_spawn();
            let player = &mut self.players[index];
            player.respawn(spawn);
            self.deaths_recorded[index] = false;
            self.events.extend(player.drain_events());
            log::info!("Player {} respawned", player.number);
        }
    }

    fn pick_spawn(&mut self) -> Vector2D {
        let points = &self.stage.spawn_points;
        points[self.rng.random_range(0..points.len())]
    }

    pub(crate) fn check_game_over(&mut self) {
        if !self.gamemode.is_game_over(&self.players) {
            return;
        }
        let winner = self.gamemode.winner_data(&self.players);
        log::info!("Game over after {} ticks: {:?}", self.time_ticks, winner);
        self.respawns.clear();
        self.phase = MatchPhase::GameOver;
        self.events.push(SimEvent::GameOver {
            winner: winner.clone(),
        });
        self.winner = Some(winner);
    }

    /// Read-only view for renderers and HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            winner: self.winner.clone(),
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            platforms: self.stage.platforms.iter().map(PlatformSnapshot::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub number: u8,
    pub pos: Vector2D,
    pub visual_offset: Vector2D,
    pub rot: f32,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    pub is_dead: bool,
    pub combo: u32,
    pub is_grounded: bool,
    pub is_phasing: bool,
    pub is_ground_pounding: bool,
    pub attack_timer: f32,
    pub special_timer: f32,
    pub damage_flash: f32,
    pub kills: u32,
    pub lives: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            number: p.number,
            pos: p.body.pos,
            visual_offset: p.visual_offset,
            rot: p.body.rot,
            width: p.hitbox.width(),
            height: p.hitbox.height(),
            health: p.health,
            max_health: p.max_health,
            is_dead: p.is_dead,
            combo: p.combo,
            is_grounded: p.is_grounded,
            is_phasing: p.is_phasing,
            is_ground_pounding: p.is_ground_pounding,
            attack_timer: p.attack_timer,
            special_timer: p.special_timer,
            damage_flash: p.damage_flash,
            kills: p.kills,
            lives: p.lives,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSnapshot {
    pub id: u32,
    pub pos: Vector2D,
    pub hitbox: Hitbox,
    pub is_phaseable: bool,
    pub is_wall: bool,
    pub is_hazard: bool,
    pub anim_time: f32,
}

impl From<&Platform> for PlatformSnapshot {
    fn from(p: &Platform) -> Self {
        Self {
            id: p.id,
            pos: p.pos,
            hitbox: p.hitbox.clone(),
            is_phaseable: p.is_phaseable,
            is_wall: p.is_wall,
            is_hazard: matches!(p.effect, PlatformEffect::Hazard { .. }),
            anim_time: p.anim_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: MatchPhase,
    pub winner: Option<Winner>,
    pub players: Vec<PlayerSnapshot>,
    pub platforms: Vec<PlatformSnapshot>,
}
