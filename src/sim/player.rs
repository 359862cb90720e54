//! Player actor: movement, jumping, phasing, combat and healing
//!
//! Ability state is a set of independent flags rather than one exclusive
//! enum; a player can be phasing while its attack cools down, for example.
//! Every delayed transition (jump re-enable, phase expiry, cooldowns, heal
//! pulses) is a [`PlayerTimer`] on the player's own simulation-clock
//! scheduler.

use serde::{Deserialize, Serialize};

use super::body::{PhysicsBody, drag_factor};
use super::hitbox::{Hitbox, rect_penetration};
use super::input::{Control, InputSource, PointerButton};
use super::platform::Platform;
use super::scheduler::{Scheduler, TimerHandle};
use super::state::SimEvent;
use super::vector::Vector2D;
use crate::consts::*;
use crate::tuning::PlayerTuning;

/// Deferred player transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTimer {
    ReenableJump,
    EndPhase,
    AttackDebounceEnd,
    AttackCooldownEnd,
    SpecialCooldownEnd,
    HealPulse,
}

/// Pluggable multipliers for buffs and character classes (all default 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub speed: f32,
    pub jump: f32,
    pub attack_range: f32,
    /// Scales damage this player receives
    pub damage: f32,
    pub heal: f32,
    /// Scales knockback this player receives
    pub incoming_kb: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            jump: 1.0,
            attack_range: 1.0,
            damage: 1.0,
            heal: 1.0,
            incoming_kb: 1.0,
        }
    }
}

/// Every other player in the roster, borrowed mutably for targeting
pub struct Opponents<'a> {
    before: &'a mut [Player],
    after: &'a mut [Player],
}

impl<'a> Opponents<'a> {
    /// An empty roster (solo play and tests)
    pub fn none() -> Opponents<'static> {
        Opponents {
            before: &mut [],
            after: &mut [],
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrow player `index` mutably alongside everyone else
pub fn split_roster(players: &mut [Player], index: usize) -> (&mut Player, Opponents<'_>) {
    let (before, rest) = players.split_at_mut(index);
    let (head, after) = rest.split_at_mut(1);
    (&mut head[0], Opponents { before, after })
}

#[derive(Debug, Clone)]
pub struct Player {
    /// 1..=4
    pub number: u8,
    pub body: PhysicsBody,
    pub hitbox: Hitbox,
    pub stats: PlayerTuning,
    pub modifiers: Modifiers,

    pub health: f32,
    pub max_health: f32,
    pub is_dead: bool,
    pub combo: u32,

    pub is_grounded: bool,
    pub can_jump: bool,
    pub double_jump_count: u32,
    pub is_phasing: bool,
    pub is_ground_pounding: bool,

    pub can_attack: bool,
    pub attack_debounce: bool,
    pub attack_cooling_down: bool,
    pub special_cooling_down: bool,
    /// Seconds left on the attack cooldown (for HUD)
    pub attack_timer: f32,
    /// Seconds left on the special cooldown (for HUD)
    pub special_timer: f32,

    /// Match bookkeeping
    pub kills: u32,
    pub lives: u32,
    pub last_hit_by: Option<u8>,

    /// Cosmetic: seconds left on the damage colour pulse
    pub damage_flash: f32,
    /// Cosmetic: draw offset absorbing landing snaps
    pub visual_offset: Vector2D,

    was_grounded: bool,
    jump_timer: Option<TimerHandle>,
    phase_timer: Option<TimerHandle>,
    timers: Scheduler<PlayerTimer>,
    events: Vec<SimEvent>,
}

impl Player {
    pub fn new(number: u8, spawn: Vector2D, stats: &PlayerTuning) -> Self {
        let body = PhysicsBody::at(spawn).with_drag(stats.x_drag, stats.y_drag, stats.ang_drag);
        Self {
            number,
            body,
            hitbox: Hitbox::rect(stats.width, stats.height),
            stats: stats.clone(),
            modifiers: Modifiers::default(),
            health: stats.max_health,
            max_health: stats.max_health,
            is_dead: false,
            combo: 0,
            is_grounded: false,
            can_jump: true,
            double_jump_count: MAX_DOUBLE_JUMPS,
            is_phasing: false,
            is_ground_pounding: false,
            can_attack: true,
            attack_debounce: false,
            attack_cooling_down: false,
            special_cooling_down: false,
            attack_timer: 0.0,
            special_timer: 0.0,
            kills: 0,
            lives: 0,
            last_hit_by: None,
            damage_flash: 0.0,
            visual_offset: Vector2D::zero(),
            was_grounded: false,
            jump_timer: None,
            phase_timer: None,
            timers: Scheduler::new(),
            events: Vec::new(),
        }
    }

    /// Physics bodies owned by this player (currently always one)
    pub fn bodies(&self) -> &[PhysicsBody] {
        std::slice::from_ref(&self.body)
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of deferred transitions still pending
    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// One simulation step: timers, input, forces, integration, cosmetics
    pub fn update(&mut self, dt: f32, input: &dyn InputSource, opponents: &mut Opponents) {
        // Fire due timers before reading input
        self.advance_timers(dt);

        // Dead players only fall
        if !self.is_dead {
            self.apply_input(dt, input, opponents);
        }

        // Gravity and ground-pound fast fall
        self.body.vel.y += self.stats.gravity * dt;
        if self.is_ground_pounding {
            self.body.vel.y = self.body.vel.y.max(self.stats.ground_pound_speed);
        }
        self.body.update(dt);

        // Cosmetics decay even while dead
        self.decay_cosmetics(dt);
        self.was_grounded = self.is_grounded;
    }

    fn apply_input(&mut self, dt: f32, input: &dyn InputSource, opponents: &mut Opponents) {
        // Horizontal movement
        let mut dir = 0.0;
        if input.is_control_active(Control::Left) {
            dir -= 1.0;
        }
        if input.is_control_active(Control::Right) {
            dir += 1.0;
        }
        self.body.vel.x += dir * self.stats.move_accel * self.modifiers.speed * dt;

        if input.is_control_active(Control::Jump) {
            self.jump();
        }
        if input.is_control_active(Control::Phase) {
            self.phase();
        }
        if input.is_control_active(Control::Down) && !self.is_grounded {
            self.ground_pound();
        }
        if input.is_control_active(Control::Attack)
            || input.is_pointer_button_active(PointerButton::Primary)
        {
            self.attack(false, opponents);
        }
        if input.is_control_active(Control::Special)
            || input.is_pointer_button_active(PointerButton::Secondary)
        {
            self.special();
        }
    }

    fn advance_timers(&mut self, dt: f32) {
        for timer in self.timers.advance(dt) {
            match timer {
                PlayerTimer::ReenableJump => {
                    self.can_jump = true;
                    self.jump_timer = None;
                }
                PlayerTimer::EndPhase => {
                    self.is_phasing = false;
                    self.phase_timer = None;
                }
                PlayerTimer::AttackDebounceEnd => self.attack_debounce = false,
                PlayerTimer::AttackCooldownEnd => {
                    self.attack_cooling_down = false;
                    self.attack_timer = 0.0;
                    self.can_attack = !self.special_cooling_down;
                }
                PlayerTimer::SpecialCooldownEnd => {
                    self.special_cooling_down = false;
                    self.special_timer = 0.0;
                    self.can_attack = !self.attack_cooling_down;
                }
                PlayerTimer::HealPulse => {
                    let amount = (self.max_health - self.health).min(HEAL_PER_PULSE).max(0.0);
                    self.take_healing(amount);
                }
            }
        }
    }

    fn decay_cosmetics(&mut self, dt: f32) {
        self.damage_flash = (self.damage_flash - dt).max(0.0);
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.special_timer = (self.special_timer - dt).max(0.0);
        let decay = drag_factor(VISUAL_OFFSET_DECAY, dt);
        self.visual_offset.scale_by(decay, None);
    }

    pub fn jump(&mut self) {
        if self.is_dead || !self.can_jump {
            return;
        }
        let bonus = if self.is_grounded {
            GROUND_JUMP_BONUS
        } else {
            if self.double_jump_count == 0 {
                return;
            }
            self.double_jump_count -= 1;
            1.0
        };
        self.cancel_phase();

        self.body.vel.y = -self.stats.jump_power * self.modifiers.jump * bonus;
        self.events.push(SimEvent::Jumped {
            player: self.number,
            grounded: self.is_grounded,
        });
        self.is_grounded = false;
        self.can_jump = false;
        // an earlier jump's re-enable must not cut this delay short
        self.cancel_jump_timer();
        if self.double_jump_count > 0 {
            self.jump_timer = Some(
                self.timers
                    .schedule_after(JUMP_REENABLE_DELAY, PlayerTimer::ReenableJump),
            );
        }
    }

    fn cancel_jump_timer(&mut self) {
        if let Some(handle) = self.jump_timer.take() {
            self.timers.cancel(handle);
        }
    }

    pub fn phase(&mut self) {
        if self.is_dead || self.is_phasing {
            return;
        }
        if let Some(stale) = self.phase_timer.take() {
            self.timers.cancel(stale);
        }
        self.is_phasing = true;
        self.phase_timer = Some(
            self.timers
                .schedule_after(PHASE_DURATION, PlayerTimer::EndPhase),
        );
    }

    /// Stop phasing now and drop the pending expiry
    pub fn cancel_phase(&mut self) {
        if let Some(handle) = self.phase_timer.take() {
            self.timers.cancel(handle);
        }
        self.is_phasing = false;
    }

    pub fn ground_pound(&mut self) {
        if self.is_dead || self.is_phasing {
            return;
        }
        self.is_ground_pounding = true;
    }

    /// Hit every living opponent in range. Returns the number of targets hit.
    ///
    /// A ground-pound impact skips the `can_attack` gate, hits at half the
    /// range-squared, deals a quarter damage and never builds combo.
    pub fn attack(&mut self, is_ground_pound: bool, opponents: &mut Opponents) -> u32 {
        if self.is_dead {
            return 0;
        }
        if is_ground_pound {
            self.combo = 0;
        } else if !self.can_attack || self.attack_debounce {
            return 0;
        }

        let range = self.stats.attack_range * self.modifiers.attack_range;
        let mut range_sq = range * range;
        if is_ground_pound {
            range_sq *= 0.5;
        }
        let base = self.stats.base_damage;
        // base^1.5 and base^2.5, exact for square bases
        let min_damage = base * base.sqrt();
        let crit_damage = base * min_damage;
        let origin = self.body.pos;

        let mut hits = 0;
        for target in opponents.iter_mut() {
            if target.is_dead {
                continue;
            }
            let dist_sq = origin.squared_distance(&target.body.pos);
            if dist_sq > range_sq {
                continue;
            }

            let dist = dist_sq.sqrt();
            let mut damage = (self.stats.attack_range / dist * base).max(min_damage);
            let is_crit = damage >= crit_damage;
            if is_crit {
                damage = crit_damage;
            }

            let mut kb = target.body.pos.subtract(&origin).normalized_or_zero();
            kb.scale_by(self.stats.attack_power, None);
            if is_ground_pound {
                damage /= GROUND_POUND_DAMAGE_DIVISOR;
                kb.scale_by(self.stats.jump_power / 1000.0, None);
            } else {
                damage *= 1.0 + COMBO_DAMAGE_STEP * self.combo as f32;
                self.combo += 1;
            }

            target.last_hit_by = Some(self.number);
            target.take_damage(damage, is_crit);
            target.take_kb(kb);
            target.combo = 0;
            hits += 1;
        }

        if is_ground_pound {
            self.events.push(SimEvent::GroundPoundImpact {
                player: self.number,
                hits,
            });
            return hits;
        }

        if hits == 0 {
            self.combo = 0;
        }
        self.attack_debounce = true;
        self.timers
            .schedule_after(ATTACK_DEBOUNCE, PlayerTimer::AttackDebounceEnd);

        let cooldown = self.attack_cooldown();
        self.can_attack = false;
        self.attack_cooling_down = true;
        self.attack_timer = cooldown;
        self.timers
            .schedule_after(cooldown, PlayerTimer::AttackCooldownEnd);

        self.events.push(SimEvent::Attacked {
            player: self.number,
            hits,
        });
        hits
    }

    /// Cooldown after an attack at the current combo, floored at zero
    pub fn attack_cooldown(&self) -> f32 {
        (self.stats.attack_cooldown - self.combo as f32 * self.stats.combo_cooldown).max(0.0)
    }

    /// Trickle heal: five pulses, one per second, never past max health
    pub fn special(&mut self) {
        if self.is_dead
            || self.attack_cooling_down
            || self.special_cooling_down
            || !self.can_attack
        {
            return;
        }

        let cooldown = self.stats.special_cooldown;
        self.special_cooling_down = true;
        self.special_timer = cooldown;
        self.can_attack = false;
        self.timers
            .schedule_after(cooldown, PlayerTimer::SpecialCooldownEnd);
        self.events.push(SimEvent::SpecialUsed {
            player: self.number,
        });

        if self.health >= self.max_health {
            return;
        }
        for pulse in 1..=HEAL_PULSES {
            self.timers
                .schedule_after(pulse as f32 * HEAL_PULSE_INTERVAL, PlayerTimer::HealPulse);
        }
    }

    /// Add knockback to velocity, amplified at low health and capped
    pub fn take_kb(&mut self, kb: Vector2D) {
        let ratio = self.max_health / self.health;
        let mut scaled = kb;
        scaled.scale_by(ratio * ratio, None);
        if !scaled.is_finite() || scaled.magnitude() > MAX_KNOCKBACK {
            scaled = kb.normalized_or_zero();
            scaled.scale_by(MAX_KNOCKBACK, None);
        }
        scaled.scale_by(self.modifiers.incoming_kb, None);
        self.body.vel.add_in_place(&scaled);
    }

    /// Apply damage. Returns true only on the call that kills.
    pub fn take_damage(&mut self, damage: f32, is_crit: bool) -> bool {
        if self.is_dead {
            return false;
        }
        let amount = damage * self.modifiers.damage;
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        self.damage_flash = DAMAGE_FLASH_DURATION;
        self.events.push(SimEvent::Damaged {
            player: self.number,
            amount,
            is_crit,
        });

        if self.health <= 0.0 {
            self.is_dead = true;
            self.cancel_phase();
            self.is_ground_pounding = false;
            return true;
        }
        false
    }

    /// Uncapped heal; callers clamp when overheal matters
    pub fn take_healing(&mut self, health: f32) {
        if self.is_dead {
            return;
        }
        let amount = health * self.modifiers.heal;
        self.health += amount;
        if amount > 0.0 {
            self.events.push(SimEvent::Healed {
                player: self.number,
                amount,
            });
        }
    }

    /// Player side of a platform contact
    pub fn on_platform_collision(
        &mut self,
        platform: &Platform,
        body_index: usize,
        opponents: &mut Opponents,
    ) {
        debug_assert_eq!(body_index, 0);
        if self.is_phasing {
            if platform.is_phaseable {
                return;
            }
            self.cancel_phase();
        }

        if platform.is_wall {
            let pen = rect_penetration(&self.body.pos, &self.hitbox, &platform.pos, &platform.hitbox);
            if pen.x < pen.y {
                let side = if self.body.pos.x < platform.pos.x { -1.0 } else { 1.0 };
                self.body.pos.x += side * pen.x;
                self.body.vel.x = 0.0;
                return;
            }
        }

        if self.is_ground_pounding {
            self.is_ground_pounding = false;
            self.attack(true, opponents);
        }

        if !self.was_grounded && !self.is_grounded {
            self.events.push(SimEvent::Landed {
                player: self.number,
                speed: self.body.vel.y,
            });
        }

        let rest_y =
            platform.surface_y() - self.hitbox.offset().y - self.hitbox.height() / 2.0;
        self.visual_offset.y += self.body.pos.y - rest_y;
        self.body.pos.y = rest_y;
        self.body.vel.y = 0.0;
        self.is_grounded = true;
        self.cancel_jump_timer();
        self.can_jump = true;
        self.double_jump_count = MAX_DOUBLE_JUMPS;
    }

    /// Bring a dead player back at `spawn` with full health and fresh state
    pub fn respawn(&mut self, spawn: Vector2D) {
        let stats = self.stats.clone();
        let (kills, lives, modifiers) = (self.kills, self.lives, self.modifiers);
        let events = std::mem::take(&mut self.events);
        *self = Player::new(self.number, spawn, &stats);
        self.kills = kills;
        self.lives = lives;
        self.modifiers = modifiers;
        self.events = events;
        self.events.push(SimEvent::Respawned {
            player: self.number,
        });
    }
}
