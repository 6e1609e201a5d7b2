//! The combat state machine shared by the player and enemies.
//!
//! A [`Combatant`] tracks health, stun, attack and death for one entity. It
//! never touches the engine: timed effects go through a
//! [`Scheduler<CombatTimer>`](crate::core::Scheduler) and presentation side
//! effects are queued as [`CombatCue`]s, which the combat systems drain each
//! frame into animation, HUD and indicator updates.
//!
//! Every operation is permissive: calling it when its preconditions do not
//! hold (dead, inactive, stunned, already attacking) does nothing.

use bevy::prelude::*;

use super::components::{AttackProfile, CombatTimer, Facing};
use crate::core::Scheduler;

/// Coarse state derived from the combatant's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    Stunned,
    Attacking,
    Dead,
}

/// One-off reaction states the animation driver can jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    TakeHit,
    Die,
}

/// Presentation side effect produced by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatCue {
    /// Hit points were written (pushed to the HUD or overhead label)
    HpChanged(u32),
    /// Hide the overhead HP label
    HideIndicator,
    /// Start the attack override animation
    PlayAttack,
    /// Stop any override animation in progress
    StopOverrides,
    /// Jump the base animation to a reaction state
    JumpTo(Reaction),
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Combatant {
    hit_points: u32,
    max_hit_points: u32,
    alive: bool,
    active: bool,
    stunned: bool,
    can_move: bool,
    can_attack: bool,
    attacking: bool,
    hit_volume: bool,
    facing: Facing,
    attack: AttackProfile,
    death_linger_secs: f32,
    cues: Vec<CombatCue>,
}

impl Combatant {
    /// A combatant at full health, facing right.
    pub fn new(max_hit_points: u32, attack: AttackProfile, death_linger_secs: f32) -> Self {
        Self {
            hit_points: max_hit_points,
            max_hit_points,
            alive: max_hit_points > 0,
            active: true,
            stunned: false,
            can_move: max_hit_points > 0,
            can_attack: max_hit_points > 0,
            attacking: false,
            hit_volume: false,
            facing: Facing::default(),
            attack,
            death_linger_secs,
            cues: Vec::new(),
        }
    }

    /// Seed hit points (clamped to the maximum), e.g. from saved progress.
    pub fn with_hit_points(mut self, hit_points: u32) -> Self {
        self.hit_points = hit_points.min(self.max_hit_points);
        if self.hit_points == 0 {
            self.alive = false;
            self.can_move = false;
            self.can_attack = false;
        }
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn hit_volume_enabled(&self) -> bool {
        self.hit_volume
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn attack_profile(&self) -> &AttackProfile {
        &self.attack
    }

    /// Whether movement input or AI steps should be applied this frame.
    pub fn may_move(&self) -> bool {
        self.alive && self.can_move && !self.stunned
    }

    pub fn phase(&self) -> CombatPhase {
        if !self.alive {
            CombatPhase::Dead
        } else if self.stunned {
            CombatPhase::Stunned
        } else if self.attacking {
            CombatPhase::Attacking
        } else {
            CombatPhase::Idle
        }
    }

    /// Cues queued since the last drain.
    pub fn cues(&self) -> &[CombatCue] {
        &self.cues
    }

    pub fn drain_cues(&mut self) -> Vec<CombatCue> {
        std::mem::take(&mut self.cues)
    }

    /// Apply an incoming hit: lose `damage` hit points, then either die or
    /// be stunned for `stun_secs`.
    pub fn take_hit(
        &mut self,
        damage: u32,
        stun_secs: f32,
        timers: &mut impl Scheduler<CombatTimer>,
    ) {
        if !self.alive || !self.active {
            return;
        }

        let remaining = self.hit_points.saturating_sub(damage);
        self.set_hit_points(remaining);

        if remaining == 0 {
            self.die(timers);
        } else {
            self.stun(stun_secs, timers);
            self.cues.push(CombatCue::JumpTo(Reaction::TakeHit));
        }
    }

    /// Stun for `duration_secs`. A pending stun is restarted, not extended.
    pub fn stun(&mut self, duration_secs: f32, timers: &mut impl Scheduler<CombatTimer>) {
        if !self.alive {
            return;
        }

        self.stunned = true;
        timers.schedule(CombatTimer::Stun, duration_secs);

        self.cues.push(CombatCue::StopOverrides);
        self.hit_volume = false;
        if self.attacking {
            self.finish_attack();
        }
    }

    /// Start an attack. Returns whether it started.
    pub fn attack(&mut self, timers: &mut impl Scheduler<CombatTimer>) -> bool {
        if !self.alive || !self.active || !self.can_attack || self.stunned || self.attacking {
            return false;
        }

        self.can_attack = false;
        self.can_move = false;
        self.attacking = true;
        self.cues.push(CombatCue::PlayAttack);

        if let Some(cooldown) = self.attack.cooldown_secs {
            timers.schedule(CombatTimer::AttackCooldown, cooldown);
        }
        true
    }

    /// The attack override animation ended, completed or interrupted.
    pub fn on_attack_animation_end(&mut self, _completed: bool) {
        if !self.attacking {
            return;
        }
        self.finish_attack();
    }

    /// Enable the attack hit-volume. Only possible mid-attack.
    pub fn open_hit_window(&mut self) -> bool {
        if !self.alive || !self.attacking || self.stunned {
            return false;
        }
        self.hit_volume = true;
        true
    }

    pub fn close_hit_window(&mut self) {
        self.hit_volume = false;
    }

    /// Dispatch an expired timer. Returns `true` when the post-death delay
    /// has elapsed and the owner should be restarted or removed.
    pub fn on_timer(&mut self, timer: CombatTimer) -> bool {
        match timer {
            CombatTimer::Stun => {
                self.stunned = false;
                false
            }
            CombatTimer::AttackCooldown => {
                if self.alive {
                    self.can_attack = true;
                }
                false
            }
            CombatTimer::PostDeath => !self.alive,
        }
    }

    /// Turn toward `direction`. Returns `true` only if the facing changed.
    pub fn update_facing(&mut self, direction: Facing) -> bool {
        if self.facing == direction {
            return false;
        }
        self.facing = direction;
        true
    }

    /// Stop processing input and freeze in place. Returns `true` on the
    /// first call.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.can_attack = false;
        self.can_move = false;
        true
    }

    /// Restore up to `amount` hit points, never above the maximum.
    pub fn heal(&mut self, amount: u32) {
        if !self.alive {
            return;
        }
        let healed = self.hit_points.saturating_add(amount).min(self.max_hit_points);
        self.set_hit_points(healed);
    }

    fn set_hit_points(&mut self, hit_points: u32) {
        self.hit_points = hit_points;
        self.cues.push(CombatCue::HpChanged(hit_points));
    }

    fn finish_attack(&mut self) {
        self.attacking = false;
        self.hit_volume = false;

        if self.alive && self.active {
            self.can_move = true;
            // Without a cooldown the next attack is allowed right away
            if self.attack.cooldown_secs.is_none() {
                self.can_attack = true;
            }
        }
    }

    fn die(&mut self, timers: &mut impl Scheduler<CombatTimer>) {
        self.alive = false;
        self.stunned = false;
        self.can_move = false;
        self.can_attack = false;
        self.attacking = false;
        self.hit_volume = false;

        timers.cancel(CombatTimer::Stun);
        timers.cancel(CombatTimer::AttackCooldown);
        timers.schedule(CombatTimer::PostDeath, self.death_linger_secs);

        self.cues.push(CombatCue::HideIndicator);
        self.cues.push(CombatCue::StopOverrides);
        self.cues.push(CombatCue::JumpTo(Reaction::Die));
    }
}
