//! Combat-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{check_delay, DataLoadError, TimerSlots};

/// Horizontal facing of a side-view combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for a horizontal axis value; `None` for zero.
    pub fn from_axis(x: f32) -> Option<Self> {
        if x < 0.0 {
            Some(Facing::Left)
        } else if x > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }

    /// Facing toward `to_x` from `from_x`. Ties face left.
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x - from_x > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// What a combatant's attack does to whoever it lands on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttackProfile {
    pub damage: u32,
    /// Stun inflicted on a target that survives the hit
    pub stun_secs: f32,
    /// Delay before another attack may start. Without one, attacking is
    /// re-enabled as soon as the attack animation ends.
    #[serde(default)]
    pub cooldown_secs: Option<f32>,
}

impl AttackProfile {
    /// Reject stun or cooldown delays that are negative or not finite.
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        check_delay(origin, "attack.stun_secs", self.stun_secs)?;
        if let Some(cooldown) = self.cooldown_secs {
            check_delay(origin, "attack.cooldown_secs", cooldown)?;
        }
        Ok(())
    }
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self {
            damage: 25,
            stun_secs: 0.3,
            cooldown_secs: None,
        }
    }
}

/// Which side of the fight an entity is on. Hits only land across sides.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposes(self, other: Side) -> bool {
        self != other
    }
}

/// Timer concerns owned by a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatTimer {
    Stun,
    AttackCooldown,
    PostDeath,
}

/// One pending timer per [`CombatTimer`] kind.
pub type CombatTimers = TimerSlots<CombatTimer>;

/// Attack hit-volume: a box in front of the combatant, live only while the
/// combatant's hit window is open.
#[derive(Component, Debug, Clone)]
pub struct HitVolume {
    /// Offset from the owner's origin when facing right
    pub offset: Vec2,
    pub half_extents: Vec2,
    /// Targets already struck during the current window
    struck: Vec<Entity>,
}

impl HitVolume {
    pub fn new(offset: Vec2, half_extents: Vec2) -> Self {
        Self {
            offset,
            half_extents,
            struck: Vec::new(),
        }
    }

    /// Volume center for the given owner position and facing.
    pub fn center(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + Vec2::new(self.offset.x * facing.sign(), self.offset.y)
    }

    /// Record a hit on `target`. Returns `false` if it was already struck
    /// during this window.
    pub fn register(&mut self, target: Entity) -> bool {
        if self.struck.contains(&target) {
            return false;
        }
        self.struck.push(target);
        true
    }

    /// Forget the targets struck so far; called whenever the window closes.
    pub fn reset(&mut self) {
        self.struck.clear();
    }
}

/// Hit-volume placement as written in data files, relative to the owner
/// facing right.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HitVolumeConfig {
    pub offset: (f32, f32),
    pub half_extents: (f32, f32),
}

impl Default for HitVolumeConfig {
    fn default() -> Self {
        Self {
            offset: (30.0, 0.0),
            half_extents: (18.0, 12.0),
        }
    }
}

impl HitVolumeConfig {
    pub fn to_hit_volume(&self) -> HitVolume {
        HitVolume::new(
            Vec2::new(self.offset.0, self.offset.1),
            Vec2::new(self.half_extents.0, self.half_extents.1),
        )
    }
}

/// Marker for the floating "HP: n" label above an enemy.
#[derive(Component)]
pub struct HpIndicator {
    pub owner: Entity,
}

/// Screen shake effect resource.
#[derive(Resource, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub timer: f32,
}

impl ScreenShake {
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        // Only override if new shake is stronger
        if intensity > self.intensity || self.timer <= 0.0 {
            self.intensity = intensity;
            self.duration = duration;
            self.timer = duration;
        }
    }

    pub fn update(&mut self, delta: f32) -> Vec2 {
        if self.timer <= 0.0 {
            return Vec2::ZERO;
        }

        self.timer -= delta;
        let progress = (self.timer / self.duration).max(0.0);
        let current_intensity = self.intensity * progress;

        let x = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;
        let y = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;

        Vec2::new(x, y)
    }
}
