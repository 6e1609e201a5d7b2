//! Global events used for cross-system communication.
//!
//! Combat, world and UI systems never call into each other directly. Hits,
//! HP changes, level requests and HUD pushes all travel as events so each
//! plugin can be exercised on its own.

use bevy::prelude::*;

/// Sent when an attack hit-volume overlaps a combatant of the opposing side.
#[derive(Event, Debug, Clone)]
pub struct HitEvent {
    /// Entity whose attack landed
    pub attacker: Entity,
    /// Entity receiving the hit
    pub target: Entity,
    /// Hit points removed
    pub damage: u32,
    /// Stun applied when the hit is not lethal
    pub stun_secs: f32,
}

/// Sent whenever a combatant's hit points are written.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpChangedEvent {
    pub entity: Entity,
    pub hit_points: u32,
}

/// Sent once when a combatant's hit points reach zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
}

/// Sent when a dead combatant's post-death delay has elapsed.
///
/// The player restarts the game; enemies are torn down and despawned.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathLingerElapsed {
    pub entity: Entity,
}

/// Request to tear down the current level and build the named one.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LoadLevelRequest {
    pub name: String,
}

/// Value pushed to the HUD. The HUD never reads game state on its own.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudUpdate {
    Hp(u32),
    Diamonds(u32),
    Level(u32),
}

/// Sound effects the gameplay layer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Item picked up by the player
    Pickup,
    /// Level exit door opening
    DoorOpen,
}

/// Request to play a non-positional sound cue.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCueEvent(pub SoundCue);
