//! Combat module - the combatant state machine, attacks, stun, and death.

mod animation;
mod combatant;
mod components;
mod plugin;
mod systems;

pub use animation::{AnimationPlayer, AnimationSignal, Animator, ClipTimings, OverrideClip, Pose};
pub use combatant::{CombatCue, CombatPhase, Combatant, Reaction};
pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{indicator_text, teardown_combatant, CombatSet};
