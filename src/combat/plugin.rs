//! Combat plugin - combatant state, hits, and combat feedback.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
