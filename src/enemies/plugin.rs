//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Enemy plugin - handles enemy definitions, detection, AI, and corpse removal.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_event::<ai::RangeEvent>()
            // Definitions must be in place before the first level is built
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            // Detection and engagement run with the other input systems
            .add_systems(
                Update,
                (
                    ai::update_detectors,
                    ai::apply_range_events,
                    ai::follow_and_engage,
                )
                    .chain()
                    .in_set(CombatSet::Input),
            )
            .add_systems(
                Update,
                (ai::drop_targets_on_death, ai::remove_dead_enemies)
                    .in_set(CombatSet::Feedback),
            );
    }
}
