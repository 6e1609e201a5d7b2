//! Player plugin - movement, pickups, camera, and progress sync.

use bevy::prelude::*;

use super::camera;
use super::components::Player;
use super::movement;
use super::pickups;
use crate::combat::CombatSet;
use crate::core::{
    DeathLingerElapsed, GameState, HpChangedEvent, HudDisplay, HudUpdate, LoadLevelRequest,
};
use crate::progress::ProgressStore;

/// Player plugin - handles player input, pickups, camera, and restart on death.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);

        app.add_systems(Startup, camera::spawn_camera)
            .add_systems(Update, pickups::collect_pickups.in_set(CombatSet::Damage))
            .add_systems(
                Update,
                (sync_player_hp, restart_after_death, camera::follow_player)
                    .after(CombatSet::Feedback)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Mirror player hit points into progress and the HUD.
pub fn sync_player_hp(
    mut hp_events: EventReader<HpChangedEvent>,
    players: Query<(), With<Player>>,
    mut progress: ResMut<ProgressStore>,
    mut hud: EventWriter<HudUpdate>,
) {
    for event in hp_events.read() {
        if players.contains(event.entity) {
            progress.set_player_hp(event.hit_points);
            hud.set_hp(event.hit_points);
        }
    }
}

/// Restart the game once the dead player's linger delay has elapsed.
pub fn restart_after_death(
    mut linger_events: EventReader<DeathLingerElapsed>,
    players: Query<(), With<Player>>,
    mut progress: ResMut<ProgressStore>,
    mut loader: EventWriter<LoadLevelRequest>,
) {
    for event in linger_events.read() {
        if players.contains(event.entity) {
            info!("Player died, restarting");
            progress.restart(&mut loader);
        }
    }
}
