//! Side-view camera that follows the player.

use bevy::prelude::*;

use super::components::Player;
use crate::combat::ScreenShake;

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, PlayerCamera, Transform::from_xyz(0.0, 0.0, 100.0)));
}

/// Center the camera on the player, jittered by any active screen shake.
pub fn follow_player(
    time: Res<Time>,
    mut screen_shake: ResMut<ScreenShake>,
    player_query: Query<&Transform, (With<Player>, Without<PlayerCamera>)>,
    mut camera_query: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let shake = screen_shake.update(time.delta_secs());
    camera_transform.translation.x = player_transform.translation.x + shake.x;
    camera_transform.translation.y = player_transform.translation.y + shake.y;
}
