//! Corsair - Entry Point
//!
//! Controls:
//! - A/D or arrow keys: Move
//! - Space: Jump (twice with the upgrade)
//! - J or left mouse: Attack
//! - Q: Quit

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Corsair".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(corsair::CorsairPlugin)

        .run();
}
