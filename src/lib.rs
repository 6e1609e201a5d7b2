//! Corsair - a 2D side-scrolling pirate platformer in Bevy.
//!
//! A pirate captain fights crabs across levels, picking up potions, diamonds
//! and a double jump on the way.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, timer slots, data loading
//! - **Progress**: State that survives level changes
//! - **Combat**: Shared combat state machine, hit detection, animation timing
//! - **Player**: Movement, attacks, pickups, follow camera
//! - **Enemies**: Enemy definitions, detection and AI
//! - **World**: Levels, exits, collectables
//! - **UI**: HUD
//! - **Audio**: Sound cues

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod progress;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Rapier and kira's audio plugin are added by the binary.
pub struct CorsairPlugin;

impl Plugin for CorsairPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Session state
            .add_plugins(progress::ProgressPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin)

            // Sound cues
            .add_plugins(audio::AudioCuePlugin);
    }
}
