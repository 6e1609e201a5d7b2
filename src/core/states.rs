//! Game state definitions that control the overall flow of the game.
//!
//! Combat, movement and enemy AI only run while `InGame`.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data files are read
/// - Move to `InGame` once the first level has been requested
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}
