//! Process-wide progress that survives level changes.
//!
//! The player entity is rebuilt on every level load; whatever must outlive
//! it (hit points, diamonds, the double jump upgrade, the current level)
//! lives here and is seeded back into the new player.

use bevy::prelude::*;

use crate::core::LevelLoader;

/// Hit points the player starts a fresh game with.
pub const DEFAULT_MAX_HIT_POINTS: u32 = 100;

/// Index of the first level.
pub const FIRST_LEVEL: u32 = 1;

/// Name of the level file for a level index.
pub fn level_name(index: u32) -> String {
    format!("level_{index}")
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ProgressStore {
    player_hit_points: u32,
    max_hit_points: u32,
    collected_diamonds: u32,
    double_jump_unlocked: bool,
    current_level_index: u32,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HIT_POINTS)
    }
}

impl ProgressStore {
    pub fn new(max_hit_points: u32) -> Self {
        Self {
            player_hit_points: max_hit_points,
            max_hit_points,
            collected_diamonds: 0,
            double_jump_unlocked: false,
            current_level_index: FIRST_LEVEL,
        }
    }

    pub fn player_hit_points(&self) -> u32 {
        self.player_hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    pub fn collected_diamonds(&self) -> u32 {
        self.collected_diamonds
    }

    pub fn double_jump_unlocked(&self) -> bool {
        self.double_jump_unlocked
    }

    pub fn current_level_index(&self) -> u32 {
        self.current_level_index
    }

    pub fn set_player_hp(&mut self, hit_points: u32) {
        self.player_hit_points = hit_points;
    }

    pub fn add_diamond(&mut self, amount: u32) {
        self.collected_diamonds = self.collected_diamonds.saturating_add(amount);
    }

    /// Returns `true` only the first time the upgrade is unlocked.
    pub fn unlock_double_jump(&mut self) -> bool {
        !std::mem::replace(&mut self.double_jump_unlocked, true)
    }

    /// Switch to level `index`. Indices below 1 are rejected without effect.
    pub fn change_level(&mut self, index: i32, loader: &mut impl LevelLoader) -> bool {
        let Ok(index) = u32::try_from(index) else {
            return false;
        };
        if index == 0 {
            return false;
        }

        self.current_level_index = index;
        info!("Changing to level {}", index);
        loader.load_level(&level_name(index));
        true
    }

    /// Reset everything to a fresh game and load the first level.
    pub fn restart(&mut self, loader: &mut impl LevelLoader) {
        info!("Restarting game");
        self.player_hit_points = self.max_hit_points;
        self.collected_diamonds = 0;
        self.double_jump_unlocked = false;
        self.current_level_index = FIRST_LEVEL;
        loader.load_level(&level_name(FIRST_LEVEL));
    }
}
