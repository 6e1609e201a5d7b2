//! Level data structures and RON loading.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::collectables::CollectableKind;
use crate::core::{check_delay, load_ron_dir, DataLoadError, DATA_DIR};

fn default_wait_secs() -> f32 {
    2.0
}

/// A solid rectangle the player and enemies stand on.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    /// Center in world pixels
    pub position: (f32, f32),
    pub size: (f32, f32),
}

/// An enemy to spawn, by definition file name.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyPlacement {
    pub enemy_type: String,
    pub position: (f32, f32),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectablePlacement {
    pub kind: CollectableKind,
    pub position: (f32, f32),
}

/// The door leading to another level.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    /// Index of the level to load; values below 1 never load anything
    pub target_level_index: i32,
    /// Delay between entering the door and the level change
    #[serde(default = "default_wait_secs")]
    pub wait_secs: f32,
}

/// A complete level definition loaded from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub player_spawn: (f32, f32),
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub collectables: Vec<CollectablePlacement>,
    #[serde(default)]
    pub exit: Option<ExitDef>,
}

impl LevelDefinition {
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.player_spawn.0, self.player_spawn.1)
    }

    /// Reject levels that parse but cannot be played.
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        let invalid = |details: &str| DataLoadError::Invalid {
            path: origin.to_string(),
            details: details.to_string(),
        };

        if self.platforms.is_empty() {
            return Err(invalid("level has no platforms"));
        }
        if let Some(exit) = &self.exit {
            check_delay(origin, "exit.wait_secs", exit.wait_secs)?;
        }
        Ok(())
    }
}

/// Resource storing all loaded level definitions, keyed by file name.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by file name (e.g. `level_1`).
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Load all level definitions from the assets/data/levels/ directory.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    let levels_dir = Path::new(DATA_DIR).join("levels");

    let entries = match load_ron_dir::<LevelDefinition>(&levels_dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Level definitions unavailable: {}", e);
            return;
        }
    };

    for (file_name, result) in entries {
        let result = result.and_then(|level| level.validate(&file_name).map(|_| level));
        match result {
            Ok(level) => {
                info!("Loaded level: {} ({})", level.name, file_name);
                registry.levels.insert(file_name, level);
            }
            Err(e) => {
                error!("Failed to load level: {}", e);
            }
        }
    }

    info!("Loaded {} levels", registry.levels.len());
}
