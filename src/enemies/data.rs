//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::EnemyStats;
use crate::combat::{AttackProfile, ClipTimings, HitVolumeConfig};
use crate::core::{check_delay, load_ron_dir, DataLoadError, DATA_DIR};

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_hit_points: u32,
    pub attack: AttackProfile,
    pub move_speed: f32,
    pub stop_distance: f32,
    pub detection_radius: f32,
    /// Body size in pixels
    pub size: (f32, f32),
    #[serde(default)]
    pub hit_volume: HitVolumeConfig,
    #[serde(default)]
    pub animation: ClipTimings,
    /// Seconds the corpse stays before it is removed
    pub death_linger_secs: f32,
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            move_speed: self.move_speed,
            stop_distance: self.stop_distance,
        }
    }

    /// Reject definitions whose delays could not drive a timer.
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        self.attack.validate(origin)?;
        self.animation.validate(origin)?;
        check_delay(origin, "death_linger_secs", self.death_linger_secs)
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(DATA_DIR).join("enemies");

    let entries = match load_ron_dir::<EnemyDefinition>(&enemies_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Enemy definitions unavailable: {}", e);
            return;
        }
    };

    for (enemy_type, result) in entries {
        let result = result.and_then(|def| def.validate(&enemy_type).map(|_| def));
        match result {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => {
                error!("Failed to load enemy definition: {}", e);
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
