//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::collectables::spawn_collectable;
use super::data::{LevelDefinition, PlatformDef};
use super::exit::spawn_exit;
use crate::enemies::{spawn_enemy, EnemyRegistry};

const PLATFORM_COLOR: Color = Color::srgb(0.35, 0.28, 0.2);

/// Marker for everything that belongs to the current level and is removed
/// when another level loads. The player carries it too.
#[derive(Component)]
pub struct LevelEntity;

/// Build a level from a level definition. Returns the player spawn position.
pub fn build_level(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
) -> Vec2 {
    for platform in &level.platforms {
        spawn_platform(commands, platform);
    }

    for placement in &level.enemies {
        let Some(definition) = enemy_registry.get(&placement.enemy_type) else {
            warn!(
                "Unknown enemy type '{}' in level {}",
                placement.enemy_type, level.name
            );
            continue;
        };
        let position = Vec2::new(placement.position.0, placement.position.1);
        let enemy = spawn_enemy(commands, &placement.enemy_type, definition, position);
        commands.entity(enemy).insert(LevelEntity);
    }

    for placement in &level.collectables {
        let position = Vec2::new(placement.position.0, placement.position.1);
        spawn_collectable(commands, placement.kind, position);
    }

    if let Some(exit) = &level.exit {
        spawn_exit(commands, exit);
    }

    level.player_spawn()
}

fn spawn_platform(commands: &mut Commands, platform: &PlatformDef) {
    let (width, height) = platform.size;

    commands.spawn((
        Name::new("Platform"),
        LevelEntity,
        Sprite::from_color(PLATFORM_COLOR, Vec2::new(width, height)),
        Transform::from_xyz(platform.position.0, platform.position.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(width / 2.0, height / 2.0),
    ));
}
