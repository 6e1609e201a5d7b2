//! Enemy spawning from registry definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Detector, Enemy, EnemyType, FollowTarget};
use super::data::EnemyDefinition;
use crate::combat::{
    indicator_text, Animator, CombatTimers, Combatant, Facing, HpIndicator, Side,
};

const ENEMY_COLOR: Color = Color::srgb(0.9, 0.5, 0.2);

/// Spawn an enemy with its overhead HP label. Returns the enemy entity.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
) -> Entity {
    let (width, height) = definition.size;

    let enemy = commands
        .spawn((
            Name::new(definition.name.clone()),
            Enemy,
            EnemyType(enemy_type.to_string()),
            Side::Enemy,
            definition.to_stats(),
            FollowTarget::default(),
            Detector::new(definition.detection_radius),
            Combatant::new(
                definition.max_hit_points,
                definition.attack.clone(),
                definition.death_linger_secs,
            )
            .with_facing(Facing::Left),
            CombatTimers::new(),
            Animator::new(definition.animation.clone()),
            definition.hit_volume.to_hit_volume(),
            Sprite::from_color(ENEMY_COLOR, Vec2::new(width, height)),
            Transform::from_translation(position.extend(1.0)),
        ))
        .insert((
            RigidBody::KinematicPositionBased,
            Collider::cuboid(width / 2.0, height / 2.0),
            KinematicCharacterController::default(),
        ))
        .id();

    commands.entity(enemy).with_children(|parent| {
        parent.spawn((
            HpIndicator { owner: enemy },
            Text2d::new(indicator_text(definition.max_hit_points)),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            Transform::from_xyz(0.0, height / 2.0 + 12.0, 1.0),
        ));
    });

    debug!("Spawned {} at {:?}", definition.name, position);
    enemy
}
