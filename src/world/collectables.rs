//! Collectable items placed in levels.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use serde::Deserialize;

use super::builder::LevelEntity;

/// Kinds of items the player can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CollectableKind {
    HealthPotion,
    Diamond,
    DoubleJumpUpgrade,
}

impl CollectableKind {
    fn color(self) -> Color {
        match self {
            CollectableKind::HealthPotion => Color::srgb(0.9, 0.15, 0.3),
            CollectableKind::Diamond => Color::srgb(0.4, 0.9, 1.0),
            CollectableKind::DoubleJumpUpgrade => Color::srgb(0.7, 1.0, 0.3),
        }
    }
}

/// An item waiting to be picked up.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collectable {
    pub kind: CollectableKind,
}

const ITEM_SIZE: f32 = 16.0;

/// Spawn a collectable sensor at `position`.
pub fn spawn_collectable(commands: &mut Commands, kind: CollectableKind, position: Vec2) -> Entity {
    commands
        .spawn((
            Name::new(format!("{kind:?}")),
            Collectable { kind },
            LevelEntity,
            Sprite::from_color(kind.color(), Vec2::splat(ITEM_SIZE)),
            Transform::from_translation(position.extend(0.5)),
            Collider::cuboid(ITEM_SIZE / 2.0, ITEM_SIZE / 2.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ))
        .id()
}
