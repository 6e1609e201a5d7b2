//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Movement and engagement tuning loaded from RON data files.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct EnemyStats {
    /// Horizontal speed in pixels per second
    pub move_speed: f32,
    /// Horizontal distance at which the enemy stops closing in and attacks
    pub stop_distance: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            move_speed: 90.0,
            stop_distance: 70.0,
        }
    }
}

/// The entity this enemy is chasing. A lookup only: it is set and cleared
/// by range events and never keeps the target alive.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowTarget(pub Option<Entity>);

impl FollowTarget {
    pub fn acquire(&mut self, target: Entity) {
        self.0 = Some(target);
    }

    /// Forget `target`, leaving any other target in place.
    pub fn release(&mut self, target: Entity) {
        if self.0 == Some(target) {
            self.0 = None;
        }
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Detection volume: reports entities crossing a horizontal radius.
#[derive(Component, Debug, Clone)]
pub struct Detector {
    pub radius: f32,
    inside: Vec<Entity>,
}

impl Detector {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            inside: Vec::new(),
        }
    }

    /// Update with the current distance to `other`. Returns `Some(true)` when
    /// it just entered, `Some(false)` when it just left, `None` otherwise.
    pub fn observe(&mut self, other: Entity, distance: f32) -> Option<bool> {
        let within = distance <= self.radius;
        let was_inside = self.inside.contains(&other);

        match (within, was_inside) {
            (true, false) => {
                self.inside.push(other);
                Some(true)
            }
            (false, true) => {
                self.inside.retain(|e| *e != other);
                Some(false)
            }
            _ => None,
        }
    }
}
