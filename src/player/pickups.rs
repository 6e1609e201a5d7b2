//! Picking up collectables.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{MovementState, Player};
use crate::combat::Combatant;
use crate::core::{HudDisplay, HudUpdate, SoundCue, SoundCueEvent, SoundPlayer};
use crate::progress::ProgressStore;
use crate::world::{Collectable, CollectableKind};

/// Hit points restored by a health potion.
pub const POTION_HEAL: u32 = 25;

/// Apply a picked-up item to the player. Returns `false` (item stays) when
/// the player is dead.
pub fn apply_pickup(
    kind: CollectableKind,
    combatant: &mut Combatant,
    movement: &mut MovementState,
    progress: &mut ProgressStore,
    hud: &mut impl HudDisplay,
    sound: &mut impl SoundPlayer,
) -> bool {
    if !combatant.is_alive() {
        return false;
    }

    match kind {
        CollectableKind::HealthPotion => {
            combatant.heal(POTION_HEAL);
        }
        CollectableKind::Diamond => {
            progress.add_diamond(1);
            hud.set_diamond(progress.collected_diamonds());
        }
        CollectableKind::DoubleJumpUpgrade => {
            if progress.unlock_double_jump() {
                info!("Double jump unlocked");
            }
            movement.max_jumps = 2;
        }
    }

    sound.play_2d(SoundCue::Pickup);
    true
}

/// Consume collectables the player touches.
pub fn collect_pickups(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    collectables: Query<&Collectable>,
    mut players: Query<(&mut Combatant, &mut MovementState), With<Player>>,
    mut progress: ResMut<ProgressStore>,
    mut hud: EventWriter<HudUpdate>,
    mut sounds: EventWriter<SoundCueEvent>,
) {
    let mut consumed = Vec::new();

    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let (player, item) = if players.contains(*a) && collectables.contains(*b) {
            (*a, *b)
        } else if players.contains(*b) && collectables.contains(*a) {
            (*b, *a)
        } else {
            continue;
        };
        if consumed.contains(&item) {
            continue;
        }

        let Ok(collectable) = collectables.get(item) else {
            continue;
        };
        let Ok((mut combatant, mut movement)) = players.get_mut(player) else {
            continue;
        };

        if apply_pickup(
            collectable.kind,
            &mut combatant,
            &mut movement,
            &mut progress,
            &mut hud,
            &mut sounds,
        ) {
            info!("Picked up {:?}", collectable.kind);
            consumed.push(item);
            commands.entity(item).despawn_recursive();
        }
    }
}
