//! Side-view player movement, jumping and attack input.

use std::path::Path;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::{Animator, CombatSet, CombatTimers, Combatant, Facing, Pose, Side};
use crate::core::{load_ron_file, GameState, DATA_DIR};
use crate::progress::ProgressStore;

const PLAYER_COLOR: Color = Color::srgb(0.2, 0.4, 0.9);

/// Distance below the feet probed for ground.
const GROUND_PROBE: f32 = 2.0;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>()
        .add_systems(OnEnter(GameState::Loading), load_player_config)
        .add_systems(
            Update,
            (player_movement, player_attack)
                .chain()
                .in_set(CombatSet::Input),
        );
}

/// Read `player.ron`, falling back to built-in defaults, and size the
/// progress store to the configured maximum hit points.
fn load_player_config(mut commands: Commands) {
    let path = Path::new(DATA_DIR).join("player.ron");

    let loaded = load_ron_file::<PlayerConfig>(&path)
        .and_then(|config| config.validate("player.ron").map(|_| config));
    let config = match loaded {
        Ok(config) => {
            info!("Loaded player config");
            config
        }
        Err(e) => {
            warn!("Using default player config: {}", e);
            PlayerConfig::default()
        }
    };

    commands.insert_resource(ProgressStore::new(config.max_hit_points));
    commands.insert_resource(config);
}

/// Horizontal input axis from A/D and the arrow keys.
fn horizontal_axis(keyboard: &ButtonInput<KeyCode>) -> f32 {
    let mut axis = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }
    axis
}

/// Handle walking and jumping.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
/// Gravity always applies; walking and jumping only while the combatant may
/// move.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut MovementState,
            &mut KinematicCharacterController,
            &mut Combatant,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, transform, mut movement, mut controller, mut combatant, mut animator)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Ground check using a short raycast below the feet
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let half_height = config.size.1 / 2.0;
        let ray_origin = transform.translation.truncate() - Vec2::Y * (half_height - 1.0);

        context
            .cast_ray(
                ray_origin,
                Vec2::NEG_Y,
                GROUND_PROBE + 1.0,
                true,
                QueryFilter::default()
                    .exclude_sensors()
                    .exclude_collider(player_entity),
            )
            .is_some()
    } else {
        true
    };
    movement.is_grounded = is_grounded;

    if is_grounded {
        movement.land();
    } else {
        movement.vertical_velocity -= config.gravity * time.delta_secs();
    }

    let may_move = combatant.may_move();
    if may_move && keyboard.just_pressed(KeyCode::Space) && movement.try_jump(config.jump_force) {
        debug!("Jump {}/{}", movement.jumps_used, movement.max_jumps);
    }

    let axis = if may_move { horizontal_axis(&keyboard) } else { 0.0 };
    if let Some(direction) = Facing::from_axis(axis) {
        combatant.update_facing(direction);
    }

    controller.translation = Some(Vec2::new(
        axis * config.move_speed * time.delta_secs(),
        movement.vertical_velocity * time.delta_secs(),
    ));

    let pose = if !movement.is_grounded {
        Pose::Airborne
    } else if axis != 0.0 {
        Pose::Run
    } else {
        Pose::Idle
    };
    animator.set_locomotion(pose);
}

/// Start an attack on J or the left mouse button.
pub fn player_attack(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut player_query: Query<(&mut Combatant, &mut CombatTimers), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyJ) && !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok((mut combatant, mut timers)) = player_query.get_single_mut() else {
        return;
    };

    if combatant.attack(&mut *timers) {
        debug!("Player attacks");
    }
}

/// Spawn the player, seeding hit points and jump count from progress.
pub fn spawn_player(
    commands: &mut Commands,
    config: &PlayerConfig,
    progress: &ProgressStore,
    position: Vec2,
) -> Entity {
    let (width, height) = config.size;
    let max_jumps = if progress.double_jump_unlocked() { 2 } else { 1 };

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Side::Player,
            MovementState::new(max_jumps),
            Combatant::new(
                config.max_hit_points,
                config.attack.clone(),
                config.death_linger_secs,
            )
            .with_hit_points(progress.player_hit_points()),
            CombatTimers::new(),
            Animator::new(config.animation.clone()),
            config.hit_volume.to_hit_volume(),
            Sprite::from_color(PLAYER_COLOR, Vec2::new(width, height)),
            Transform::from_translation(position.extend(2.0)),
        ))
        .insert((
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::cuboid(width / 2.0, height / 2.0),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.5),
                snap_to_ground: Some(CharacterLength::Absolute(4.0)),
                ..default()
            },
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ))
        .id()
}
