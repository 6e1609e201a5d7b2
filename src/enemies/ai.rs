//! Enemy AI behavior systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Detector, Enemy, EnemyStats, EnemyType, FollowTarget};
use crate::combat::{
    teardown_combatant, Animator, CombatTimer, CombatTimers, Combatant, Facing, Pose,
};
use crate::core::{DeathEvent, DeathLingerElapsed, Scheduler};
use crate::player::Player;

/// Sent when an entity crosses an enemy's detection radius.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEvent {
    pub detector: Entity,
    pub other: Entity,
    pub entered: bool,
}

/// What an enemy did on one engagement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngageAction {
    Hold,
    /// Move horizontally by this many pixels
    Step(f32),
    Attack,
}

/// One engagement step toward a followed target.
///
/// Turns toward the target, closes in while farther than the stop distance,
/// and attacks once within it. A dead target is approached but never attacked.
pub fn engage(
    combatant: &mut Combatant,
    timers: &mut impl Scheduler<CombatTimer>,
    stats: &EnemyStats,
    self_x: f32,
    target_x: f32,
    target_alive: bool,
    delta_secs: f32,
) -> EngageAction {
    if !combatant.is_alive() || combatant.is_stunned() {
        return EngageAction::Hold;
    }

    let facing = Facing::toward(self_x, target_x);
    combatant.update_facing(facing);

    if (target_x - self_x).abs() > stats.stop_distance {
        if combatant.can_move() {
            EngageAction::Step(facing.sign() * stats.move_speed * delta_secs)
        } else {
            EngageAction::Hold
        }
    } else if target_alive && combatant.attack(timers) {
        EngageAction::Attack
    } else {
        EngageAction::Hold
    }
}

/// Compare player positions against detection radii and report crossings.
pub fn update_detectors(
    players: Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    mut detectors: Query<(Entity, &Transform, &mut Detector), With<Enemy>>,
    mut range_events: EventWriter<RangeEvent>,
) {
    for (detector_entity, transform, mut detector) in detectors.iter_mut() {
        for (player, player_transform) in players.iter() {
            let distance = (player_transform.translation.x - transform.translation.x).abs();
            if let Some(entered) = detector.observe(player, distance) {
                range_events.send(RangeEvent {
                    detector: detector_entity,
                    other: player,
                    entered,
                });
            }
        }
    }
}

/// Start or stop following on range crossings.
pub fn apply_range_events(
    mut range_events: EventReader<RangeEvent>,
    mut followers: Query<&mut FollowTarget, With<Enemy>>,
) {
    for event in range_events.read() {
        let Ok(mut follow) = followers.get_mut(event.detector) else {
            continue;
        };

        if event.entered {
            debug!("{:?} now follows {:?}", event.detector, event.other);
            follow.acquire(event.other);
        } else {
            follow.release(event.other);
        }
    }
}

/// Chase and attack followed targets.
pub fn follow_and_engage(
    time: Res<Time>,
    targets: Query<(&Transform, &Combatant), (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (
            &Transform,
            &mut KinematicCharacterController,
            &EnemyStats,
            &mut FollowTarget,
            &mut Combatant,
            &mut CombatTimers,
            &mut Animator,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    for (transform, mut controller, stats, mut follow, mut combatant, mut timers, mut animator) in
        enemies.iter_mut()
    {
        let Some(target) = follow.0 else {
            animator.set_locomotion(Pose::Idle);
            continue;
        };
        let Ok((target_transform, target_combatant)) = targets.get(target) else {
            follow.clear();
            animator.set_locomotion(Pose::Idle);
            continue;
        };

        let action = engage(
            &mut combatant,
            &mut *timers,
            stats,
            transform.translation.x,
            target_transform.translation.x,
            target_combatant.is_alive(),
            time.delta_secs(),
        );

        match action {
            EngageAction::Step(dx) => {
                controller.translation = Some(Vec2::new(dx, 0.0));
                animator.set_locomotion(Pose::Run);
            }
            EngageAction::Hold | EngageAction::Attack => {
                animator.set_locomotion(Pose::Idle);
            }
        }
    }
}

/// Dead enemies stop following.
pub fn drop_targets_on_death(
    mut death_events: EventReader<DeathEvent>,
    mut enemies: Query<(&EnemyType, &mut FollowTarget), With<Enemy>>,
) {
    for event in death_events.read() {
        if let Ok((enemy_type, mut follow)) = enemies.get_mut(event.entity) {
            info!("{} {:?} died", enemy_type.0, event.entity);
            follow.clear();
        }
    }
}

/// Remove enemies whose corpse has lingered long enough.
pub fn remove_dead_enemies(
    mut commands: Commands,
    mut linger_events: EventReader<DeathLingerElapsed>,
    mut enemies: Query<(&EnemyType, &mut CombatTimers), With<Enemy>>,
) {
    for event in linger_events.read() {
        if let Ok((enemy_type, mut timers)) = enemies.get_mut(event.entity) {
            debug!("Removing dead {} {:?}", enemy_type.0, event.entity);
            teardown_combatant(&mut commands, event.entity, &mut *timers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackProfile;

    fn crab() -> Combatant {
        Combatant::new(
            100,
            AttackProfile {
                damage: 25,
                stun_secs: 0.3,
                cooldown_secs: Some(3.0),
            },
            2.0,
        )
    }

    fn stats() -> EnemyStats {
        EnemyStats {
            move_speed: 100.0,
            stop_distance: 70.0,
        }
    }

    #[test]
    fn test_steps_toward_distant_target() {
        let mut enemy = crab();
        let mut timers = CombatTimers::new();

        let action = engage(&mut enemy, &mut timers, &stats(), 0.0, -200.0, true, 0.5);

        assert_eq!(action, EngageAction::Step(-50.0));
        assert_eq!(enemy.facing(), Facing::Left);
        assert!(!enemy.is_attacking());
    }

    #[test]
    fn test_attacks_within_stop_distance() {
        let mut enemy = crab();
        let mut timers = CombatTimers::new();

        let action = engage(&mut enemy, &mut timers, &stats(), 0.0, 60.0, true, 0.1);

        assert_eq!(action, EngageAction::Attack);
        assert!(enemy.is_attacking());
        assert!(timers.is_active(CombatTimer::AttackCooldown));
    }

    #[test]
    fn test_cooldown_blocks_second_attack() {
        let mut enemy = crab();
        let mut timers = CombatTimers::new();
        engage(&mut enemy, &mut timers, &stats(), 0.0, 60.0, true, 0.1);
        enemy.on_attack_animation_end(true);

        let action = engage(&mut enemy, &mut timers, &stats(), 0.0, 60.0, true, 0.1);

        assert_eq!(action, EngageAction::Hold);
    }

    #[test]
    fn test_dead_target_is_not_attacked() {
        let mut enemy = crab();
        let mut timers = CombatTimers::new();

        let action = engage(&mut enemy, &mut timers, &stats(), 0.0, 30.0, false, 0.1);

        assert_eq!(action, EngageAction::Hold);
        assert_eq!(enemy.facing(), Facing::Right);
    }

    fn corpse_app() -> App {
        let mut app = App::new();
        app.add_event::<DeathEvent>()
            .add_event::<DeathLingerElapsed>()
            .add_systems(Update, (drop_targets_on_death, remove_dead_enemies));
        app
    }

    #[test]
    fn test_dead_enemy_stops_following() {
        let mut app = corpse_app();
        let player = app.world_mut().spawn_empty().id();
        let enemy = app
            .world_mut()
            .spawn((
                Enemy,
                EnemyType("crab".to_string()),
                FollowTarget(Some(player)),
                CombatTimers::new(),
            ))
            .id();

        app.world_mut().send_event(DeathEvent { entity: player });
        app.update();
        assert_eq!(
            app.world().get::<FollowTarget>(enemy),
            Some(&FollowTarget(Some(player)))
        );

        app.world_mut().send_event(DeathEvent { entity: enemy });
        app.update();
        assert_eq!(app.world().get::<FollowTarget>(enemy), Some(&FollowTarget(None)));
    }

    #[test]
    fn test_lingered_enemy_is_removed() {
        let mut app = corpse_app();
        let mut timers = CombatTimers::new();
        timers.schedule(CombatTimer::PostDeath, 5.0);
        let enemy = app
            .world_mut()
            .spawn((
                Enemy,
                EnemyType("crab".to_string()),
                FollowTarget::default(),
                timers,
            ))
            .id();

        app.world_mut().send_event(DeathLingerElapsed { entity: enemy });
        app.update();

        assert!(app.world().get::<Enemy>(enemy).is_none());
    }

    #[test]
    fn test_stunned_enemy_holds() {
        let mut enemy = crab();
        let mut timers = CombatTimers::new();
        enemy.take_hit(10, 1.0, &mut timers);

        let action = engage(&mut enemy, &mut timers, &stats(), 0.0, 300.0, true, 0.1);

        assert_eq!(action, EngageAction::Hold);
    }
}
