//! Combat systems - timers, animation signals, hit detection, and cues.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animation::{AnimationPlayer, AnimationSignal, Animator, OverrideClip, Pose};
use super::combatant::{CombatCue, Combatant, Reaction};
use super::components::*;
use crate::core::{
    DeathEvent, DeathLingerElapsed, GameState, HitEvent, HpChangedEvent, Scheduler,
};

/// System set ordering for combat.
///
/// Player input and enemy AI run in `Input`, so attacks started this frame
/// are animated in `Action`, land in `Damage` and are presented in
/// `Feedback`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Action,
    Damage,
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<ScreenShake>()

        // Events
        .add_event::<HitEvent>()
        .add_event::<HpChangedEvent>()
        .add_event::<DeathEvent>()
        .add_event::<DeathLingerElapsed>()

        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Action,
                CombatSet::Damage,
                CombatSet::Feedback,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        // Action systems
        .add_systems(
            Update,
            (tick_combat_timers, drive_animations)
                .chain()
                .in_set(CombatSet::Action),
        )

        // Damage systems
        .add_systems(
            Update,
            (detect_hits, apply_hits).chain().in_set(CombatSet::Damage),
        )

        // Feedback systems
        .add_systems(
            Update,
            (apply_combat_cues, update_hp_indicators, sync_sprites)
                .chain()
                .in_set(CombatSet::Feedback),
        );
}

/// Cancel every pending timer of a combatant and despawn it.
///
/// All despawn paths for combatants go through here so no timer outlives
/// its owner.
pub fn teardown_combatant(commands: &mut Commands, entity: Entity, timers: &mut CombatTimers) {
    timers.cancel_all();
    commands.entity(entity).despawn_recursive();
}

/// Text of the floating label above a combatant.
pub fn indicator_text(hit_points: u32) -> String {
    format!("HP: {hit_points}")
}

/// Advance stun, cooldown and post-death timers and dispatch expirations.
fn tick_combat_timers(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Combatant, &mut CombatTimers)>,
    mut linger_events: EventWriter<DeathLingerElapsed>,
) {
    for (entity, mut combatant, mut timers) in query.iter_mut() {
        if timers.pending() == 0 {
            continue;
        }

        for timer in timers.tick(time.delta()) {
            if combatant.on_timer(timer) {
                linger_events.send(DeathLingerElapsed { entity });
            }
        }
    }
}

/// Advance animators and feed hit-window and completion signals back.
fn drive_animations(
    time: Res<Time>,
    mut query: Query<(&mut Combatant, &mut Animator, Option<&mut HitVolume>)>,
) {
    for (mut combatant, mut animator, mut volume) in query.iter_mut() {
        for signal in animator.tick(time.delta()) {
            match signal {
                AnimationSignal::HitWindowOpened => {
                    if combatant.open_hit_window() {
                        if let Some(volume) = volume.as_mut() {
                            volume.reset();
                        }
                    }
                }
                AnimationSignal::HitWindowClosed => {
                    combatant.close_hit_window();
                    if let Some(volume) = volume.as_mut() {
                        volume.reset();
                    }
                }
                AnimationSignal::OverrideEnded { completed, .. } => {
                    combatant.on_attack_animation_end(completed);
                }
            }
        }
    }
}

/// Query live hit-volumes against the physics world.
fn detect_hits(
    rapier_context: Query<&RapierContext>,
    mut attackers: Query<(Entity, &Transform, &Combatant, &Side, &mut HitVolume)>,
    targets: Query<(&Side, &Combatant)>,
    mut hit_events: EventWriter<HitEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (attacker, transform, combatant, side, mut volume) in attackers.iter_mut() {
        if !combatant.hit_volume_enabled() {
            continue;
        }

        let center = volume.center(transform.translation.truncate(), combatant.facing());
        let shape = Collider::cuboid(volume.half_extents.x, volume.half_extents.y);

        let mut overlapping = Vec::new();
        context.intersections_with_shape(
            center,
            0.0,
            &shape,
            QueryFilter::default()
                .exclude_sensors()
                .exclude_collider(attacker),
            |entity| {
                overlapping.push(entity);
                true
            },
        );

        for target in overlapping {
            let Ok((target_side, target_combatant)) = targets.get(target) else {
                continue;
            };
            if !side.opposes(*target_side) || !target_combatant.is_alive() {
                continue;
            }
            if !volume.register(target) {
                continue;
            }

            let profile = combatant.attack_profile();
            hit_events.send(HitEvent {
                attacker,
                target,
                damage: profile.damage,
                stun_secs: profile.stun_secs,
            });
        }
    }
}

/// Apply landed hits to their targets.
fn apply_hits(
    mut hit_events: EventReader<HitEvent>,
    mut targets: Query<(&mut Combatant, &mut CombatTimers, &Side)>,
    mut screen_shake: ResMut<ScreenShake>,
) {
    for hit in hit_events.read() {
        let Ok((mut combatant, mut timers, side)) = targets.get_mut(hit.target) else {
            continue;
        };
        if !combatant.is_alive() || !combatant.is_active() {
            continue;
        }

        debug!(
            "{:?} hit {:?} for {} damage",
            hit.attacker, hit.target, hit.damage
        );
        combatant.take_hit(hit.damage, hit.stun_secs, &mut *timers);

        if *side == Side::Player {
            screen_shake.shake(6.0, 0.2);
        }
    }
}

/// Drain queued cues into animation, indicator and event updates.
fn apply_combat_cues(
    mut query: Query<(Entity, &mut Combatant, Option<&mut Animator>)>,
    mut indicators: Query<(&HpIndicator, &mut Visibility)>,
    mut hp_events: EventWriter<HpChangedEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for (entity, mut combatant, mut animator) in query.iter_mut() {
        if combatant.cues().is_empty() {
            continue;
        }

        for cue in combatant.drain_cues() {
            match cue {
                CombatCue::HpChanged(hit_points) => {
                    hp_events.send(HpChangedEvent { entity, hit_points });
                }
                CombatCue::HideIndicator => {
                    for (indicator, mut visibility) in indicators.iter_mut() {
                        if indicator.owner == entity {
                            *visibility = Visibility::Hidden;
                        }
                    }
                }
                CombatCue::PlayAttack => {
                    if let Some(animator) = animator.as_mut() {
                        animator.play_override(OverrideClip::Attack, 1.0, 0.0);
                    }
                }
                CombatCue::StopOverrides => {
                    if let Some(animator) = animator.as_mut() {
                        animator.stop_all_overrides();
                    }
                }
                CombatCue::JumpTo(reaction) => {
                    if let Some(animator) = animator.as_mut() {
                        animator.jump_to_state(reaction);
                    }
                    if reaction == Reaction::Die {
                        info!("{:?} died", entity);
                        death_events.send(DeathEvent { entity });
                    }
                }
            }
        }
    }
}

/// Rewrite floating HP labels when their owner's hit points change.
fn update_hp_indicators(
    mut hp_events: EventReader<HpChangedEvent>,
    mut indicators: Query<(&HpIndicator, &mut Text2d)>,
) {
    for event in hp_events.read() {
        for (indicator, mut text) in indicators.iter_mut() {
            if indicator.owner == event.entity {
                text.0 = indicator_text(event.hit_points);
            }
        }
    }
}

/// Mirror facing and pose onto the placeholder sprite, writing only on change.
fn sync_sprites(mut query: Query<(&Combatant, &Animator, &Side, &mut Sprite)>) {
    for (combatant, animator, side, mut sprite) in query.iter_mut() {
        let flip = combatant.facing() == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }

        let color = pose_color(*side, animator.pose());
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

fn pose_color(side: Side, pose: Pose) -> Color {
    match (side, pose) {
        (_, Pose::Dead) => Color::srgb(0.35, 0.35, 0.35),
        (_, Pose::TakeHit) => Color::srgb(1.0, 0.25, 0.25),
        (Side::Player, Pose::Attack) => Color::srgb(0.55, 0.75, 1.0),
        (Side::Player, _) => Color::srgb(0.2, 0.4, 0.9),
        (Side::Enemy, Pose::Attack) => Color::srgb(1.0, 0.8, 0.3),
        (Side::Enemy, _) => Color::srgb(0.9, 0.5, 0.2),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::combat::ClipTimings;

    fn step(app: &mut App, millis: u64) {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            millis,
        )));
        app.update();
    }

    #[test]
    fn test_hit_window_survives_long_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, drive_animations);
        step(&mut app, 100);

        let mut combatant = Combatant::new(100, AttackProfile::default(), 3.0);
        assert!(combatant.attack(&mut CombatTimers::new()));
        let mut animator = Animator::new(ClipTimings {
            attack_secs: 0.4,
            hit_window: (0.3, 0.7),
            take_hit_secs: 0.3,
        });
        animator.play_override(OverrideClip::Attack, 1.0, 0.0);
        let entity = app.world_mut().spawn((combatant, animator)).id();
        let window = |app: &App| {
            app.world()
                .get::<Combatant>(entity)
                .map(Combatant::hit_volume_enabled)
        };

        // 0.1 s of a 0.4 s clip is still before the window
        step(&mut app, 100);
        assert_eq!(window(&app), Some(false));

        // A 0.2 s hitch jumps past both ends of the window
        step(&mut app, 200);
        assert_eq!(window(&app), Some(true));

        step(&mut app, 100);
        assert_eq!(window(&app), Some(false));
    }

    #[test]
    fn test_indicator_text() {
        assert_eq!(indicator_text(75), "HP: 75");
    }

    #[test]
    fn test_pose_colors_distinguish_reactions() {
        assert_ne!(
            pose_color(Side::Enemy, Pose::Idle),
            pose_color(Side::Enemy, Pose::TakeHit)
        );
        assert_eq!(
            pose_color(Side::Player, Pose::Dead),
            pose_color(Side::Enemy, Pose::Dead)
        );
    }
}
