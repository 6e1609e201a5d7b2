//! World plugin - level loading, exits, and collectables.

use bevy::prelude::*;

use crate::combat::{teardown_combatant, CombatSet, CombatTimers};
use crate::core::{
    GameState, HudDisplay, HudUpdate, LevelLoader, LoadLevelRequest, Scheduler,
};
use crate::enemies::EnemyRegistry;
use crate::player::{spawn_player, PlayerConfig};
use crate::progress::{level_name, ProgressStore};

use super::builder::{build_level, LevelEntity};
use super::data::{load_level_definitions, LevelRegistry};
use super::exit::{self, TransitionTimers};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_level_definitions)
            .add_systems(OnExit(GameState::Loading), request_first_level)
            .add_systems(Update, exit::tick_exit_timers.in_set(CombatSet::Action))
            .add_systems(Update, exit::detect_exit_entry.in_set(CombatSet::Damage))
            .add_systems(
                Update,
                load_requested_level
                    .after(CombatSet::Feedback)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Ask for the level stored in progress once loading is done.
fn request_first_level(progress: Res<ProgressStore>, mut loader: EventWriter<LoadLevelRequest>) {
    loader.load_level(&level_name(progress.current_level_index()));
}

/// Tear down the current level and build the requested one.
///
/// Only the last request of a frame is honored.
fn load_requested_level(
    mut commands: Commands,
    mut requests: EventReader<LoadLevelRequest>,
    level_registry: Res<LevelRegistry>,
    enemy_registry: Res<EnemyRegistry>,
    player_config: Res<PlayerConfig>,
    progress: Res<ProgressStore>,
    mut level_entities: Query<
        (
            Entity,
            Option<&mut CombatTimers>,
            Option<&mut TransitionTimers>,
        ),
        With<LevelEntity>,
    >,
    mut hud: EventWriter<HudUpdate>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    let Some(level) = level_registry.get(&request.name) else {
        error!("Level '{}' not found in registry!", request.name);
        return;
    };

    for (entity, combat_timers, transition_timers) in level_entities.iter_mut() {
        if let Some(mut timers) = transition_timers {
            timers.cancel_all();
        }
        match combat_timers {
            Some(mut timers) => teardown_combatant(&mut commands, entity, &mut *timers),
            None => commands.entity(entity).despawn_recursive(),
        }
    }

    info!("Building level: {}", level.name);
    let spawn = build_level(&mut commands, level, &enemy_registry);

    let player = spawn_player(&mut commands, &player_config, &progress, spawn);
    commands.entity(player).insert(LevelEntity);

    hud.set_hp(progress.player_hit_points());
    hud.set_diamond(progress.collected_diamonds());
    hud.set_level(progress.current_level_index());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;
    use crate::player::Player;
    use crate::world::TransitionTimer;

    fn level_app() -> App {
        let level = parse_ron(
            "inline",
            "(name: \"Dock\", player_spawn: (10.0, 20.0), \
             platforms: [(position: (0.0, 0.0), size: (200.0, 16.0))], \
             exit: Some((position: (90.0, 30.0), size: (32.0, 48.0), target_level_index: 2)))",
        )
        .unwrap();
        let mut levels = LevelRegistry::default();
        levels.levels.insert("level_1".to_string(), level);

        let mut progress = ProgressStore::new(100);
        progress.set_player_hp(60);
        progress.add_diamond(2);

        let mut app = App::new();
        app.add_event::<LoadLevelRequest>()
            .add_event::<HudUpdate>()
            .insert_resource(levels)
            .insert_resource(progress)
            .init_resource::<EnemyRegistry>()
            .init_resource::<PlayerConfig>()
            .add_systems(Update, load_requested_level);
        app
    }

    fn spawn_old_level(app: &mut App) -> (Entity, Entity) {
        let mut waiting = TransitionTimers::new();
        waiting.schedule(TransitionTimer::Wait, 2.0);
        let door = app.world_mut().spawn((LevelEntity, waiting)).id();

        let mut stunned = CombatTimers::new();
        stunned.schedule(crate::combat::CombatTimer::Stun, 1.0);
        let crab = app.world_mut().spawn((LevelEntity, stunned)).id();
        (door, crab)
    }

    fn hud_updates(app: &App) -> Vec<HudUpdate> {
        let events = app.world().resource::<Events<HudUpdate>>();
        events.get_cursor().read(events).copied().collect()
    }

    #[test]
    fn test_rebuild_replaces_level_and_pushes_hud() {
        let mut app = level_app();
        let (door, crab) = spawn_old_level(&mut app);

        app.world_mut().send_event(LoadLevelRequest {
            name: "level_1".to_string(),
        });
        app.update();

        assert!(app.world().get::<LevelEntity>(door).is_none());
        assert!(app.world().get::<LevelEntity>(crab).is_none());

        let mut players = app.world_mut().query_filtered::<&Transform, With<Player>>();
        let spawned: Vec<Vec2> = players
            .iter(app.world())
            .map(|t| t.translation.truncate())
            .collect();
        assert_eq!(spawned, vec![Vec2::new(10.0, 20.0)]);

        assert_eq!(
            hud_updates(&app),
            vec![HudUpdate::Hp(60), HudUpdate::Diamonds(2), HudUpdate::Level(1)]
        );
    }

    #[test]
    fn test_unknown_level_keeps_current_one() {
        let mut app = level_app();
        let (door, crab) = spawn_old_level(&mut app);

        app.world_mut().send_event(LoadLevelRequest {
            name: "level_9".to_string(),
        });
        app.update();

        let timers = app.world().get::<TransitionTimers>(door).unwrap();
        assert!(timers.is_active(TransitionTimer::Wait));
        assert!(app.world().get::<CombatTimers>(crab).is_some());
        assert!(hud_updates(&app).is_empty());
    }
}
