//! Player hit points and death flowing into the progress store.

use std::time::Duration;

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use corsair::combat::{
    Animator, AttackProfile, ClipTimings, CombatPlugin, CombatSet, CombatTimers, Combatant,
    HitVolume, Side,
};
use corsair::core::{GameState, HitEvent, HudUpdate, LoadLevelRequest};
use corsair::player::{restart_after_death, sync_player_hp, Player};
use corsair::progress::{ProgressPlugin, ProgressStore};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_state(GameState::InGame)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins((CombatPlugin, ProgressPlugin))
        .add_event::<LoadLevelRequest>()
        .add_event::<HudUpdate>()
        .add_systems(
            Update,
            (sync_player_hp, restart_after_death).after(CombatSet::Feedback),
        );
    app
}

fn spawn_fighter(app: &mut App, side: Side, linger_secs: f32) -> Entity {
    app.world_mut()
        .spawn((
            Combatant::new(100, AttackProfile::default(), linger_secs),
            CombatTimers::new(),
            Animator::new(ClipTimings::default()),
            HitVolume::new(Vec2::new(30.0, 0.0), Vec2::splat(10.0)),
            side,
        ))
        .id()
}

fn hit(app: &mut App, target: Entity, damage: u32) {
    let attacker = app.world_mut().spawn_empty().id();
    app.world_mut().send_event(HitEvent {
        attacker,
        target,
        damage,
        stun_secs: 0.3,
    });
    app.update();
}

fn progress(app: &App) -> &ProgressStore {
    app.world().resource::<ProgressStore>()
}

fn drain<E: Event + Clone>(app: &App, cursor: &mut EventCursor<E>) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    cursor.read(events).cloned().collect()
}

#[test]
fn test_enemy_damage_leaves_progress_alone() {
    let mut app = test_app();
    let crab = spawn_fighter(&mut app, Side::Enemy, 2.0);
    let mut hud_cursor = app.world().resource::<Events<HudUpdate>>().get_cursor();

    hit(&mut app, crab, 25);

    assert_eq!(app.world().get::<Combatant>(crab).unwrap().hit_points(), 75);
    assert_eq!(progress(&app).player_hit_points(), 100);
    assert!(drain(&app, &mut hud_cursor).is_empty());
}

#[test]
fn test_player_damage_is_mirrored_to_progress_and_hud() {
    let mut app = test_app();
    let player = spawn_fighter(&mut app, Side::Player, 3.0);
    app.world_mut().entity_mut(player).insert(Player);
    let mut hud_cursor = app.world().resource::<Events<HudUpdate>>().get_cursor();

    hit(&mut app, player, 40);

    assert_eq!(progress(&app).player_hit_points(), 60);
    assert_eq!(drain(&app, &mut hud_cursor), vec![HudUpdate::Hp(60)]);
}

#[test]
fn test_player_death_restarts_after_linger() {
    let mut app = test_app();
    let player = spawn_fighter(&mut app, Side::Player, 0.5);
    app.world_mut().entity_mut(player).insert(Player);
    {
        let mut store = app.world_mut().resource_mut::<ProgressStore>();
        store.add_diamond(3);
        store.unlock_double_jump();
        assert!(store.change_level(2, &mut Vec::<String>::new()));
    }
    let mut load_cursor = app
        .world()
        .resource::<Events<LoadLevelRequest>>()
        .get_cursor();

    hit(&mut app, player, 150);

    assert_eq!(progress(&app).player_hit_points(), 0);
    assert_eq!(progress(&app).collected_diamonds(), 3);
    assert!(drain(&app, &mut load_cursor).is_empty());

    let mut requests = Vec::new();
    for _ in 0..10 {
        app.update();
        requests.extend(drain(&app, &mut load_cursor));
    }

    assert_eq!(
        requests,
        vec![LoadLevelRequest {
            name: "level_1".to_string()
        }]
    );
    let store = progress(&app);
    assert_eq!(store.player_hit_points(), store.max_hit_points());
    assert_eq!(store.collected_diamonds(), 0);
    assert!(!store.double_jump_unlocked());
    assert_eq!(store.current_level_index(), 1);
}
