//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame)
/// - Level, HUD and sound events (combat events belong to `CombatPlugin`)
/// - The quit key
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<LoadLevelRequest>()
            .add_event::<HudUpdate>()
            .add_event::<SoundCueEvent>()

            // Data files are read synchronously on entering Loading, so
            // the game can start right away
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Quit with Q
            .add_systems(
                Update,
                handle_quit_input.run_if(in_state(GameState::InGame)),
            );
    }
}

fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn handle_quit_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        info!("Quit requested");
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quit_app() -> App {
        let mut app = App::new();
        app.add_event::<AppExit>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, handle_quit_input);
        app
    }

    fn exit_requests(app: &App) -> usize {
        let events = app.world().resource::<Events<AppExit>>();
        events.get_cursor().read(events).count()
    }

    #[test]
    fn test_q_requests_exit() {
        let mut app = quit_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyQ);
        app.update();

        assert_eq!(exit_requests(&app), 1);
    }

    #[test]
    fn test_escape_does_nothing() {
        let mut app = quit_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        assert_eq!(exit_requests(&app), 0);
    }
}
