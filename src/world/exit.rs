//! Level exit doors.
//!
//! Walking into an armed door takes control away from the player, opens the
//! door and, after a short wait, asks the progress store to change level.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::builder::LevelEntity;
use super::data::ExitDef;
use crate::combat::Combatant;
use crate::core::{
    LevelLoader, LoadLevelRequest, Scheduler, SoundCue, SoundCueEvent, SoundPlayer, TimerSlots,
};
use crate::player::{MovementState, Player};
use crate::progress::ProgressStore;

const DOOR_CLOSED_COLOR: Color = Color::srgb(0.45, 0.3, 0.15);
const DOOR_OPEN_COLOR: Color = Color::srgb(0.95, 0.85, 0.4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTimer {
    /// Delay between the door opening and the level change
    Wait,
}

pub type TransitionTimers = TimerSlots<TransitionTimer>;

/// One-shot trigger leading to another level.
#[derive(Component, Debug, Clone)]
pub struct LevelExit {
    pub target_level_index: i32,
    pub wait_secs: f32,
    armed: bool,
}

impl LevelExit {
    pub fn new(target_level_index: i32, wait_secs: f32) -> Self {
        Self {
            target_level_index,
            wait_secs,
            armed: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The player walked in. Fires only once, and only for a live, active
    /// player: the player is deactivated and the wait starts.
    pub fn on_player_enter(
        &mut self,
        player: &mut Combatant,
        timers: &mut impl Scheduler<TransitionTimer>,
    ) -> bool {
        if !self.armed || !player.is_alive() || !player.is_active() {
            return false;
        }

        player.deactivate();
        self.armed = false;
        timers.schedule(TransitionTimer::Wait, self.wait_secs);
        true
    }

    /// The wait elapsed: request the target level.
    pub fn on_timer(
        &self,
        timer: TransitionTimer,
        progress: &mut ProgressStore,
        loader: &mut impl LevelLoader,
    ) -> bool {
        match timer {
            TransitionTimer::Wait => progress.change_level(self.target_level_index, loader),
        }
    }
}

/// Spawn the exit door sensor.
pub fn spawn_exit(commands: &mut Commands, exit: &ExitDef) -> Entity {
    let (width, height) = exit.size;

    commands
        .spawn((
            Name::new("Level Exit"),
            LevelExit::new(exit.target_level_index, exit.wait_secs),
            TransitionTimers::new(),
            LevelEntity,
            Sprite::from_color(DOOR_CLOSED_COLOR, Vec2::new(width, height)),
            Transform::from_xyz(exit.position.0, exit.position.1, 0.2),
            Collider::cuboid(width / 2.0, height / 2.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ))
        .id()
}

/// Fire exits the player walks into.
pub fn detect_exit_entry(
    mut collisions: EventReader<CollisionEvent>,
    mut exits: Query<(&mut LevelExit, &mut TransitionTimers, &mut Sprite)>,
    mut players: Query<(&mut Combatant, &mut MovementState), With<Player>>,
    mut sounds: EventWriter<SoundCueEvent>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let (player, door) = if players.contains(*a) && exits.contains(*b) {
            (*a, *b)
        } else if players.contains(*b) && exits.contains(*a) {
            (*b, *a)
        } else {
            continue;
        };

        let Ok((mut exit, mut timers, mut sprite)) = exits.get_mut(door) else {
            continue;
        };
        let Ok((mut combatant, mut movement)) = players.get_mut(player) else {
            continue;
        };

        if exit.on_player_enter(&mut combatant, &mut *timers) {
            info!("Player reached exit to level {}", exit.target_level_index);
            movement.stop();
            sprite.color = DOOR_OPEN_COLOR;
            sounds.play_2d(SoundCue::DoorOpen);
        }
    }
}

/// Advance exit waits and request the level change when they elapse.
pub fn tick_exit_timers(
    time: Res<Time>,
    mut exits: Query<(&LevelExit, &mut TransitionTimers)>,
    mut progress: ResMut<ProgressStore>,
    mut loader: EventWriter<LoadLevelRequest>,
) {
    for (exit, mut timers) in exits.iter_mut() {
        if timers.pending() == 0 {
            continue;
        }

        for timer in timers.tick(time.delta()) {
            if !exit.on_timer(timer, &mut progress, &mut loader) {
                warn!(
                    "Exit targets invalid level index {}",
                    exit.target_level_index
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackProfile;
    use std::time::Duration;

    fn player() -> Combatant {
        Combatant::new(100, AttackProfile::default(), 3.0)
    }

    #[test]
    fn test_exit_fires_once() {
        let mut exit = LevelExit::new(2, 1.5);
        let mut timers = TransitionTimers::new();
        let mut combatant = player();

        assert!(exit.on_player_enter(&mut combatant, &mut timers));
        assert!(!exit.is_armed());
        assert!(!combatant.is_active());
        assert!(!combatant.can_move());
        assert_eq!(timers.remaining_secs(TransitionTimer::Wait), Some(1.5));

        let mut other = player();
        assert!(!exit.on_player_enter(&mut other, &mut timers));
        assert!(other.is_active());
    }

    #[test]
    fn test_dead_player_does_not_trigger() {
        let mut exit = LevelExit::new(2, 1.0);
        let mut timers = TransitionTimers::new();
        let mut combatant = player();
        let mut combat_timers = crate::combat::CombatTimers::new();
        combatant.take_hit(100, 0.3, &mut combat_timers);

        assert!(!exit.on_player_enter(&mut combatant, &mut timers));
        assert!(exit.is_armed());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_wait_expiry_changes_level() {
        let mut exit = LevelExit::new(2, 1.0);
        let mut timers = TransitionTimers::new();
        let mut combatant = player();
        let mut progress = ProgressStore::default();
        let mut loads: Vec<String> = Vec::new();

        exit.on_player_enter(&mut combatant, &mut timers);
        assert!(timers.tick(Duration::from_millis(500)).is_empty());

        for timer in timers.tick(Duration::from_millis(600)) {
            assert!(exit.on_timer(timer, &mut progress, &mut loads));
        }

        assert_eq!(progress.current_level_index(), 2);
        assert_eq!(loads, vec!["level_2".to_string()]);
    }

    #[test]
    fn test_invalid_target_loads_nothing() {
        let exit = LevelExit::new(0, 1.0);
        let mut progress = ProgressStore::default();
        let mut loads: Vec<String> = Vec::new();

        assert!(!exit.on_timer(TransitionTimer::Wait, &mut progress, &mut loads));
        assert!(loads.is_empty());
        assert_eq!(progress.current_level_index(), 1);
    }
}
