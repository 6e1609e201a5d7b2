//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{AttackProfile, ClipTimings, HitVolumeConfig};
use crate::core::{check_delay, DataLoadError};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
    /// Jumps started since the player last stood on the ground
    pub jumps_used: u32,
    /// 1 normally, 2 with the double jump upgrade
    pub max_jumps: u32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MovementState {
    pub fn new(max_jumps: u32) -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
            jumps_used: 0,
            max_jumps,
        }
    }

    /// Start a jump if any are left. Returns whether it started.
    pub fn try_jump(&mut self, jump_force: f32) -> bool {
        if self.jumps_used >= self.max_jumps {
            return false;
        }
        self.jumps_used += 1;
        self.vertical_velocity = jump_force;
        true
    }

    /// Touching ground while not rising restores all jumps.
    pub fn land(&mut self) {
        if self.vertical_velocity <= 0.0 {
            self.vertical_velocity = 0.0;
            self.jumps_used = 0;
        }
    }

    /// Kill any upward motion, e.g. when control is taken away.
    pub fn stop(&mut self) {
        self.vertical_velocity = self.vertical_velocity.min(0.0);
    }
}

/// Player tuning, loaded from `assets/data/player.ron`.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed in pixels per second
    pub move_speed: f32,
    /// Jump velocity in pixels per second
    pub jump_force: f32,
    /// Gravity acceleration in pixels per second squared
    pub gravity: f32,
    pub max_hit_points: u32,
    pub attack: AttackProfile,
    /// Seconds between death and restart
    pub death_linger_secs: f32,
    /// Body size in pixels
    pub size: (f32, f32),
    pub hit_volume: HitVolumeConfig,
    pub animation: ClipTimings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            jump_force: 520.0,
            gravity: 1400.0,
            max_hit_points: 100,
            attack: AttackProfile::default(),
            death_linger_secs: 3.0,
            size: (28.0, 40.0),
            hit_volume: HitVolumeConfig {
                offset: (28.0, 0.0),
                half_extents: (16.0, 14.0),
            },
            animation: ClipTimings::default(),
        }
    }
}

impl PlayerConfig {
    /// Reject configs whose delays could not drive a timer.
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        self.attack.validate(origin)?;
        self.animation.validate(origin)?;
        check_delay(origin, "death_linger_secs", self.death_linger_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_jump_until_landing() {
        let mut movement = MovementState::new(1);

        assert!(movement.try_jump(500.0));
        assert!(!movement.try_jump(500.0));

        movement.vertical_velocity = -10.0;
        movement.land();
        assert!(movement.try_jump(500.0));
    }

    #[test]
    fn test_double_jump_allows_second_jump() {
        let mut movement = MovementState::new(2);

        assert!(movement.try_jump(500.0));
        assert!(movement.try_jump(500.0));
        assert!(!movement.try_jump(500.0));
    }

    #[test]
    fn test_landing_while_rising_keeps_jump_count() {
        let mut movement = MovementState::new(2);
        movement.try_jump(500.0);

        movement.land();

        assert_eq!(movement.jumps_used, 1);
        assert_eq!(movement.vertical_velocity, 500.0);
    }

    #[test]
    fn test_bundled_player_config_parses() {
        let config: PlayerConfig = crate::core::parse_ron(
            "player.ron",
            include_str!("../../assets/data/player.ron"),
        )
        .unwrap();

        assert_eq!(config.max_hit_points, 100);
        assert_eq!(config.attack.damage, 25);
        assert_eq!(config.attack.cooldown_secs, None);
        assert_eq!(config.death_linger_secs, 3.0);
        assert!(config.validate("player.ron").is_ok());
    }

    #[test]
    fn test_unusable_delays_are_rejected() {
        let config: PlayerConfig =
            crate::core::parse_ron("inline", "(death_linger_secs: inf)").unwrap();
        assert!(matches!(
            config.validate("inline"),
            Err(DataLoadError::Invalid { .. })
        ));

        let config: PlayerConfig = crate::core::parse_ron(
            "inline",
            "(animation: (attack_secs: 0.4, hit_window: (0.3, 0.7), take_hit_secs: -inf))",
        )
        .unwrap();
        assert!(config.validate("inline").is_err());
    }
}
