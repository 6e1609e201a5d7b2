//! Player module - player entity, movement, pickups, and camera.

mod camera;
mod components;
mod movement;
mod pickups;
mod plugin;

pub use camera::PlayerCamera;
pub use components::*;
pub use movement::spawn_player;
pub use pickups::{apply_pickup, POTION_HEAL};
pub use plugin::{restart_after_death, sync_player_hp, PlayerPlugin};
