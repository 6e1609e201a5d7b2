//! UI plugin - HUD only.

use bevy::prelude::*;

use super::hud;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
    }
}
