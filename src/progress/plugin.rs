//! Progress plugin - registers the process-wide progress store.

use bevy::prelude::*;

use super::store::ProgressStore;

/// Progress plugin - owns the [`ProgressStore`] resource.
pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressStore>();
    }
}
