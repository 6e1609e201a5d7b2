//! Audio plugin - plays gameplay sound cues through kira.

use std::path::Path;

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use serde::Deserialize;

use crate::core::{load_ron_file, GameState, SoundCue, SoundCueEvent, DATA_DIR};

/// Sound files per cue, relative to `assets/`. Loaded from `sounds.ron`.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SoundLibrary {
    pub pickup: Option<String>,
    pub door_open: Option<String>,
}

impl SoundLibrary {
    pub fn path(&self, cue: SoundCue) -> Option<&str> {
        match cue {
            SoundCue::Pickup => self.pickup.as_deref(),
            SoundCue::DoorOpen => self.door_open.as_deref(),
        }
    }
}

/// Audio plugin - maps [`SoundCueEvent`]s to sound files.
///
/// Expects `bevy_kira_audio::AudioPlugin` to be added by the binary.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .add_systems(OnEnter(GameState::Loading), load_sound_library)
            .add_systems(Update, play_sound_cues);
    }
}

fn load_sound_library(mut commands: Commands) {
    let path = Path::new(DATA_DIR).join("sounds.ron");

    match load_ron_file::<SoundLibrary>(&path) {
        Ok(library) => {
            info!("Loaded sound library");
            commands.insert_resource(library);
        }
        Err(e) => {
            warn!("Sound cues disabled: {}", e);
        }
    }
}

fn play_sound_cues(
    mut cues: EventReader<SoundCueEvent>,
    library: Res<SoundLibrary>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for SoundCueEvent(cue) in cues.read() {
        let Some(path) = library.path(*cue) else {
            debug!("No sound configured for {:?}", cue);
            continue;
        };

        let handle = asset_server.load::<AudioSource>(path.to_string());
        audio.play(handle);
    }
}
