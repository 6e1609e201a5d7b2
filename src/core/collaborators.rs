//! Narrow interfaces the gameplay logic talks to.
//!
//! Pure gameplay code (progress store, level exits, pickups) takes these as
//! `&mut impl Trait` arguments. Inside systems they are backed by the event
//! writers below; tests back them with plain vectors.

use bevy::prelude::*;

use super::events::{HudUpdate, LoadLevelRequest, SoundCue, SoundCueEvent};

/// Loads levels by name.
pub trait LevelLoader {
    fn load_level(&mut self, name: &str);
}

/// Receives values to show on the HUD.
pub trait HudDisplay {
    fn set_hp(&mut self, hit_points: u32);
    fn set_diamond(&mut self, amount: u32);
    fn set_level(&mut self, index: u32);
}

/// Plays non-positional sound cues.
pub trait SoundPlayer {
    fn play_2d(&mut self, cue: SoundCue);
}

impl LevelLoader for EventWriter<'_, LoadLevelRequest> {
    fn load_level(&mut self, name: &str) {
        self.send(LoadLevelRequest {
            name: name.to_string(),
        });
    }
}

impl HudDisplay for EventWriter<'_, HudUpdate> {
    fn set_hp(&mut self, hit_points: u32) {
        self.send(HudUpdate::Hp(hit_points));
    }

    fn set_diamond(&mut self, amount: u32) {
        self.send(HudUpdate::Diamonds(amount));
    }

    fn set_level(&mut self, index: u32) {
        self.send(HudUpdate::Level(index));
    }
}

impl SoundPlayer for EventWriter<'_, SoundCueEvent> {
    fn play_2d(&mut self, cue: SoundCue) {
        self.send(SoundCueEvent(cue));
    }
}

impl LevelLoader for Vec<String> {
    fn load_level(&mut self, name: &str) {
        self.push(name.to_string());
    }
}

impl HudDisplay for Vec<HudUpdate> {
    fn set_hp(&mut self, hit_points: u32) {
        self.push(HudUpdate::Hp(hit_points));
    }

    fn set_diamond(&mut self, amount: u32) {
        self.push(HudUpdate::Diamonds(amount));
    }

    fn set_level(&mut self, index: u32) {
        self.push(HudUpdate::Level(index));
    }
}

impl SoundPlayer for Vec<SoundCue> {
    fn play_2d(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}
