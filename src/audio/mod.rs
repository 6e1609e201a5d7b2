//! Audio module - sound cues.

mod plugin;

pub use plugin::{AudioCuePlugin, SoundLibrary};
