//! Core game module - states, events, timers, and collaborator interfaces.
//!
//! This module provides the foundation that all other game systems build upon.

mod collaborators;
mod data;
mod error;
mod events;
mod plugin;
mod states;
mod timers;

pub use collaborators::*;
pub use data::{check_delay, load_ron_dir, load_ron_file, parse_ron, DATA_DIR};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use timers::*;
