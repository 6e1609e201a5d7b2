//! World module - levels, exits, and collectables.

mod builder;
mod collectables;
mod data;
mod exit;
mod plugin;

pub use builder::LevelEntity;
pub use collectables::{Collectable, CollectableKind};
pub use data::{LevelDefinition, LevelRegistry};
pub use exit::{LevelExit, TransitionTimer, TransitionTimers};
pub use plugin::WorldPlugin;
