//! Progress module - state that survives level changes.

mod plugin;
mod store;

pub use plugin::ProgressPlugin;
pub use store::{level_name, ProgressStore, DEFAULT_MAX_HIT_POINTS, FIRST_LEVEL};
