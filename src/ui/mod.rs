//! UI module - the HUD.

mod hud;
mod plugin;

pub use hud::{format_diamonds, format_hp, format_level, hud_text, HudLine};
pub use plugin::UiPlugin;
