//! In-game HUD - hit points, diamonds and level.
//!
//! The HUD is push-only: it shows whatever [`HudUpdate`] last said and never
//! reads game state itself.

use bevy::prelude::*;

use crate::core::HudUpdate;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Which HUD line a text entity shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Hp,
    Diamonds,
    Level,
}

pub fn format_hp(hit_points: u32) -> String {
    format!("HP: {hit_points}")
}

pub fn format_diamonds(amount: u32) -> String {
    format!("Diamonds: {amount}")
}

pub fn format_level(index: u32) -> String {
    format!("Level: {index}")
}

/// Line and text for an update.
pub fn hud_text(update: HudUpdate) -> (HudLine, String) {
    match update {
        HudUpdate::Hp(hit_points) => (HudLine::Hp, format_hp(hit_points)),
        HudUpdate::Diamonds(amount) => (HudLine::Diamonds, format_diamonds(amount)),
        HudUpdate::Level(index) => (HudLine::Level, format_level(index)),
    }
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(Update, apply_hud_updates);
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // HUD root container (top-left corner)
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_line(parent, HudLine::Hp, format_hp(0));
            spawn_line(parent, HudLine::Diamonds, format_diamonds(0));
            spawn_line(parent, HudLine::Level, format_level(0));
        });
}

fn spawn_line(parent: &mut ChildBuilder, line: HudLine, text: String) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.9, 0.8)),
        Node {
            margin: UiRect::bottom(Val::Px(4.0)),
            ..default()
        },
        line,
    ));
}

/// Write pushed values into the matching lines.
fn apply_hud_updates(mut updates: EventReader<HudUpdate>, mut lines: Query<(&HudLine, &mut Text)>) {
    for update in updates.read() {
        let (target, value) = hud_text(*update);
        for (line, mut text) in lines.iter_mut() {
            if *line == target {
                text.0 = value.clone();
            }
        }
    }
}
