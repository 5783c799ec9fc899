//! Shared flat-color palettes for world and minimap rendering.

use chronicle_render::Color;
use chronicle_sim::PlayerId;

/// Flat fallback color for a terrain id (used when the tile art is
/// missing, and for minimap cells).
#[must_use]
pub fn terrain_color(terrain: u16) -> Color {
    match terrain % 4 {
        0 => Color::rgb(0.25, 0.55, 0.2),
        1 => Color::rgb(0.2, 0.45, 0.15),
        2 => Color::rgb(0.55, 0.45, 0.25),
        _ => Color::rgb(0.15, 0.3, 0.6),
    }
}

/// Classic eight-player palette.
#[must_use]
pub fn player_color(player: PlayerId) -> Color {
    match player.0 % 8 {
        0 => Color::rgb(0.7, 0.7, 0.7),
        1 => Color::rgb(0.0, 0.0, 1.0),
        2 => Color::rgb(1.0, 0.0, 0.0),
        3 => Color::rgb(0.0, 0.8, 0.0),
        4 => Color::rgb(1.0, 1.0, 0.0),
        5 => Color::rgb(0.0, 0.8, 0.8),
        6 => Color::rgb(0.8, 0.0, 0.8),
        _ => Color::rgb(1.0, 0.5, 0.0),
    }
}
