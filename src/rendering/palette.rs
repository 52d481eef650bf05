use bevy::prelude::*;

/// Fixed bubble palette; spawn assigns indices round-robin.
pub const BUBBLE_COLORS: [Color; 3] = [
    Color::srgb(1.0, 0.0, 0.0), // red
    Color::srgb(0.0, 1.0, 0.0), // green
    Color::srgb(0.0, 0.0, 1.0), // blue
];

/// Flash color the death cascade fades through.
pub const DEATH_HIGHLIGHT: Color = Color::WHITE;

#[inline]
pub fn color_for_index(i: usize) -> Color {
    BUBBLE_COLORS[i % BUBBLE_COLORS.len()]
}
