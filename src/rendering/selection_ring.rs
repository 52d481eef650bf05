use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::field::{BubbleField, Playfield};
use crate::core::session::round::RoundState;
use crate::core::session::selection::Selection;
use crate::interaction::InputModality;

pub struct SelectionRingPlugin;

impl Plugin for SelectionRingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_selection_ring);
    }
}

/// Ring gizmo around the selected bubble. Gated on keyboard modality so a
/// pointer click hides the ring, and suppressed entirely during the loss
/// screen.
fn draw_selection_ring(
    mut gizmos: Gizmos,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    field: Res<BubbleField>,
    sel: Res<Selection>,
    round: Res<RoundState>,
    modality: Res<InputModality>,
) {
    if !modality.keyboard || round.is_game_over {
        return;
    }
    let Some(bubble) = sel.current.and_then(|id| field.get(id)) else {
        return;
    };
    let center = playfield.to_world(bubble.position);
    gizmos.circle_2d(
        Isometry2d::from_translation(center),
        bubble.radius + cfg.selection.ring_offset,
        Color::WHITE,
    );
}
