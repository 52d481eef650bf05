use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::field::{BubbleField, BubbleId, Playfield};
use crate::core::session::round::RoundState;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::game_over::RestartRequested;
use crate::gameplay::pop::{PopRequested, PopResolveSet};
use crate::interaction::{primary_pointer_world_pos, InputModality};

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputModality>().add_systems(
            Update,
            handle_pointer_tap
                .in_set(PrePhysicsSet)
                .before(PopResolveSet),
        );
    }
}

/// Bubble under the point, nearest center first. Which of two overlapping
/// bubbles wins is implementation-defined; only containment matters.
pub fn bubble_at_point(field: &BubbleField, point: Vec2) -> Option<BubbleId> {
    let mut best: Option<(BubbleId, f32)> = None;
    for bubble in field.iter() {
        let d = bubble.position.distance(point);
        if d <= bubble.radius && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((bubble.id, d));
        }
    }
    best.map(|(id, _)| id)
}

fn handle_pointer_tap(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    field: Res<BubbleField>,
    round: Res<RoundState>,
    mut modality: ResMut<InputModality>,
    mut pop: EventWriter<PopRequested>,
    mut restart: EventWriter<RestartRequested>,
) {
    let released =
        buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some();
    if !released {
        return;
    }
    modality.keyboard = false;

    if round.is_game_over {
        if round.accepts_restart(time.elapsed_secs_f64(), cfg.round.restart_delay as f64) {
            restart.write(RestartRequested);
        }
        return;
    }

    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    let point = playfield.to_field(world_pos);

    if let Some(target) = bubble_at_point(&field, point) {
        pop.write(PopRequested { target });
    }
}
