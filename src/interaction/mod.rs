pub mod keyboard;
pub mod pointer;

use bevy::prelude::*;

/// Which kind of device produced the last input. The selection ring only
/// renders for non-pointer input so mouse users never see a stale ring.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputModality {
    pub keyboard: bool,
}

pub(crate) fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

pub(crate) fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}
