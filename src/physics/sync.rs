use bevy::prelude::*;

use crate::core::components::{BubbleBody, BubbleHandle};
use crate::core::session::field::{BubbleField, Playfield};
use crate::core::system::system_order::{FieldMirrorSet, PostPhysicsAdjustSet};

pub struct FieldSyncPlugin;

impl Plugin for FieldSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            mirror_bubble_positions
                .in_set(FieldMirrorSet)
                .in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Copy body transforms into the session field, once per frame, before any
/// evaluation runs. The physics engine owns positions; the field is a
/// read-mostly mirror keyed by session id.
pub fn mirror_bubble_positions(
    playfield: Res<Playfield>,
    mut field: ResMut<BubbleField>,
    q: Query<(&Transform, &BubbleHandle), With<BubbleBody>>,
) {
    for (tf, handle) in q.iter() {
        if let Some(bubble) = field.get_mut(handle.0) {
            bubble.position = playfield.to_field(tf.translation.truncate());
        }
    }
}
