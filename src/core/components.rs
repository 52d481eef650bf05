use bevy::prelude::*;

use crate::core::session::field::BubbleId;

/// Marker component identifying a bubble's physics body entity (holds the
/// rapier rigid body & collider).
#[derive(Component)]
pub struct BubbleBody;

/// Session handle carried by the body entity; the reverse of the
/// `BubbleBodies` side table.
#[derive(Component, Debug, Deref, Copy, Clone)]
pub struct BubbleHandle(pub BubbleId);

/// Tag component for the circle mesh child of a bubble body.
#[derive(Component)]
pub struct BubbleVisual;

/// Short-lived burst particle spawned when a chain pops.
#[derive(Component, Debug, Copy, Clone)]
pub struct PopParticle {
    pub spawned_at: f64,
}
