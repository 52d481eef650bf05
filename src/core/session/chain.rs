use bevy::prelude::*;

use super::connectivity::ColorFilter;
use super::field::{Bubble, BubbleField, BubbleId};
use super::round::RoundState;
use super::selection::{self, Selection};

/// Result of a chain pop: the removed bubbles (full records, so the caller
/// can tear down physics bodies and emit burst visuals), the pre-removal
/// position of the clicked bubble, and the chain's color.
#[derive(Debug, Clone)]
pub struct PopOutcome {
    pub removed: Vec<Bubble>,
    pub origin: Vec2,
    pub color: usize,
}

impl PopOutcome {
    #[inline]
    pub fn chain_len(&self) -> usize {
        self.removed.len()
    }
}

/// Pop the same-color connected component containing `clicked`.
///
/// Removal is bulk and atomic with respect to this call: the component is
/// computed first, then every member leaves the arena before returning. A
/// valid live bubble always pops at least itself. Afterwards the selection
/// moves to the bubble nearest the clicked position, keeping keyboard
/// navigation continuous across the pop.
pub fn pop_chain(
    field: &mut BubbleField,
    round: &mut RoundState,
    selection: &mut Selection,
    clicked: BubbleId,
    touch_tolerance: f32,
) -> Option<PopOutcome> {
    let origin = field.get(clicked)?.position;
    let color = field.get(clicked)?.color;

    let members = field.find_connected(clicked, ColorFilter::StartColor, touch_tolerance);
    round.record_chain(members.len());

    let mut removed = Vec::with_capacity(members.len());
    for id in members {
        if let Some(bubble) = field.remove(id) {
            removed.push(bubble);
        }
    }

    selection::select_nearest_to(field, selection, origin);

    Some(PopOutcome {
        removed,
        origin,
        color,
    })
}
