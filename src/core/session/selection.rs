use bevy::prelude::*;

use super::field::{BubbleField, BubbleId, Playfield};

/// Current selection for non-pointer (remote/keyboard) input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    pub current: Option<BubbleId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    /// Unit vector in field coordinates (y grows downward).
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            NavDirection::Up => Vec2::new(0.0, -1.0),
            NavDirection::Down => Vec2::new(0.0, 1.0),
            NavDirection::Left => Vec2::new(-1.0, 0.0),
            NavDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Drop a selection whose bubble no longer exists (e.g. after a bulk pop).
pub fn validate(field: &BubbleField, selection: &mut Selection) {
    if let Some(id) = selection.current {
        if !field.contains(id) {
            selection.current = None;
        }
    }
}

/// O(N) scan for the bubble nearest `point`; clears on an empty field.
pub fn select_nearest_to(field: &BubbleField, selection: &mut Selection, point: Vec2) {
    let mut best: Option<(BubbleId, f32)> = None;
    for bubble in field.iter() {
        let d = bubble.position.distance(point);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((bubble.id, d));
        }
    }
    selection.current = best.map(|(id, _)| id);
}

pub fn select_middle(field: &BubbleField, selection: &mut Selection, playfield: &Playfield) {
    select_nearest_to(field, selection, playfield.center());
}

/// Move the selection to the best-scored bubble in `direction`.
///
/// Candidates must lie strictly on the requested side. The score
/// `distance * (2 - alignment)` rewards proximity and directional alignment
/// together, so a close-but-sideways bubble does not beat a slightly farther
/// one straight ahead. With no qualifying candidate the selection is
/// unchanged; with no selection at all this falls back to the middle.
pub fn navigate(
    field: &BubbleField,
    selection: &mut Selection,
    playfield: &Playfield,
    direction: NavDirection,
) {
    if field.is_empty() {
        selection.current = None;
        return;
    }
    let current = match selection.current.and_then(|id| field.get(id)) {
        Some(b) => b,
        None => {
            select_middle(field, selection, playfield);
            return;
        }
    };

    let dir = direction.unit();
    let mut best: Option<(BubbleId, f32)> = None;
    for bubble in field.iter() {
        if bubble.id == current.id {
            continue;
        }
        let delta = bubble.position - current.position;
        let on_side = match direction {
            NavDirection::Up => delta.y < 0.0,
            NavDirection::Down => delta.y > 0.0,
            NavDirection::Left => delta.x < 0.0,
            NavDirection::Right => delta.x > 0.0,
        };
        if !on_side {
            continue;
        }
        let distance = delta.length();
        let alignment = delta.dot(dir) / distance;
        let score = distance * (2.0 - alignment);
        if best.map_or(true, |(_, bs)| score < bs) {
            best = Some((bubble.id, score));
        }
    }

    if let Some((id, _)) = best {
        selection.current = Some(id);
    }
}
