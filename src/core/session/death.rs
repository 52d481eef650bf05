use super::connectivity::ColorFilter;
use super::danger::{grounded_anchor, DangerParams};
use super::field::{BubbleField, Playfield};

/// Timing envelope for the cascading loss animation. The spread window
/// (total minus one per-bubble fade) is what distance-normalized start
/// offsets are scaled into, so the farthest bubble still finishes its fade
/// inside the total budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathTiming {
    pub total_duration: f64,
    pub fade_to_highlight: f64,
    pub fade_from_highlight: f64,
}

impl Default for DeathTiming {
    fn default() -> Self {
        Self {
            total_duration: 2.0,
            fade_to_highlight: 0.1,
            fade_from_highlight: 0.4,
        }
    }
}

impl DeathTiming {
    #[inline]
    pub fn per_bubble(&self) -> f64 {
        self.fade_to_highlight + self.fade_from_highlight
    }

    #[inline]
    pub fn spread_window(&self) -> f64 {
        (self.total_duration - self.per_bubble()).max(0.0)
    }
}

/// Per-frame fade phase of a dying bubble, purely a function of
/// `now - death_start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathPhase {
    /// The wave has not reached this bubble yet; no visual change.
    Pending,
    /// Fading from the original color toward the highlight, progress in [0,1].
    ToHighlight(f32),
    /// Fading from the highlight back to the original color, progress in [0,1].
    FromHighlight(f32),
    Done,
}

pub fn death_phase(death_start: f64, now: f64, timing: &DeathTiming) -> DeathPhase {
    let elapsed = now - death_start;
    if elapsed < 0.0 {
        DeathPhase::Pending
    } else if elapsed <= timing.fade_to_highlight {
        DeathPhase::ToHighlight((elapsed / timing.fade_to_highlight) as f32)
    } else if elapsed <= timing.per_bubble() {
        let into = elapsed - timing.fade_to_highlight;
        DeathPhase::FromHighlight((into / timing.fade_from_highlight) as f32)
    } else {
        DeathPhase::Done
    }
}

/// Stamp death start times across the losing stack.
///
/// Recomputes the grounded anchor and its unfiltered component, takes the
/// topmost member as the ripple origin, and assigns each member a start
/// offset proportional to its Euclidean distance from that origin,
/// normalized by the farthest member. Stamps timing metadata only; bubbles
/// stay in the field until restart. Empty or ungrounded fields are a safe
/// no-op (`false`). Call-once-per-round is the round state's guard, not
/// this function's.
pub fn begin_death_sequence(
    field: &mut BubbleField,
    playfield: &Playfield,
    params: &DangerParams,
    timing: &DeathTiming,
    now: f64,
) -> bool {
    let Some(anchor) = grounded_anchor(field, playfield, params.ground_tolerance) else {
        return false;
    };
    let members = field.find_connected(anchor, ColorFilter::Any, params.touch_tolerance);

    let origin = members
        .iter()
        .filter_map(|&id| field.get(id))
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
        .map(|b| b.position);
    let Some(origin) = origin else {
        return false;
    };

    let distances: Vec<(_, f32)> = members
        .iter()
        .filter_map(|&id| field.get(id).map(|b| (id, b.position.distance(origin))))
        .collect();
    let max_distance = distances
        .iter()
        .map(|&(_, d)| d)
        .fold(0.0f32, f32::max);

    let window = timing.spread_window();
    for (id, distance) in distances {
        let normalized = if max_distance > 0.0 {
            distance / max_distance
        } else {
            0.0
        };
        if let Some(bubble) = field.get_mut(id) {
            bubble.death_start = Some(now + normalized as f64 * window);
        }
    }
    true
}

/// Flip the monotonic `death_animated` flag for every bubble whose wave has
/// arrived. Takes the timestamp explicitly; removal is never performed here.
pub fn tick_death_flags(field: &mut BubbleField, now: f64) {
    for bubble in field.iter_mut() {
        if let Some(start) = bubble.death_start {
            if now >= start {
                bubble.death_animated = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::field::BubbleId;
    use bevy::prelude::Vec2;

    const PF: Playfield = Playfield {
        width: 1000.0,
        height: 1000.0,
    };

    fn params() -> DangerParams {
        DangerParams::default()
    }

    fn spawn(field: &mut BubbleField, x: f32, y: f32) -> BubbleId {
        field.insert(Vec2::new(x, y), 50.0, 0, 0.0)
    }

    #[test]
    fn empty_or_ungrounded_field_is_a_no_op() {
        let mut field = BubbleField::default();
        assert!(!begin_death_sequence(
            &mut field,
            &PF,
            &params(),
            &DeathTiming::default(),
            0.0
        ));
        spawn(&mut field, 500.0, 300.0); // floating
        assert!(!begin_death_sequence(
            &mut field,
            &PF,
            &params(),
            &DeathTiming::default(),
            0.0
        ));
        assert!(field.iter().all(|b| b.death_start.is_none()));
    }

    #[test]
    fn only_component_members_get_stamped() {
        let mut field = BubbleField::default();
        spawn(&mut field, 500.0, 950.0);
        spawn(&mut field, 500.0, 855.0);
        let outsider = spawn(&mut field, 100.0, 100.0);
        assert!(begin_death_sequence(
            &mut field,
            &PF,
            &params(),
            &DeathTiming::default(),
            10.0
        ));
        assert!(field.get(outsider).unwrap().death_start.is_none());
        let stamped = field.iter().filter(|b| b.death_start.is_some()).count();
        assert_eq!(stamped, 2);
    }

    #[test]
    fn start_times_grow_with_distance_from_the_top() {
        let mut field = BubbleField::default();
        let bottom = spawn(&mut field, 500.0, 950.0);
        let middle = spawn(&mut field, 500.0, 855.0);
        let top = spawn(&mut field, 500.0, 760.0);
        let timing = DeathTiming::default();
        begin_death_sequence(&mut field, &PF, &params(), &timing, 100.0);

        let t = |id| field.get(id).unwrap().death_start.unwrap();
        // The topmost bubble is the origin: zero offset.
        assert_eq!(t(top), 100.0);
        assert!(t(middle) > t(top));
        assert!(t(bottom) > t(middle));
        // Farthest member lands exactly at the end of the spread window.
        assert!((t(bottom) - (100.0 + timing.spread_window())).abs() < 1e-6);
    }

    #[test]
    fn singleton_component_starts_immediately() {
        let mut field = BubbleField::default();
        let only = spawn(&mut field, 500.0, 950.0);
        begin_death_sequence(&mut field, &PF, &params(), &DeathTiming::default(), 7.0);
        assert_eq!(field.get(only).unwrap().death_start, Some(7.0));
    }

    #[test]
    fn phase_progression_matches_envelope() {
        let timing = DeathTiming::default();
        assert_eq!(death_phase(10.0, 9.5, &timing), DeathPhase::Pending);
        match death_phase(10.0, 10.05, &timing) {
            DeathPhase::ToHighlight(t) => assert!((t - 0.5).abs() < 1e-6),
            other => panic!("expected ToHighlight, got {other:?}"),
        }
        match death_phase(10.0, 10.3, &timing) {
            DeathPhase::FromHighlight(t) => assert!((t - 0.5).abs() < 1e-6),
            other => panic!("expected FromHighlight, got {other:?}"),
        }
        assert_eq!(death_phase(10.0, 11.0, &timing), DeathPhase::Done);
    }

    #[test]
    fn animated_flag_is_monotonic() {
        let mut field = BubbleField::default();
        let id = spawn(&mut field, 500.0, 950.0);
        field.get_mut(id).unwrap().death_start = Some(5.0);
        tick_death_flags(&mut field, 4.0);
        assert!(!field.get(id).unwrap().death_animated);
        tick_death_flags(&mut field, 5.0);
        assert!(field.get(id).unwrap().death_animated);
        tick_death_flags(&mut field, 4.0); // clock jitter must not un-flag
        assert!(field.get(id).unwrap().death_animated);
    }
}
