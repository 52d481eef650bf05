use super::connectivity::ColorFilter;
use super::field::{BubbleField, BubbleId, Playfield};

/// Tolerances feeding grounding and loss detection. `top_slack` shifts the
/// reported percentage so a stack top within that many units above the
/// playfield ceiling does not instantly end the round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerParams {
    pub touch_tolerance: f32,
    pub ground_tolerance: f32,
    pub top_slack: f32,
}

impl Default for DangerParams {
    fn default() -> Self {
        Self {
            touch_tolerance: 5.0,
            ground_tolerance: 10.0,
            top_slack: 0.0,
        }
    }
}

/// The lowest bubble (max y), provided its lower edge rests within
/// `ground_tolerance` of the floor. Floating or still-falling stacks return
/// `None`. Ties on the maximum y resolve to the first strict maximum found.
pub fn grounded_anchor(
    field: &BubbleField,
    playfield: &Playfield,
    ground_tolerance: f32,
) -> Option<BubbleId> {
    let mut lowest = None;
    for bubble in field.iter() {
        let replace = match lowest {
            None => true,
            Some((_, max_y)) => bubble.position.y > max_y,
        };
        if replace {
            lowest = Some((bubble, bubble.position.y));
        }
    }
    let (anchor, _) = lowest?;
    let bottom_edge = anchor.position.y + anchor.radius;
    (bottom_edge >= playfield.height - ground_tolerance).then_some(anchor.id)
}

/// Topmost extent of the grounded stack as a percentage of playfield height.
///
/// 0 = top threshold, 100 = floor, negative = past the top (loss condition).
/// `None` when the field is empty or the lowest bubble is not grounded; the
/// stack is physics-driven, so this runs every simulation tick.
pub fn evaluate_danger(
    field: &BubbleField,
    playfield: &Playfield,
    params: &DangerParams,
) -> Option<f32> {
    let anchor = grounded_anchor(field, playfield, params.ground_tolerance)?;
    let component = field.find_connected(anchor, ColorFilter::Any, params.touch_tolerance);

    let mut min_y = f32::INFINITY;
    for id in component {
        if let Some(b) = field.get(id) {
            if b.position.y < min_y {
                min_y = b.position.y;
            }
        }
    }
    if !min_y.is_finite() {
        return None;
    }
    Some((min_y + params.top_slack) / playfield.height * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec2;

    const PF: Playfield = Playfield {
        width: 1000.0,
        height: 1000.0,
    };

    fn params() -> DangerParams {
        DangerParams::default()
    }

    fn spawn(field: &mut BubbleField, x: f32, y: f32, radius: f32) -> BubbleId {
        field.insert(Vec2::new(x, y), radius, 0, 0.0)
    }

    #[test]
    fn empty_field_is_no_signal() {
        let field = BubbleField::default();
        assert_eq!(evaluate_danger(&field, &PF, &params()), None);
    }

    #[test]
    fn floating_stack_is_no_signal() {
        let mut field = BubbleField::default();
        // Lowest bubble bottoms out at 550, far from the floor at 1000.
        spawn(&mut field, 500.0, 500.0, 50.0);
        spawn(&mut field, 500.0, 405.0, 50.0);
        assert_eq!(grounded_anchor(&field, &PF, 10.0), None);
        assert_eq!(evaluate_danger(&field, &PF, &params()), None);
    }

    #[test]
    fn grounded_single_bubble_percentage() {
        let mut field = BubbleField::default();
        // Bottom edge 1000 = floor; top of the component at y = 950.
        spawn(&mut field, 500.0, 950.0, 50.0);
        let pct = evaluate_danger(&field, &PF, &params()).unwrap();
        assert!((pct - 95.0).abs() < 1e-3);
    }

    #[test]
    fn anchor_must_be_grounded_not_just_lowest() {
        let mut field = BubbleField::default();
        spawn(&mut field, 500.0, 700.0, 50.0); // lowest, but bottom edge 750
        spawn(&mut field, 100.0, 100.0, 50.0);
        assert_eq!(evaluate_danger(&field, &PF, &params()), None);
    }

    #[test]
    fn percentage_tracks_component_top_only() {
        let mut field = BubbleField::default();
        // Grounded column: 950 (anchor), 855, 760.
        let anchor = spawn(&mut field, 500.0, 950.0, 50.0);
        spawn(&mut field, 500.0, 855.0, 50.0);
        spawn(&mut field, 500.0, 760.0, 50.0);
        // Distant floating bubble higher up must not count.
        spawn(&mut field, 100.0, 100.0, 50.0);
        assert_eq!(grounded_anchor(&field, &PF, 10.0), Some(anchor));
        let pct = evaluate_danger(&field, &PF, &params()).unwrap();
        assert!((pct - 76.0).abs() < 1e-3);
    }

    #[test]
    fn stack_past_the_top_goes_negative() {
        let mut field = BubbleField::default();
        let mut y = 950.0;
        let mut prev = spawn(&mut field, 500.0, y, 50.0);
        while y > -120.0 {
            y -= 95.0;
            prev = spawn(&mut field, 500.0, y, 50.0);
        }
        let _ = prev;
        let pct = evaluate_danger(&field, &PF, &params()).unwrap();
        assert!(pct < 0.0, "expected loss percentage, got {pct}");
    }

    #[test]
    fn top_slack_defers_the_negative_signal() {
        let mut field = BubbleField::default();
        spawn(&mut field, 500.0, 950.0, 50.0);
        spawn(&mut field, 500.0, -30.0, 50.0);
        // Force contact irrelevant: use a generous tolerance so the pair links.
        let p = DangerParams {
            touch_tolerance: 1000.0,
            ground_tolerance: 10.0,
            top_slack: 0.0,
        };
        assert!(evaluate_danger(&field, &PF, &p).unwrap() < 0.0);
        let slacked = DangerParams { top_slack: 50.0, ..p };
        assert!(evaluate_danger(&field, &PF, &slacked).unwrap() >= 0.0);
    }
}
