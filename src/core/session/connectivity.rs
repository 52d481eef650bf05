use std::collections::HashSet;

use smallvec::SmallVec;

use super::field::{Bubble, BubbleField, BubbleId};

/// Color restriction applied to a flood fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFilter {
    /// Restrict to the start bubble's color (chain popping).
    StartColor,
    /// Restrict to an explicit palette index.
    Match(usize),
    /// No restriction; physical contact chains stacks of any color
    /// (grounding / loss detection).
    Any,
}

/// Two bubbles touch when their center distance is within the sum of their
/// nominal radii plus `tolerance`. Nominal radius, not any border-inflated
/// physics radius, so visual touching matches engine overlap.
#[inline]
pub fn touching(a: &Bubble, b: &Bubble, tolerance: f32) -> bool {
    a.position.distance(b.position) <= a.radius + b.radius + tolerance
}

impl BubbleField {
    /// Connected component containing `start` under the touching relation,
    /// optionally restricted by color.
    ///
    /// Iterative explicit-stack flood fill; the candidate pool is narrowed to
    /// the color domain before the loop so per-step work is bounded by the
    /// matching bubbles, not the whole field. The returned membership is
    /// deterministic for fixed positions; enumeration order is not.
    pub fn find_connected(
        &self,
        start: BubbleId,
        filter: ColorFilter,
        tolerance: f32,
    ) -> Vec<BubbleId> {
        let Some(origin) = self.get(start) else {
            return Vec::new();
        };
        let target = match filter {
            ColorFilter::StartColor => Some(origin.color),
            ColorFilter::Match(color) => Some(color),
            ColorFilter::Any => None,
        };
        let pool: Vec<&Bubble> = self
            .iter()
            .filter(|b| target.map_or(true, |c| b.color == c))
            .collect();

        let mut connected: HashSet<BubbleId> = HashSet::with_capacity(pool.len().min(16));
        connected.insert(start);
        let mut frontier: SmallVec<[BubbleId; 16]> = SmallVec::new();
        frontier.push(start);

        while let Some(current) = frontier.pop() {
            let Some(current) = self.get(current) else {
                continue;
            };
            for &other in pool.iter() {
                if !connected.contains(&other.id) && touching(current, other, tolerance) {
                    connected.insert(other.id);
                    frontier.push(other.id);
                }
            }
        }

        connected.into_iter().collect()
    }
}
