use bevy::prelude::*;

/// Generational handle into the [`BubbleField`] arena.
///
/// Identity is owned by the session, not by the physics engine; the mapping
/// from a `BubbleId` to its rapier body lives in a side table maintained by
/// the spawn/pop systems. Slot reuse bumps the generation, so a handle kept
/// across a removal never resolves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BubbleId {
    index: u32,
    generation: u32,
}

impl BubbleId {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// A live playable bubble.
///
/// `position` is mirrored from the physics body once per frame (field
/// coordinates, y grows downward, origin at the top-left of the playfield).
/// `radius` and `color` are fixed at spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub id: BubbleId,
    pub position: Vec2,
    pub radius: f32,
    pub color: usize,
    pub created_at: f64,
    /// Set once per round when the cascading loss sequence starts.
    pub death_start: Option<f64>,
    /// Monotonic false -> true once the per-bubble death phase has begun.
    pub death_animated: bool,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    bubble: Option<Bubble>,
}

/// Arena of live bubbles. The sole owner of bubble identity; spawn appends,
/// chain removal bulk-removes, restart clears.
#[derive(Resource, Debug, Clone, Default)]
pub struct BubbleField {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BubbleField {
    pub fn insert(&mut self, position: Vec2, radius: f32, color: usize, created_at: f64) -> BubbleId {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = BubbleId {
            index,
            generation: slot.generation,
        };
        slot.bubble = Some(Bubble {
            id,
            position,
            radius,
            color,
            created_at,
            death_start: None,
            death_animated: false,
        });
        self.len += 1;
        id
    }

    pub fn remove(&mut self, id: BubbleId) -> Option<Bubble> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.bubble.is_none() {
            return None;
        }
        let bubble = slot.bubble.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        bubble
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.bubble.as_ref()
    }

    pub fn get_mut(&mut self, id: BubbleId) -> Option<&mut Bubble> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.bubble.as_mut()
    }

    pub fn contains(&self, id: BubbleId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.slots.iter().filter_map(|s| s.bubble.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bubble> {
        self.slots.iter_mut().filter_map(|s| s.bubble.as_mut())
    }

    pub fn ids(&self) -> impl Iterator<Item = BubbleId> + '_ {
        self.iter().map(|b| b.id)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Full teardown on restart. Live generations are bumped so handles held
    /// across the restart go stale instead of resolving to new bubbles.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.bubble.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.len = 0;
    }
}

/// Playfield extent in field units. Field coordinates put the origin at the
/// top-left with y growing downward (matching the danger/grounding math);
/// Bevy world space is centered with y up, hence the two conversions.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn to_field(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }

    #[inline]
    pub fn to_world(&self, field: Vec2) -> Vec2 {
        Vec2::new(field.x - self.width * 0.5, self.height * 0.5 - field.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_at(field: &mut BubbleField, x: f32, y: f32) -> BubbleId {
        field.insert(Vec2::new(x, y), 10.0, 0, 0.0)
    }

    #[test]
    fn insert_then_get() {
        let mut field = BubbleField::default();
        let id = bubble_at(&mut field, 1.0, 2.0);
        assert_eq!(field.len(), 1);
        let b = field.get(id).unwrap();
        assert_eq!(b.position, Vec2::new(1.0, 2.0));
        assert!(b.death_start.is_none());
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut field = BubbleField::default();
        let id = bubble_at(&mut field, 0.0, 0.0);
        assert!(field.remove(id).is_some());
        assert!(field.get(id).is_none());
        assert!(field.remove(id).is_none());

        // Slot reuse must not resurrect the old handle.
        let id2 = bubble_at(&mut field, 5.0, 5.0);
        assert_eq!(id2.index(), id.index());
        assert!(field.get(id).is_none());
        assert!(field.get(id2).is_some());
    }

    #[test]
    fn clear_invalidates_all_handles() {
        let mut field = BubbleField::default();
        let a = bubble_at(&mut field, 0.0, 0.0);
        let b = bubble_at(&mut field, 1.0, 1.0);
        field.clear();
        assert!(field.is_empty());
        assert!(field.get(a).is_none());
        assert!(field.get(b).is_none());
        let c = bubble_at(&mut field, 2.0, 2.0);
        assert!(field.get(c).is_some());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn field_world_round_trip() {
        let pf = Playfield::new(1280.0, 720.0);
        let field_pos = Vec2::new(100.0, 50.0);
        let world = pf.to_world(field_pos);
        assert_eq!(world, Vec2::new(-540.0, 310.0));
        assert_eq!(pf.to_field(world), field_pos);
        assert_eq!(pf.center(), Vec2::new(640.0, 360.0));
    }
}
