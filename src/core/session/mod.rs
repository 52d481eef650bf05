//! Engine-agnostic game session: the bubble arena plus the connectivity,
//! grounding, scoring, death-sequencing, and selection logic that operates
//! on it. Bevy systems in `gameplay`/`interaction` are thin adapters over
//! these operations.

pub mod chain;
pub mod connectivity;
pub mod danger;
pub mod death;
pub mod field;
pub mod round;
pub mod selection;

pub use chain::{pop_chain, PopOutcome};
pub use connectivity::{touching, ColorFilter};
pub use danger::{evaluate_danger, grounded_anchor, DangerParams};
pub use death::{begin_death_sequence, death_phase, tick_death_flags, DeathPhase, DeathTiming};
pub use field::{Bubble, BubbleField, BubbleId, Playfield};
pub use round::RoundState;
pub use selection::{NavDirection, Selection};
