pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::config::GameConfig;
pub use crate::core::session::{
    evaluate_danger, pop_chain, touching, Bubble, BubbleField, BubbleId, ColorFilter,
    DangerParams, DeathTiming, Playfield, RoundState, Selection,
};
