#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::core::session::field::BubbleField;
#[cfg(feature = "debug")]
use crate::core::session::round::RoundState;
#[cfg(feature = "debug")]
use crate::gameplay::danger::DangerState;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugLogState {
    pub time_accum: f32,
    pub log_interval: f32,
}

#[cfg(feature = "debug")]
impl Default for DebugLogState {
    fn default() -> Self {
        Self {
            time_accum: 0.0,
            log_interval: 5.0,
        }
    }
}

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugLogState>,
    field: Res<BubbleField>,
    round: Res<RoundState>,
    danger: Res<DangerState>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "SIM t={:.1}s bubbles={} danger={:?} max_chain={} game_over={}",
            time.elapsed_secs(),
            field.len(),
            danger.percentage,
            round.max_chain,
            round.is_game_over
        );
    }
}
