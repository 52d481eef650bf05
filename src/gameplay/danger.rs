use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::danger::evaluate_danger;
use crate::core::session::death::begin_death_sequence;
use crate::core::session::field::{BubbleField, Playfield};
use crate::core::session::round::RoundState;
use crate::core::system::system_order::{FieldMirrorSet, PostPhysicsAdjustSet};

/// Latest danger evaluation, refreshed every simulation tick. `percentage`
/// is `None` while no grounded stack exists.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct DangerState {
    pub percentage: Option<f32>,
    pub active: bool,
}

/// Fired on the frame the round transitions into the loss state.
#[derive(Event, Debug, Clone)]
pub struct GameOverTriggered {
    pub final_chain: usize,
    pub is_new_high_score: bool,
}

pub struct DangerPlugin;

impl Plugin for DangerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BubbleField>()
            .init_resource::<RoundState>()
            .init_resource::<DangerState>()
            .add_event::<GameOverTriggered>()
            .add_systems(
                Update,
                evaluate_danger_zone
                    .in_set(PostPhysicsAdjustSet)
                    .after(FieldMirrorSet),
            );
    }
}

/// Per-frame grounding/danger evaluation over the freshly mirrored field.
/// The stack height is physics-driven, so this cannot be event-gated; it
/// runs every tick regardless of other game state.
fn evaluate_danger_zone(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    mut field: ResMut<BubbleField>,
    mut round: ResMut<RoundState>,
    mut danger: ResMut<DangerState>,
    mut game_over: EventWriter<GameOverTriggered>,
) {
    let params = cfg.danger_params();
    let percentage = evaluate_danger(&field, &playfield, &params);
    danger.percentage = percentage;

    if let Some(pct) = percentage {
        if pct < 0.0 {
            // The grounded stack connects past the top of the playfield.
            let now = time.elapsed_secs_f64();
            let timing = cfg.death_timing();
            if round.trigger_game_over(now, timing.total_duration) {
                begin_death_sequence(&mut field, &playfield, &params, &timing, now);
                info!(
                    "game over: max_chain={} high_score={} new_high_score={}",
                    round.max_chain, round.high_score, round.is_new_high_score
                );
                game_over.write(GameOverTriggered {
                    final_chain: round.max_chain,
                    is_new_high_score: round.is_new_high_score,
                });
            }
        }
    }

    danger.active = !round.is_game_over
        && percentage.map_or(false, |p| p <= cfg.danger.danger_threshold);
}
