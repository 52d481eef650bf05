use bevy::prelude::*;

use crate::core::components::PopParticle;
use crate::core::config::GameConfig;
use crate::core::session::field::BubbleField;
use crate::core::session::round::RoundState;
use crate::core::session::selection::Selection;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::danger::DangerState;
use crate::gameplay::pop::PopResolveSet;
use crate::gameplay::spawn::{BubbleBodies, SpawnState};

/// Written by the input handlers once the post-loss delay has elapsed.
#[derive(Event, Debug, Clone, Copy)]
pub struct RestartRequested;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RestartRequested>().add_systems(
            Update,
            handle_restart.in_set(PrePhysicsSet).before(PopResolveSet),
        );
    }
}

/// Tear the round down: every bubble body and burst particle despawns, the
/// field and per-round counters reset, and the spawner returns to its
/// starting cadence. The high score is the one thing that survives.
fn handle_restart(
    mut requests: EventReader<RestartRequested>,
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut field: ResMut<BubbleField>,
    mut round: ResMut<RoundState>,
    mut selection: ResMut<Selection>,
    mut danger: ResMut<DangerState>,
    mut bodies: ResMut<BubbleBodies>,
    mut spawn_state: ResMut<SpawnState>,
    q_particles: Query<Entity, With<PopParticle>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    for (_, entity) in bodies.0.drain() {
        commands.entity(entity).despawn();
    }
    for entity in q_particles.iter() {
        commands.entity(entity).despawn();
    }

    field.clear();
    selection.current = None;
    *danger = DangerState::default();
    *spawn_state = SpawnState::from_config(&cfg);
    round.restart();
    info!("round restarted (high_score={})", round.high_score);
}
