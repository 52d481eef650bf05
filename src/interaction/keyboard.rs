use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::field::{BubbleField, Playfield};
use crate::core::session::round::RoundState;
use crate::core::session::selection::{self, NavDirection, Selection};
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::gameplay::game_over::RestartRequested;
use crate::gameplay::pop::{PopRequested, PopResolveSet};
use crate::interaction::InputModality;

pub struct KeyboardInputPlugin;

impl Plugin for KeyboardInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<InputModality>()
            .add_systems(
                Update,
                handle_keys.in_set(PrePhysicsSet).before(PopResolveSet),
            )
            // Bulk removal can invalidate the selection any frame; re-check
            // after the field has settled.
            .add_systems(Update, validate_selection.in_set(PostPhysicsAdjustSet));
    }
}

/// Remote/keyboard controls: arrows move the selection, Enter pops it,
/// Space selects the middle bubble first and pops on the next press. Any
/// key restarts once the post-loss delay has passed.
fn handle_keys(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    field: Res<BubbleField>,
    round: Res<RoundState>,
    mut sel: ResMut<Selection>,
    mut modality: ResMut<InputModality>,
    mut pop: EventWriter<PopRequested>,
    mut restart: EventWriter<RestartRequested>,
) {
    if keys.get_just_pressed().next().is_none() {
        return;
    }
    modality.keyboard = true;

    if round.is_game_over {
        if round.accepts_restart(time.elapsed_secs_f64(), cfg.round.restart_delay as f64) {
            restart.write(RestartRequested);
        }
        return;
    }

    let direction = [
        (KeyCode::ArrowUp, NavDirection::Up),
        (KeyCode::ArrowDown, NavDirection::Down),
        (KeyCode::ArrowLeft, NavDirection::Left),
        (KeyCode::ArrowRight, NavDirection::Right),
    ]
    .into_iter()
    .find(|(key, _)| keys.just_pressed(*key));
    if let Some((_, dir)) = direction {
        selection::navigate(&field, &mut sel, &playfield, dir);
        return;
    }

    if keys.just_pressed(KeyCode::Enter) {
        if let Some(target) = sel.current {
            pop.write(PopRequested { target });
        }
    } else if keys.just_pressed(KeyCode::Space) {
        match sel.current {
            None => selection::select_middle(&field, &mut sel, &playfield),
            Some(target) => {
                pop.write(PopRequested { target });
            }
        }
    }
}

fn validate_selection(field: Res<BubbleField>, mut sel: ResMut<Selection>) {
    selection::validate(&field, &mut sel);
}
