use bevy::prelude::*;

use crate::core::session::round::RoundState;

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct GameOverText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_score_text, update_game_over_text));
    }
}

fn spawn_hud(mut commands: Commands) {
    // Top-right score readout.
    commands.spawn((
        Text::new("MAX CHAIN: 0"),
        TextFont {
            font_size: 22.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Px(8.0),
            right: Val::Px(12.0),
            ..Default::default()
        },
        ScoreText,
    ));

    // Centered loss banner, hidden until the cascade finishes.
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 42.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Percent(35.0),
            left: Val::Percent(0.0),
            right: Val::Percent(0.0),
            ..Default::default()
        },
        Visibility::Hidden,
        GameOverText,
    ));
}

fn update_score_text(round: Res<RoundState>, mut q: Query<&mut Text, With<ScoreText>>) {
    if !round.is_changed() {
        return;
    }
    for mut text in q.iter_mut() {
        text.0 = format!(
            "MAX CHAIN: {}\nHIGH SCORE: {}",
            round.max_chain, round.high_score
        );
    }
}

/// The banner waits out the death cascade: `game_over_start` is already
/// offset past the trigger by the animation duration.
fn update_game_over_text(
    time: Res<Time>,
    round: Res<RoundState>,
    mut q: Query<(&mut Text, &mut Visibility), With<GameOverText>>,
) {
    let now = time.elapsed_secs_f64();
    for (mut text, mut visibility) in q.iter_mut() {
        if round.is_game_over && now >= round.game_over_start {
            if *visibility != Visibility::Visible {
                let record = if round.is_new_high_score {
                    "\nNEW HIGH SCORE!"
                } else {
                    ""
                };
                text.0 = format!(
                    "GAME OVER\nMAX CHAIN: {}{record}\n\nclick or press any key to restart",
                    round.max_chain
                );
                *visibility = Visibility::Visible;
            }
        } else if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
    }
}
