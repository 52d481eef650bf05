use bevy::prelude::*;
use bevy::sprite::MeshMaterial2d;

use crate::core::components::{BubbleHandle, BubbleVisual};
use crate::core::config::GameConfig;
use crate::core::session::death::{death_phase, tick_death_flags, DeathPhase};
use crate::core::session::field::BubbleField;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::rendering::palette::{color_for_index, DEATH_HIGHLIGHT};

pub struct DeathFadePlugin;

impl Plugin for DeathFadePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_death_fades.in_set(PostPhysicsAdjustSet));
    }
}

fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let a = from.to_srgba();
    let b = to.to_srgba();
    Color::srgb(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}

/// Drive the two-phase death flash on each stamped bubble: original color to
/// the highlight, then back. Runs through game over; bubbles whose wave has
/// not arrived keep their color untouched.
fn animate_death_fades(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut field: ResMut<BubbleField>,
    q: Query<(&BubbleHandle, &Children)>,
    q_vis: Query<&MeshMaterial2d<ColorMaterial>, With<BubbleVisual>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let now = time.elapsed_secs_f64();
    let timing = cfg.death_timing();
    tick_death_flags(&mut field, now);

    for (handle, children) in q.iter() {
        let Some(bubble) = field.get(handle.0) else {
            continue;
        };
        let Some(start) = bubble.death_start else {
            continue;
        };
        let base = color_for_index(bubble.color);
        let color = match death_phase(start, now, &timing) {
            DeathPhase::Pending => continue,
            DeathPhase::ToHighlight(t) => lerp_color(base, DEATH_HIGHLIGHT, t),
            DeathPhase::FromHighlight(t) => lerp_color(DEATH_HIGHLIGHT, base, t),
            DeathPhase::Done => base,
        };
        for child in children.iter() {
            if let Ok(mesh_mat) = q_vis.get(child) {
                if let Some(mat) = materials.get_mut(&mesh_mat.0) {
                    mat.color = color;
                }
            }
        }
    }
}
