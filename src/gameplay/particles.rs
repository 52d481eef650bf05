use bevy::prelude::*;
use bevy::sprite::MeshMaterial2d;

use crate::core::components::PopParticle;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, age_particles.in_set(PostPhysicsAdjustSet));
    }
}

type ParticleItem<'a> = (Entity, &'a PopParticle, Option<&'a Children>);

/// Fade burst particles out over their lifetime and collect the expired
/// ones; despawn happens through commands after iteration completes.
fn age_particles(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    q: Query<ParticleItem<'_>>,
    q_vis: Query<&MeshMaterial2d<ColorMaterial>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let now = time.elapsed_secs_f64();
    let lifetime = cfg.particles.lifetime as f64;
    if lifetime <= 0.0 {
        return;
    }

    let mut expired: Vec<Entity> = Vec::new();
    for (entity, particle, children) in q.iter() {
        let progress = ((now - particle.spawned_at) / lifetime) as f32;
        if progress >= 1.0 {
            expired.push(entity);
            continue;
        }
        let Some(children) = children else { continue };
        for child in children.iter() {
            if let Ok(mesh_mat) = q_vis.get(child) {
                if let Some(mat) = materials.get_mut(&mesh_mat.0) {
                    let c = mat.color.to_srgba();
                    mat.color = Color::srgba(c.red, c.green, c.blue, 1.0 - progress);
                }
            }
        }
    }
    for entity in expired {
        commands.entity(entity).despawn();
    }
}
