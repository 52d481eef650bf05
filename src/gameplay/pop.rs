use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{BubbleVisual, PopParticle};
use crate::core::config::GameConfig;
use crate::core::session::chain::pop_chain;
use crate::core::session::field::{Bubble, BubbleField, BubbleId, Playfield};
use crate::core::session::round::RoundState;
use crate::core::session::selection::Selection;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::spawn::{BubbleAssets, BubbleBodies};
use crate::rendering::palette::color_for_index;

/// Request to pop the chain containing a bubble; written by the pointer and
/// keyboard handlers, resolved once per frame after them.
#[derive(Event, Debug, Clone, Copy)]
pub struct PopRequested {
    pub target: BubbleId,
}

/// Emitted after a chain left the field, for HUD/diagnostics consumers.
#[derive(Event, Debug, Clone)]
pub struct ChainPopped {
    pub color_index: usize,
    pub chain_len: usize,
    /// Field-coordinate position of the clicked bubble.
    pub origin: Vec2,
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PopResolveSet;

pub struct ChainPopPlugin;

impl Plugin for ChainPopPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PopRequested>()
            .add_event::<ChainPopped>()
            .add_systems(
                Update,
                resolve_pop_requests
                    .in_set(PopResolveSet)
                    .in_set(PrePhysicsSet),
            );
    }
}

fn resolve_pop_requests(
    mut requests: EventReader<PopRequested>,
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    mut field: ResMut<BubbleField>,
    mut round: ResMut<RoundState>,
    mut selection: ResMut<Selection>,
    mut bodies: ResMut<BubbleBodies>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    assets: Res<BubbleAssets>,
    mut popped: EventWriter<ChainPopped>,
) {
    for request in requests.read() {
        let Some(outcome) = pop_chain(
            &mut field,
            &mut round,
            &mut selection,
            request.target,
            cfg.connectivity.touch_tolerance,
        ) else {
            continue;
        };

        for bubble in &outcome.removed {
            if let Some(entity) = bodies.0.remove(&bubble.id) {
                commands.entity(entity).despawn();
            }
            spawn_burst(
                &mut commands,
                &mut materials,
                &assets,
                &cfg,
                &playfield,
                time.elapsed_secs_f64(),
                bubble,
            );
        }

        #[cfg(feature = "debug")]
        info!(
            "ChainPopped color={} len={} max_chain={}",
            outcome.color,
            outcome.chain_len(),
            round.max_chain
        );

        popped.write(ChainPopped {
            color_index: outcome.color,
            chain_len: outcome.chain_len(),
            origin: outcome.origin,
        });
    }
}

/// Ring of small dynamic particles in the popped bubble's color, launched
/// outward from its rim.
fn spawn_burst(
    commands: &mut Commands,
    materials: &mut Assets<ColorMaterial>,
    assets: &BubbleAssets,
    cfg: &GameConfig,
    playfield: &Playfield,
    now: f64,
    bubble: &Bubble,
) {
    let pc = &cfg.particles;
    let mut rng = rand::thread_rng();
    let center = playfield.to_world(bubble.position);
    let material = materials.add(color_for_index(bubble.color));

    for i in 0..pc.per_bubble {
        let angle = std::f32::consts::TAU * i as f32 / pc.per_bubble as f32;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let speed = rng.gen_range(pc.min_speed..pc.max_speed);
        let start = center + dir * bubble.radius;

        commands
            .spawn((
                PopParticle { spawned_at: now },
                RigidBody::Dynamic,
                Collider::ball(pc.radius),
                Velocity::linear(dir * speed),
                Restitution::coefficient(pc.restitution),
                Friction::coefficient(pc.friction),
                Transform::from_translation(start.extend(1.0)),
                GlobalTransform::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    BubbleVisual,
                    Mesh2d(assets.circle.clone()),
                    MeshMaterial2d(material.clone()),
                    Transform::from_scale(Vec3::splat(pc.radius * 2.0)),
                ));
            });
    }
}
