use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{BubbleBody, BubbleHandle, BubbleVisual};
use crate::core::config::GameConfig;
use crate::core::session::field::{BubbleField, BubbleId, Playfield};
use crate::core::session::round::RoundState;
use crate::core::system::system_order::PrePhysicsSet;
use crate::rendering::palette::{color_for_index, BUBBLE_COLORS};

/// Side table from session id to the rapier body entity. Spawn inserts,
/// chain removal and restart drain.
#[derive(Resource, Debug, Default)]
pub struct BubbleBodies(pub HashMap<BubbleId, Entity>);

/// Shared unit-circle mesh; per-bubble materials stay individual so the
/// death fade can recolor one bubble at a time.
#[derive(Resource, Debug, Default)]
pub struct BubbleAssets {
    pub circle: Handle<Mesh>,
}

#[derive(Resource, Debug)]
pub struct SpawnState {
    pub timer: Timer,
    pub interval: f32,
    pub next_color: usize,
}

impl SpawnState {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            timer: Timer::from_seconds(cfg.spawn.initial_interval, TimerMode::Once),
            interval: cfg.spawn.initial_interval,
            next_color: 0,
        }
    }
}

pub struct BubbleSpawnPlugin;

impl Plugin for BubbleSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BubbleBodies>()
            .init_resource::<BubbleAssets>()
            .add_systems(Startup, setup_spawner)
            .add_systems(Update, spawn_bubbles.in_set(PrePhysicsSet));
    }
}

fn setup_spawner(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut assets: ResMut<BubbleAssets>,
    cfg: Res<GameConfig>,
) {
    assets.circle = meshes.add(Mesh::from(Circle { radius: 0.5 }));
    commands.insert_resource(SpawnState::from_config(&cfg));
}

/// Drop a new bubble just above the top edge on an ever-shortening interval.
/// The timer keeps rescheduling through game over, but nothing spawns and
/// the cadence stops shrinking until the next round.
fn spawn_bubbles(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    playfield: Res<Playfield>,
    round: Res<RoundState>,
    mut state: ResMut<SpawnState>,
    mut field: ResMut<BubbleField>,
    mut bodies: ResMut<BubbleBodies>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    assets: Res<BubbleAssets>,
) {
    state.timer.tick(time.delta());
    if !state.timer.finished() {
        return;
    }
    if round.is_game_over {
        let interval = state.interval;
        state.timer = Timer::from_seconds(interval, TimerMode::Once);
        return;
    }
    state.interval = (state.interval - cfg.spawn.interval_decrease).max(cfg.spawn.min_interval);
    let next = state.interval;
    state.timer = Timer::from_seconds(next, TimerMode::Once);

    let mut rng = rand::thread_rng();
    let radius =
        playfield.width * rng.gen_range(cfg.spawn.min_radius_ratio..cfg.spawn.max_radius_ratio);
    let x = rng.gen_range(radius..playfield.width - radius);
    let field_pos = Vec2::new(x, -radius);

    let color = state.next_color;
    state.next_color = (state.next_color + 1) % BUBBLE_COLORS.len();

    let id = field.insert(field_pos, radius, color, time.elapsed_secs_f64());
    let material = materials.add(color_for_index(color));
    let world = playfield.to_world(field_pos);

    let entity = commands
        .spawn((
            BubbleBody,
            BubbleHandle(id),
            RigidBody::Dynamic,
            Collider::ball(radius),
            Velocity::zero(),
            Restitution::coefficient(cfg.bounce.restitution),
            Friction::coefficient(cfg.bounce.friction),
            Transform::from_translation(world.extend(0.0)),
            GlobalTransform::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                BubbleVisual,
                Mesh2d(assets.circle.clone()),
                MeshMaterial2d(material),
                Transform::from_scale(Vec3::splat(radius * 2.0)),
            ));
        })
        .id();
    bodies.0.insert(id, entity);
}
