use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::field::Playfield;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & arena

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .add_systems(Startup, spawn_arena)
            // Rapier spawns its context entity during startup; configure after.
            .add_systems(PostStartup, configure_rapier);
    }
}

fn configure_rapier(mut q_cfg: Query<&mut RapierConfiguration>, game_cfg: Res<GameConfig>) {
    // RapierConfiguration is queried as a component on recent bevy_rapier.
    if let Ok(mut cfg) = q_cfg.single_mut() {
        cfg.gravity = Vect::new(0.0, game_cfg.gravity.y);
    }
}

/// Static floor and side walls. No ceiling: bubbles enter from above, and
/// the loss condition is the stack growing past the top edge.
fn spawn_arena(mut commands: Commands, playfield: Res<Playfield>, cfg: Res<GameConfig>) {
    let half_w = playfield.width * 0.5;
    let half_h = playfield.height * 0.5;
    let t = cfg.arena.wall_thickness;

    // Floor spans the walls; walls extend well above the top edge so a
    // growing stack cannot spill sideways out of the playfield.
    let walls = [
        (
            Vec2::new(0.0, -half_h - t * 0.5),
            Collider::cuboid(half_w + t, t * 0.5),
        ),
        (
            Vec2::new(-half_w - t * 0.5, half_h),
            Collider::cuboid(t * 0.5, half_h * 3.0),
        ),
        (
            Vec2::new(half_w + t * 0.5, half_h),
            Collider::cuboid(t * 0.5, half_h * 3.0),
        ),
    ];
    for (pos, collider) in walls {
        commands.spawn((
            RigidBody::Fixed,
            collider,
            Transform::from_translation(pos.extend(0.0)),
            GlobalTransform::default(),
        ));
    }
}
