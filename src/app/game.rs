use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::session::field::Playfield;
use crate::core::session::round::RoundState;
use crate::core::session::selection::Selection;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::danger::DangerPlugin;
use crate::gameplay::game_over::GameOverPlugin;
use crate::gameplay::particles::ParticlePlugin;
use crate::gameplay::pop::ChainPopPlugin;
use crate::gameplay::spawn::BubbleSpawnPlugin;
use crate::interaction::keyboard::KeyboardInputPlugin;
use crate::interaction::pointer::PointerInputPlugin;
use crate::physics::setup::PhysicsSetupPlugin;
use crate::physics::sync::FieldSyncPlugin;
use crate::rendering::background::BackgroundPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::death_fade::DeathFadePlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::selection_ring::SelectionRingPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .init_resource::<RoundState>()
        .init_resource::<Selection>()
        .add_systems(PreStartup, init_playfield)
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            BubbleSpawnPlugin,
            FieldSyncPlugin,
            DangerPlugin,
            ChainPopPlugin,
            GameOverPlugin,
            ParticlePlugin,
            PointerInputPlugin,
            KeyboardInputPlugin,
            DeathFadePlugin,
            SelectionRingPlugin,
            BackgroundPlugin,
            HudPlugin,
            DebugPlugin,
        ));
    }
}

fn init_playfield(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(Playfield::new(cfg.window.width, cfg.window.height));
}
