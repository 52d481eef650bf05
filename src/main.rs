use bevy::prelude::*;

use bubble_burst::{GameConfig, GamePlugin};

fn main() {
    // Load configuration (fall back to defaults if missing)
    let cfg = GameConfig::load_from_file("assets/config/game.ron").unwrap_or_else(|e| {
        eprintln!("config fallback to defaults: {e}");
        GameConfig::default()
    });

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins(GamePlugin);
    if cfg.rapier_debug {
        app.add_plugins(bevy_rapier2d::prelude::RapierDebugRenderPlugin::default());
    }
    app.run();
}
