use bevy::prelude::*;
use bubble_burst::core::components::PopParticle;
use bubble_burst::core::session::field::{BubbleField, Playfield};
use bubble_burst::core::session::round::RoundState;
use bubble_burst::core::session::selection::Selection;
use bubble_burst::gameplay::danger::DangerState;
use bubble_burst::gameplay::game_over::{GameOverPlugin, RestartRequested};
use bubble_burst::gameplay::spawn::{BubbleBodies, SpawnState};
use bubble_burst::GameConfig;

fn test_app() -> App {
    let mut app = App::new();
    let cfg = GameConfig::default();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Playfield::new(1000.0, 1000.0));
    app.init_resource::<BubbleField>();
    app.init_resource::<RoundState>();
    app.init_resource::<Selection>();
    app.init_resource::<BubbleBodies>();
    app.init_resource::<DangerState>();
    app.insert_resource(SpawnState::from_config(&cfg));
    app.insert_resource(cfg);
    app.add_plugins(GameOverPlugin);
    app
}

#[test]
fn restart_clears_round_but_keeps_high_score() {
    let mut app = test_app();

    // A lost round with some history behind it.
    let id = app
        .world_mut()
        .resource_mut::<BubbleField>()
        .insert(Vec2::new(500.0, 950.0), 50.0, 0, 0.0);
    let body = app.world_mut().spawn_empty().id();
    app.world_mut()
        .resource_mut::<BubbleBodies>()
        .0
        .insert(id, body);
    let particle = app
        .world_mut()
        .spawn(PopParticle { spawned_at: 0.0 })
        .id();
    app.world_mut()
        .resource_mut::<Selection>()
        .current = Some(id);
    {
        let mut round = app.world_mut().resource_mut::<RoundState>();
        round.record_chain(6);
        round.trigger_game_over(0.0, 2.0);
    }
    app.world_mut().resource_mut::<DangerState>().active = true;

    app.world_mut().send_event(RestartRequested);
    app.update();

    let round = app.world().resource::<RoundState>();
    assert!(!round.is_game_over);
    assert_eq!(round.max_chain, 0);
    assert_eq!(round.high_score, 6);
    assert!(!round.is_new_high_score);

    assert!(app.world().resource::<BubbleField>().is_empty());
    assert!(app.world().resource::<BubbleBodies>().0.is_empty());
    assert_eq!(app.world().resource::<Selection>().current, None);
    assert!(!app.world().resource::<DangerState>().active);
    assert!(!app.world().entities().contains(body));
    assert!(!app.world().entities().contains(particle));
}

#[test]
fn no_request_changes_nothing() {
    let mut app = test_app();
    app.world_mut()
        .resource_mut::<BubbleField>()
        .insert(Vec2::new(1.0, 2.0), 10.0, 0, 0.0);
    app.update();
    assert_eq!(app.world().resource::<BubbleField>().len(), 1);
}
