use bevy::prelude::*;
use bubble_burst::core::components::PopParticle;
use bubble_burst::core::session::field::{BubbleField, BubbleId, Playfield};
use bubble_burst::core::session::round::RoundState;
use bubble_burst::core::session::selection::Selection;
use bubble_burst::gameplay::pop::{ChainPopPlugin, ChainPopped, PopRequested};
use bubble_burst::gameplay::spawn::{BubbleAssets, BubbleBodies};
use bubble_burst::GameConfig;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig::default());
    app.insert_resource(Playfield::new(1000.0, 1000.0));
    app.init_resource::<BubbleField>();
    app.init_resource::<RoundState>();
    app.init_resource::<Selection>();
    app.init_resource::<BubbleBodies>();
    app.init_resource::<BubbleAssets>();
    app.init_resource::<Assets<ColorMaterial>>();
    app.add_plugins(ChainPopPlugin);
    app
}

fn spawn_bubble(app: &mut App, x: f32, y: f32, color: usize) -> BubbleId {
    let id = app
        .world_mut()
        .resource_mut::<BubbleField>()
        .insert(Vec2::new(x, y), 50.0, color, 0.0);
    let entity = app.world_mut().spawn_empty().id();
    app.world_mut()
        .resource_mut::<BubbleBodies>()
        .0
        .insert(id, entity);
    id
}

#[test]
fn pop_request_removes_chain_and_bodies() {
    let mut app = test_app();
    let a = spawn_bubble(&mut app, 0.0, 0.0, 0);
    let b = spawn_bubble(&mut app, 95.0, 0.0, 0);
    let other = spawn_bubble(&mut app, 95.0, 200.0, 1);

    app.world_mut().send_event(PopRequested { target: a });
    app.update();

    let field = app.world().resource::<BubbleField>();
    assert!(!field.contains(a) && !field.contains(b));
    assert!(field.contains(other));
    assert_eq!(app.world().resource::<RoundState>().max_chain, 2);

    let bodies = app.world().resource::<BubbleBodies>();
    assert!(!bodies.0.contains_key(&a));
    assert!(bodies.0.contains_key(&other));

    // Burst particles were spawned for both removed bubbles.
    let cfg = app.world().resource::<GameConfig>().clone();
    let mut q = app.world_mut().query::<&PopParticle>();
    assert_eq!(q.iter(app.world()).count(), cfg.particles.per_bubble * 2);

    let popped: Vec<ChainPopped> = app
        .world_mut()
        .resource_mut::<Events<ChainPopped>>()
        .drain()
        .collect();
    assert_eq!(popped.len(), 1);
    assert_eq!(popped[0].chain_len, 2);
    assert_eq!(popped[0].color_index, 0);
}

#[test]
fn selection_follows_the_popped_position() {
    let mut app = test_app();
    let clicked = spawn_bubble(&mut app, 100.0, 100.0, 0);
    let near = spawn_bubble(&mut app, 160.0, 100.0, 1);
    let _far = spawn_bubble(&mut app, 900.0, 900.0, 1);

    app.world_mut().send_event(PopRequested { target: clicked });
    app.update();

    assert_eq!(app.world().resource::<Selection>().current, Some(near));
}

#[test]
fn stale_request_is_ignored() {
    let mut app = test_app();
    let a = spawn_bubble(&mut app, 0.0, 0.0, 0);
    app.world_mut()
        .resource_mut::<BubbleField>()
        .remove(a)
        .unwrap();

    app.world_mut().send_event(PopRequested { target: a });
    app.update();

    assert_eq!(app.world().resource::<RoundState>().max_chain, 0);
    let drained = app
        .world_mut()
        .resource_mut::<Events<ChainPopped>>()
        .drain()
        .count();
    assert_eq!(drained, 0);
}
