//! Headless integration tests for the mode state machine, the ball
//! collections, the pocket monitor, and the collision responder.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, and no
//! physics backend — so they run fast and deterministically in CI.  Rapier
//! types appear only as plain components, and collision events are written
//! into the message queue by hand; everything observed here is the table
//! core's own logic.

use baize::ball::{Ball, BallCollections, CueBall, CueBallSlot};
use baize::constants::{
    BALL_DIAMETER, BALL_RADIUS, COLORED_STATIONS, POCKET_CENTRES, SPAWN_MAX_X, SPAWN_MAX_Y,
    SPAWN_MIN_X, SPAWN_MIN_Y, TABLE_CENTRE,
};
use baize::mode::{ModeState, TableMode};
use baize::simulation::{TablePlugin, TableStats};
use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionEvent, ExternalImpulse, RigidBody, Velocity};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app: scheduling from `MinimalPlugins`, input
/// resources that `InputPlugin` would normally provide, and the table core.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app.add_plugins(TablePlugin);
    app
}

/// Request a mode switch and run one frame so the rebuild applies.
fn switch_mode(app: &mut App, mode: TableMode) {
    app.world_mut().resource_mut::<ModeState>().request(mode);
    app.update();
}

/// Move a ball's centre onto the given pocket.
fn sink_ball(app: &mut App, entity: Entity, pocket: usize) {
    let mut transform = app.world_mut().get_mut::<Transform>(entity).unwrap();
    transform.translation = POCKET_CENTRES[pocket].extend(0.1);
}

/// Simulate a full left-click at a world point: position the synthetic
/// window's cursor, press, run a frame, then release and settle.
fn click_at(app: &mut App, world_point: Vec2) {
    {
        let mut q = app.world_mut().query::<&mut Window>();
        let mut window = q.single_mut(app.world_mut()).unwrap();
        let size = Vec2::new(window.width(), window.height());
        // Inverse of the controller's cursor→world mapping.
        let cursor = world_point - TABLE_CENTRE + size / 2.0;
        window.set_physical_cursor_position(Some(cursor.as_dvec2()));
    }
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    buttons.release(MouseButton::Left);
    buttons.clear();
    app.update();
}

// ── Mode machine ──────────────────────────────────────────────────────────────

/// The first frame builds Starting-Positions: 15 racked reds, 6 colored,
/// and a pre-placed cue ball.
#[test]
fn initial_build_is_starting_positions() {
    let mut app = headless_app();
    app.update();

    let collections = app.world().resource::<BallCollections>();
    assert_eq!(collections.rack_reds.len(), 15);
    assert!(collections.random_reds.is_empty());
    assert_eq!(collections.colored.len(), 6);
    assert!(collections.reds_consistent());

    let slot = app.world().resource::<CueBallSlot>();
    assert!(slot.entity().is_some(), "mode 1 must pre-place the cue ball");

    let mut q = app.world_mut().query_filtered::<Entity, With<Ball>>();
    assert_eq!(q.iter(app.world()).count(), 22);
}

/// Random-All scatters 15 reds + 6 colored inside the inset rectangle and
/// leaves cue-ball placement to the user.
#[test]
fn random_all_scatters_and_defers_the_cue_ball() {
    let mut app = headless_app();
    app.update();
    switch_mode(&mut app, TableMode::RandomAll);

    let collections = app.world().resource::<BallCollections>();
    assert!(collections.rack_reds.is_empty());
    assert_eq!(collections.random_reds.len(), 15);
    assert_eq!(collections.colored.len(), 6);
    assert!(collections.reds_consistent());
    assert!(app.world().resource::<CueBallSlot>().is_vacant());

    // No ball centre may sit within one radius of a cushion face.
    let mut q = app.world_mut().query_filtered::<&Transform, With<Ball>>();
    for transform in q.iter(app.world()) {
        let p = transform.translation.truncate();
        assert!(p.x >= SPAWN_MIN_X + BALL_RADIUS && p.x <= SPAWN_MAX_X - BALL_RADIUS);
        assert!(p.y >= SPAWN_MIN_Y + BALL_RADIUS && p.y <= SPAWN_MAX_Y - BALL_RADIUS);
    }
}

/// Random-Red keeps the colored balls on their canonical stations.
#[test]
fn random_red_keeps_colored_on_stations() {
    let mut app = headless_app();
    app.update();
    switch_mode(&mut app, TableMode::RandomRed);

    let colored = app.world().resource::<BallCollections>().colored.clone();
    assert_eq!(colored.len(), 6);
    for (entity, station) in colored.into_iter().zip(COLORED_STATIONS) {
        let position = app
            .world()
            .get::<Transform>(entity)
            .unwrap()
            .translation
            .truncate();
        assert_eq!(position, station);
    }
    assert!(app.world().resource::<CueBallSlot>().is_vacant());
}

/// Re-selecting the active mode must not rebuild: every entity survives.
#[test]
fn reselecting_the_current_mode_preserves_entities() {
    let mut app = headless_app();
    app.update();

    let before = app.world().resource::<BallCollections>().rack_reds.clone();
    let cue_before = app.world().resource::<CueBallSlot>().entity();

    switch_mode(&mut app, TableMode::StartingPositions);

    let after = app.world().resource::<BallCollections>().rack_reds.clone();
    assert_eq!(before, after, "idempotent re-selection must not respawn");
    assert_eq!(app.world().resource::<CueBallSlot>().entity(), cue_before);
}

/// A genuine mode switch despawns the entire previous population.
#[test]
fn switching_modes_despawns_the_previous_population() {
    let mut app = headless_app();
    app.update();

    let old_balls: Vec<Entity> = {
        let collections = app.world().resource::<BallCollections>();
        let cue = app.world().resource::<CueBallSlot>().entity().unwrap();
        collections.iter_all().chain(std::iter::once(cue)).collect()
    };

    switch_mode(&mut app, TableMode::RandomRed);

    for entity in old_balls {
        assert!(
            app.world().get::<Ball>(entity).is_none(),
            "stale ball survived the mode switch"
        );
    }
    let mut q = app.world_mut().query_filtered::<Entity, With<Ball>>();
    assert_eq!(q.iter(app.world()).count(), 21, "15 reds + 6 colored, no cue");
}

// ── Pocket monitor ────────────────────────────────────────────────────────────

/// A red whose centre crosses into a pocket disappears the same tick.
#[test]
fn pocketed_red_is_removed_within_the_tick() {
    let mut app = headless_app();
    app.update();

    let red = app.world().resource::<BallCollections>().rack_reds[0];
    sink_ball(&mut app, red, 0);
    app.update();

    let collections = app.world().resource::<BallCollections>();
    assert_eq!(collections.rack_reds.len(), 14);
    assert!(!collections.rack_reds.contains(&red));
    assert!(app.world().get::<Ball>(red).is_none());
    assert_eq!(app.world().resource::<TableStats>().reds_potted, 1);
}

/// Capturing one colored ball respots the whole set at the canonical
/// stations, in canonical color order.
#[test]
fn pocketed_colored_ball_respots_the_full_set() {
    let mut app = headless_app();
    app.update();

    let old_colored = app.world().resource::<BallCollections>().colored.clone();
    sink_ball(&mut app, old_colored[2], 4);
    app.update();

    for entity in &old_colored {
        assert!(
            app.world().get::<Ball>(*entity).is_none(),
            "respot must tear down the previous colored set"
        );
    }

    let colored = app.world().resource::<BallCollections>().colored.clone();
    assert_eq!(colored.len(), 6);
    for (entity, station) in colored.into_iter().zip(COLORED_STATIONS) {
        let position = app
            .world()
            .get::<Transform>(entity)
            .unwrap()
            .translation
            .truncate();
        assert_eq!(position, station);
    }
    assert_eq!(app.world().resource::<TableStats>().colours_respotted, 1);
}

/// Pocketing the cue ball clears the slot so one new placement is legal.
#[test]
fn pocketed_cue_ball_vacates_the_slot() {
    let mut app = headless_app();
    app.update();

    let cue = app.world().resource::<CueBallSlot>().entity().unwrap();
    sink_ball(&mut app, cue, 5);
    app.update();

    assert!(app.world().resource::<CueBallSlot>().is_vacant());
    assert!(app.world().get::<Ball>(cue).is_none());
    assert_eq!(app.world().resource::<TableStats>().cue_balls_lost, 1);
}

/// A ball resting exactly at the capture threshold stays in play.
#[test]
fn ball_at_capture_threshold_stays_live() {
    let mut app = headless_app();
    app.update();

    let red = app.world().resource::<BallCollections>().rack_reds[0];
    let threshold = baize::constants::POCKET_RADIUS + BALL_RADIUS;
    {
        let mut transform = app.world_mut().get_mut::<Transform>(red).unwrap();
        transform.translation = (POCKET_CENTRES[0] + Vec2::new(threshold, 0.0)).extend(0.1);
    }
    app.update();

    let collections = app.world().resource::<BallCollections>();
    assert!(collections.rack_reds.contains(&red));
    assert_eq!(app.world().resource::<TableStats>().reds_potted, 0);
}

// ── Cue placement ─────────────────────────────────────────────────────────────

/// In the user-placed modes a vacant slot accepts exactly one cue ball;
/// further clicks are rejected until the slot is vacated again.
#[test]
fn cue_placement_is_gated_to_one_ball() {
    let mut app = headless_app();
    // A window entity so the cue controller can resolve cursor clicks.
    app.world_mut().spawn(Window::default());
    app.update();
    switch_mode(&mut app, TableMode::RandomAll);
    assert!(app.world().resource::<CueBallSlot>().is_vacant());

    click_at(&mut app, Vec2::new(330.0, 400.0));
    let placed = app.world().resource::<CueBallSlot>().entity();
    assert!(placed.is_some(), "vacant slot must accept one placement");

    click_at(&mut app, Vec2::new(500.0, 300.0));
    assert_eq!(
        app.world().resource::<CueBallSlot>().entity(),
        placed,
        "second placement must be rejected while a cue ball is live"
    );

    let mut q = app.world_mut().query_filtered::<Entity, With<CueBall>>();
    assert_eq!(q.iter(app.world()).count(), 1, "at most one cue ball may exist");

    // Pocketing the cue ball re-arms placement.
    sink_ball(&mut app, placed.unwrap(), 0);
    app.update();
    assert!(app.world().resource::<CueBallSlot>().is_vacant());

    click_at(&mut app, Vec2::new(400.0, 450.0));
    let replaced = app.world().resource::<CueBallSlot>().entity();
    assert!(replaced.is_some());
    assert_ne!(replaced, placed);
}

// ── Collision responder ───────────────────────────────────────────────────────

/// A synthetic cue-vs-rack-ball collision event promotes the static target
/// to dynamic exactly once and pushes it along the cue→target centre line.
#[test]
fn cue_contact_promotes_a_static_rack_ball() {
    let mut app = headless_app();
    app.update();

    let cue = app.world().resource::<CueBallSlot>().entity().unwrap();
    let front = app.world().resource::<BallCollections>().rack_reds[0];
    assert!(matches!(
        app.world().get::<RigidBody>(front),
        Some(RigidBody::Fixed)
    ));

    // Park the cue ball just left of the front rack ball, moving rightward,
    // and report the contact the way the engine's broad phase would.
    let front_pos = app
        .world()
        .get::<Transform>(front)
        .unwrap()
        .translation
        .truncate();
    {
        let mut transform = app.world_mut().get_mut::<Transform>(cue).unwrap();
        transform.translation = (front_pos - Vec2::new(BALL_DIAMETER - 1.0, 0.0)).extend(0.1);
    }
    app.world_mut().get_mut::<Velocity>(cue).unwrap().linvel = Vec2::new(100.0, 0.0);
    app.world_mut().write_message(CollisionEvent::Started(
        cue,
        front,
        bevy_rapier2d::rapier::geometry::CollisionEventFlags::empty(),
    ));
    app.update();

    assert!(
        matches!(app.world().get::<RigidBody>(front), Some(RigidBody::Dynamic)),
        "static rack ball must be promoted on cue contact"
    );
    let impulse = app.world().get::<ExternalImpulse>(front).unwrap().impulse;
    assert!(impulse.length() > 0.0, "promoted ball must receive an impulse");
    assert!(impulse.x > 0.0, "impulse must point from cue toward target");

    // No further events: the promotion must not re-fire.
    let after_first = impulse;
    app.update();
    let impulse = app.world().get::<ExternalImpulse>(front).unwrap().impulse;
    assert_eq!(impulse, after_first);
}

/// A reported pair whose centres are farther apart than one diameter fails
/// the narrow confirmation and produces no response.
#[test]
fn distant_pair_fails_narrow_confirmation() {
    let mut app = headless_app();
    app.update();

    let cue = app.world().resource::<CueBallSlot>().entity().unwrap();
    let front = app.world().resource::<BallCollections>().rack_reds[0];

    // Cue stays at its starting spot, hundreds of units from the rack.
    app.world_mut().write_message(CollisionEvent::Started(
        cue,
        front,
        bevy_rapier2d::rapier::geometry::CollisionEventFlags::empty(),
    ));
    app.update();

    assert!(matches!(
        app.world().get::<RigidBody>(front),
        Some(RigidBody::Fixed)
    ));
    assert_eq!(
        app.world().get::<ExternalImpulse>(front).unwrap().impulse,
        Vec2::ZERO
    );
}
