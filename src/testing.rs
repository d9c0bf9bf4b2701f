//! Scripted scenario harness, driven by the `BAIZE_TEST` environment
//! variable (see `main.rs`).
//!
//! Each scenario arms itself once the initial table build exists, perturbs
//! the world, and a shared verification system watches for the expected
//! observation until the frame limit:
//!
//! | Scenario | Perturbation | Pass condition |
//! |---|---|---|
//! | `strike_rack` | cue ball launched at the rack apex | a rack red turns dynamic and moves |
//! | `pocket_capture` | red rolled into a corner pocket | `TableStats::reds_potted` > 0 |

use crate::ball::{spawn_ball, Ball, BallCollections, BallKind, CueBall, CueBallSlot};
use crate::config::TableConfig;
use crate::constants::{BALL_RADIUS, RACK_ANCHOR};
use crate::simulation::TableStats;
use crate::table::pockets;
use bevy::prelude::*;
use bevy_rapier2d::prelude::{RigidBody, Velocity};

/// Test configuration and per-run progress.
#[derive(Resource)]
pub struct TestConfig {
    pub enabled: bool,
    pub test_name: String,
    pub frame_limit: u32,
    pub frame_count: u32,
    /// Set once the scenario has perturbed the world.
    pub scenario_started: bool,
    /// Set the first frame the pass condition is observed.
    pub passed: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            test_name: String::new(),
            frame_limit: 300,
            frame_count: 0,
            scenario_started: false,
            passed: false,
        }
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

/// `strike_rack`: once the Starting-Positions build has pre-placed the cue
/// ball, give it a short straight run-up at the rack apex.  Exercises the
/// full promotion path: engine contact → classifier → static-to-dynamic
/// switch.
///
/// The run-up starts 30 units short of the apex rather than at the baulk
/// spot: the direct baulk-to-rack lane crosses the brown and blue stations,
/// and this scenario is about the rack, not the spotted balls.
pub fn strike_rack_scenario_system(
    mut test: ResMut<TestConfig>,
    slot: Res<CueBallSlot>,
    config: Res<TableConfig>,
    mut q_cue: Query<(&mut Transform, &mut RigidBody, &mut Velocity), With<CueBall>>,
) {
    if !test.enabled || test.test_name != "strike_rack" || test.scenario_started {
        return;
    }
    let Some(entity) = slot.entity() else {
        return;
    };
    let Ok((mut transform, mut body, mut velocity)) = q_cue.get_mut(entity) else {
        return;
    };

    // Centre of the rack's apex ball (see layout::rack_positions).
    let apex = RACK_ANCHOR + Vec2::new(0.0, BALL_RADIUS);
    transform.translation = (apex - Vec2::new(30.0, 0.0)).extend(0.1);
    *body = RigidBody::Dynamic;
    velocity.linvel = Vec2::new(config.cue_power * 50.0, 0.0);
    test.scenario_started = true;
    println!("[strike_rack] cue ball launched at the rack apex");
}

/// `pocket_capture`: roll an extra tracked red into the top-left corner
/// pocket and wait for the monitor to capture it.
pub fn pocket_capture_scenario_system(
    mut test: ResMut<TestConfig>,
    mut commands: Commands,
    mut collections: ResMut<BallCollections>,
    config: Res<TableConfig>,
) {
    if !test.enabled || test.test_name != "pocket_capture" || test.scenario_started {
        return;
    }
    // Wait for the initial build so the red joins the active collection.
    if collections.rack_reds.is_empty() {
        return;
    }

    let pocket = pockets()[0];
    let start = pocket.centre + Vec2::new(60.0, 0.0);
    let entity = spawn_ball(&mut commands, &config, start, BallKind::Red, false);
    commands.entity(entity).insert(Velocity {
        linvel: Vec2::new(-150.0, 0.0),
        angvel: 0.0,
    });
    collections.rack_reds.push(entity);
    test.scenario_started = true;
    println!("[pocket_capture] red rolling toward pocket at {:?}", pocket.centre);
}

// ── Verification & logging ────────────────────────────────────────────────────

/// Watch for the active scenario's pass condition; report and exit at the
/// frame limit.
pub fn test_verification_system(
    mut test: ResMut<TestConfig>,
    collections: Res<BallCollections>,
    stats: Res<TableStats>,
    q_balls: Query<(&RigidBody, &Velocity), With<Ball>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if !test.enabled {
        return;
    }
    test.frame_count += 1;

    let condition_met = match test.test_name.as_str() {
        "strike_rack" => collections.rack_reds.iter().any(|&entity| {
            matches!(
                q_balls.get(entity),
                Ok((RigidBody::Dynamic, velocity)) if velocity.linvel.length() > 0.0
            )
        }),
        "pocket_capture" => stats.reds_potted > 0,
        _ => false,
    };

    if condition_met && !test.passed {
        test.passed = true;
        println!(
            "[{}] pass condition observed at frame {}",
            test.test_name, test.frame_count
        );
    }

    if test.frame_count >= test.frame_limit {
        println!(
            "TEST {}: {}",
            test.test_name,
            if test.passed { "PASSED" } else { "FAILED" }
        );
        exit.write(bevy::app::AppExit::Success);
    }
}

/// Periodic progress line while a scenario runs.
pub fn test_logging_system(
    test: Res<TestConfig>,
    collections: Res<BallCollections>,
    slot: Res<CueBallSlot>,
) {
    if !test.enabled || test.frame_count == 0 || !test.frame_count.is_multiple_of(50) {
        return;
    }
    println!(
        "[Frame {}] tracked balls: {} | cue on table: {}",
        test.frame_count,
        collections.len(),
        slot.entity().is_some(),
    );
}
