use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use std::env;

use baize::config::TableConfig;
use baize::testing::{
    pocket_capture_scenario_system, strike_rack_scenario_system, test_logging_system,
    test_verification_system, TestConfig,
};
use baize::{graphics, lifecycle, rendering, simulation};

/// Configure Rapier physics: the table is viewed from above, so no gravity.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    // Check for test mode
    let test_mode = env::var("BAIZE_TEST").ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Baize".into(),
            resolution: WindowResolution::new(1200, 800),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.78, 0.78, 0.78)))
    // Insert TableConfig with compiled defaults; load_table_config will
    // overwrite it from assets/table.toml (if present) in the Startup schedule.
    .insert_resource(TableConfig::default())
    // pixels_per_meter(1.0) keeps world units 1:1 with table coordinates, so
    // the constants in src/constants.rs are used by Rapier unchanged.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins(simulation::TablePlugin)
    .add_systems(
        Startup,
        (
            graphics::setup_camera,
            rendering::setup_ball_mesh,
            // HUD setups read the loaded font size, so run after the config
            // file has been applied.
            rendering::setup_mode_hud.after(baize::config::load_table_config),
            rendering::setup_instructions_overlay.after(baize::config::load_table_config),
            setup_physics_config,
        ),
    )
    .add_systems(
        Update,
        (
            rendering::attach_ball_mesh_system,
            rendering::table_gizmo_system,
            rendering::cue_gizmo_system,
            rendering::mode_hud_refresh_system,
            rendering::toggle_instructions_system,
        ),
    );

    // Add testing systems if in test mode
    if let Some(test_name) = test_mode {
        app.insert_resource(TestConfig {
            enabled: true,
            test_name: test_name.clone(),
            ..Default::default()
        });

        match test_name.as_str() {
            "pocket_capture" => app.add_systems(Update, pocket_capture_scenario_system),
            _ => app.add_systems(Update, strike_rack_scenario_system),
        };

        // Verification runs after the pocket monitor so it observes this
        // frame's captures, not last frame's.
        app.add_systems(
            PostUpdate,
            (test_verification_system, test_logging_system)
                .chain()
                .after(lifecycle::pocket_capture_system),
        );

        println!("Running test: {}", test_name);
    } else {
        app.insert_resource(TestConfig::default());
    }

    app.run();
}
