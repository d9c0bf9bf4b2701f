//! Camera setup.

use crate::constants::TABLE_CENTRE;
use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// World coordinates are screen-like (y grows downward, matching the table
/// constants), so the camera sits on the table centre with its Y axis
/// flipped.  With the default 1200×800 window this makes world coordinates
/// coincide with window cursor coordinates exactly.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_translation(TABLE_CENTRE.extend(0.0)).with_scale(Vec3::new(1.0, -1.0, 1.0)),
    ));
    eprintln!("[SETUP] Camera spawned");
}
