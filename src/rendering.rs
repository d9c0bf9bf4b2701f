//! Rendering systems: ball meshes, table/pocket/cue gizmo layers, the mode
//! HUD line, and the instructions overlay.
//!
//! ## Layer model
//!
//! | Layer | Technology | Notes |
//! |---|---|---|
//! | Ball fills | `Mesh2d` | one shared circle mesh, material per ball |
//! | Table + pockets | Gizmos | redrawn every frame |
//! | Baulk line + "D" | Gizmos | |
//! | Cue stick | Gizmos | only while aiming |
//! | Mode / stats HUD | Bevy UI | refreshed every frame |
//! | Instructions overlay | Bevy UI | toggled with `H` |
//!
//! None of these systems read anything back into the simulation: they
//! consume the read-only snapshot (positions, kinds, mode, aim state) and
//! draw it.

use crate::ball::{Ball, BallKind, CueBall, CueBallSlot};
use crate::config::TableConfig;
use crate::constants::{
    BALL_RADIUS, BAULK_D_RADIUS, BAULK_LINE_X, PLAY_MAX_Y, PLAY_MIN_Y, POCKET_RADIUS, TABLE_CENTRE,
};
use crate::cue::CueAim;
use crate::mode::ModeState;
use crate::simulation::TableStats;
use crate::table::pockets;
use bevy::prelude::*;

// ── Markers & resources ───────────────────────────────────────────────────────

/// Shared circle mesh for every ball (created once at startup).
#[derive(Resource)]
pub struct BallMesh(Handle<Mesh>);

/// Tags the mode/stats HUD text node.
#[derive(Component)]
pub struct ModeHudText;

/// Root node of the instructions overlay; visibility is toggled with `H`.
#[derive(Component)]
pub struct InstructionsOverlay;

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_ball_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(Circle::new(BALL_RADIUS));
    commands.insert_resource(BallMesh(handle));
}

/// Spawn the persistent mode/stats HUD line in the top-left corner.
pub fn setup_mode_hud(mut commands: Commands, config: Res<TableConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ModeHudText,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Current Mode:"),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb_u8(54, 69, 79)),
            ));
        });
}

/// Spawn the instructions overlay, visible on startup.
pub fn setup_instructions_overlay(mut commands: Commands, config: Res<TableConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            InstructionsOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(
                    "How to Play:\n\
                     - Use the mouse to aim and click to hit the cue ball.\n\
                     - Press 1, 2, or 3 to select the game mode.\n\
                     - In modes 2 and 3, click an empty spot to place the cue ball.\n\
                     - Try to pocket all balls!\n\
                     Press 'H' to hide these instructions.",
                ),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

// ── Update: meshes ────────────────────────────────────────────────────────────

/// Attach a filled circle `Mesh2d` to every freshly-spawned ball.
///
/// The cue ball is white, reds are red, colored balls use their slot color.
pub fn attach_ball_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, Option<&BallKind>, Has<CueBall>), Added<Ball>>,
    ball_mesh: Res<BallMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, kind, is_cue) in query.iter() {
        let color = if is_cue {
            Color::WHITE
        } else {
            match kind {
                Some(BallKind::Red) | None => Color::srgb_u8(255, 0, 0),
                Some(BallKind::Colored(ball_color)) => ball_color.color(),
            }
        };
        let mat = materials.add(ColorMaterial::from_color(color));
        commands
            .entity(entity)
            .insert((Mesh2d(ball_mesh.0.clone()), MeshMaterial2d(mat)));
    }
}

// ── Update: gizmo layers ──────────────────────────────────────────────────────

/// Draw the table surface, pockets, baulk line and "D".
pub fn table_gizmo_system(mut gizmos: Gizmos) {
    // Nested table rectangles: wooden frame, cushion band, cloth.
    gizmos.rect_2d(
        Isometry2d::from_translation(TABLE_CENTRE),
        Vec2::new(960.0, 480.0),
        Color::srgb_u8(51, 0, 0),
    );
    gizmos.rect_2d(
        Isometry2d::from_translation(TABLE_CENTRE),
        Vec2::new(940.0, 460.0),
        Color::srgb_u8(51, 51, 255),
    );
    gizmos.rect_2d(
        Isometry2d::from_translation(TABLE_CENTRE),
        Vec2::new(920.0, 440.0),
        Color::srgb_u8(0, 0, 255),
    );

    for pocket in pockets() {
        gizmos.circle_2d(pocket.centre, POCKET_RADIUS, Color::BLACK);
    }

    // Baulk line and the "D" opening toward the baulk cushion.
    gizmos.line_2d(
        Vec2::new(BAULK_LINE_X, PLAY_MIN_Y + 20.0),
        Vec2::new(BAULK_LINE_X, PLAY_MAX_Y - 20.0),
        Color::WHITE,
    );
    gizmos.arc_2d(
        Isometry2d::new(
            Vec2::new(BAULK_LINE_X, TABLE_CENTRE.y),
            Rot2::radians(std::f32::consts::FRAC_PI_2),
        ),
        std::f32::consts::PI,
        BAULK_D_RADIUS,
        Color::WHITE,
    );
}

/// Draw the cue stick while the player is aiming.
pub fn cue_gizmo_system(
    mut gizmos: Gizmos,
    aim: Res<CueAim>,
    slot: Res<CueBallSlot>,
    q_cue: Query<&Transform, With<CueBall>>,
    config: Res<TableConfig>,
) {
    if !aim.is_aiming() {
        return;
    }
    let Some(entity) = slot.entity() else {
        return;
    };
    let Ok(transform) = q_cue.get(entity) else {
        return;
    };
    let ball = transform.translation.truncate();
    let tip = ball + Vec2::from_angle(aim.angle) * config.cue_stick_length;
    gizmos.line_2d(ball, tip, Color::srgb_u8(128, 128, 128));
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

/// Refresh the mode/stats HUD line whenever either source changes.
pub fn mode_hud_refresh_system(
    mode: Res<ModeState>,
    stats: Res<TableStats>,
    parent_query: Query<&Children, With<ModeHudText>>,
    mut text_query: Query<&mut Text>,
) {
    if !mode.is_changed() && !stats.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "Current Mode: {} | Potted: {} reds | Respots: {} | Cue lost: {}",
                    mode.current().label(),
                    stats.reds_potted,
                    stats.colours_respotted,
                    stats.cue_balls_lost,
                ));
            }
        }
    }
}

/// Toggle the instructions overlay with `H`.
pub fn toggle_instructions_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut overlay: Query<&mut Visibility, With<InstructionsOverlay>>,
) {
    if !keys.just_pressed(KeyCode::KeyH) {
        return;
    }
    for mut visibility in overlay.iter_mut() {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
    }
}
