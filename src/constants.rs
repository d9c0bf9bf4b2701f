//! Centralised table geometry and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Physics-facing values are mirrored into [`crate::config::TableConfig`] so
//! they can be overridden from `assets/table.toml` without recompiling; the
//! table geometry itself (cushions, pockets, stations) is fixed data and is
//! only defined here.
//!
//! The coordinate frame is screen-like: x grows rightward, y grows downward,
//! with the window spanning 1200×800 and the table centred at (600, 400).

use bevy::prelude::Vec2;

// ── Window / Table Geometry ───────────────────────────────────────────────────

/// Window width in logical pixels; world units are 1:1 with window pixels.
pub const WINDOW_WIDTH: f32 = 1200.0;

/// Window height in logical pixels.
pub const WINDOW_HEIGHT: f32 = 800.0;

/// Centre of the table (and of the camera) in world units.
pub const TABLE_CENTRE: Vec2 = Vec2::new(600.0, 400.0);

/// Length of the top/bottom cushions (world units).
pub const TABLE_WIDTH: f32 = 920.0;

/// Length of the left/right cushions (world units).
pub const TABLE_HEIGHT: f32 = 440.0;

/// Interior play surface: inner faces of the four cushions.
/// Balls and pockets all live inside this rectangle.
pub const PLAY_MIN_X: f32 = 120.0;
pub const PLAY_MAX_X: f32 = 1080.0;
pub const PLAY_MIN_Y: f32 = 160.0;
pub const PLAY_MAX_Y: f32 = 640.0;

/// Thickness of each cushion body (world units).
pub const CUSHION_THICKNESS: f32 = 20.0;

/// Radius of the four static corner bodies that round off the cushion gaps
/// next to the corner pockets.
pub const CORNER_RADIUS: f32 = 15.0;

/// Centres of the four corner bodies.
pub const CORNER_CENTRES: [Vec2; 4] = [
    Vec2::new(130.0, 170.0),
    Vec2::new(1070.0, 170.0),
    Vec2::new(130.0, 630.0),
    Vec2::new(1070.0, 630.0),
];

// ── Pockets ───────────────────────────────────────────────────────────────────

/// Pocket mouth diameter (world units).
pub const POCKET_DIAMETER: f32 = 20.0;

/// Pocket capture radius.  A ball is captured when its centre comes strictly
/// closer than `POCKET_RADIUS + BALL_RADIUS` to a pocket centre.
pub const POCKET_RADIUS: f32 = POCKET_DIAMETER / 2.0;

/// The six pocket centres: four corners plus the two middle pockets.
pub const POCKET_CENTRES: [Vec2; 6] = [
    Vec2::new(138.0, 178.0),
    Vec2::new(1062.0, 178.0),
    Vec2::new(138.0, 623.0),
    Vec2::new(1062.0, 623.0),
    Vec2::new(600.0, 178.0),
    Vec2::new(600.0, 623.0),
];

// ── Random Placement ──────────────────────────────────────────────────────────

/// Rectangle from which random ball positions are drawn, before the one-ball-
/// radius inset.  Matches the pocket-line rectangle, not the full interior:
/// spawning flush against a cushion face would report a boundary contact on
/// the very first physics step.
pub const SPAWN_MIN_X: f32 = 138.0;
pub const SPAWN_MAX_X: f32 = 1062.0;
pub const SPAWN_MIN_Y: f32 = 178.0;
pub const SPAWN_MAX_Y: f32 = 623.0;

// ── Balls ─────────────────────────────────────────────────────────────────────

/// Ball diameter (world units).  Also the centre-distance at or below which a
/// reported ball-ball contact is confirmed as a genuine overlap.
pub const BALL_DIAMETER: f32 = 13.0;

/// Ball collider radius.
pub const BALL_RADIUS: f32 = BALL_DIAMETER / 2.0;

/// Restitution for ball-ball and ball-cushion contacts.
/// 0.9 keeps collisions lively without the energy gain seen above ~0.95.
pub const BALL_RESTITUTION: f32 = 0.9;

/// Contact friction coefficient for balls.
pub const BALL_FRICTION: f32 = 0.02;

/// Collider density (mass units per world-unit²).
///
/// At radius 6.5 this gives each ball a mass of ≈ 0.66, which the cue strike
/// and collision impulse scales below are calibrated against.
pub const BALL_DENSITY: f32 = 0.005;

/// Linear damping applied to every ball; stands in for cloth friction so
/// struck balls roll out and stop within a few seconds.
pub const BALL_LINEAR_DAMPING: f32 = 0.7;

/// Angular damping applied to every ball.
pub const BALL_ANGULAR_DAMPING: f32 = 0.7;

/// Number of red balls in every mode.
pub const RED_BALL_COUNT: usize = 15;

// ── Cushions ──────────────────────────────────────────────────────────────────

/// Restitution of the cushion and corner bodies.
pub const CUSHION_RESTITUTION: f32 = 0.9;

/// Contact friction of the cushion bodies.
pub const CUSHION_FRICTION: f32 = 0.01;

// ── Rack ──────────────────────────────────────────────────────────────────────

/// Apex of the triangular rack.  Rows extend rightward from here.
pub const RACK_ANCHOR: Vec2 = Vec2::new(WINDOW_WIDTH * 0.692, WINDOW_HEIGHT * 0.482);

/// Extra spacing between racked balls beyond one diameter.
pub const RACK_GAP: f32 = 2.0;

// ── Colored Balls ─────────────────────────────────────────────────────────────

/// Canonical colored-ball stations along the baulk line, centre spot, and top
/// end, in the fixed slot order yellow, green, brown, blue, pink, black.
pub const COLORED_STATIONS: [Vec2; 6] = [
    Vec2::new(370.0, 475.0),
    Vec2::new(370.0, 325.0),
    Vec2::new(370.0, 400.0),
    Vec2::new(600.0, 400.0),
    Vec2::new(830.0, 400.0),
    Vec2::new(945.0, 400.0),
];

/// X coordinate of the baulk line (and the centre of the "D").
pub const BAULK_LINE_X: f32 = 370.0;

/// Radius of the baulk "D" semicircle.
pub const BAULK_D_RADIUS: f32 = 75.0;

// ── Cue ───────────────────────────────────────────────────────────────────────

/// Where the cue ball is pre-placed when Starting-Positions mode is entered.
pub const CUE_START: Vec2 = Vec2::new(330.0, 400.0);

/// Default strike power scalar.
pub const CUE_POWER: f32 = 5.0;

/// Impulse applied per unit of power.
///
/// Ball mass ≈ 0.66 (see [`BALL_DENSITY`]), so a power-5 strike delivers an
/// impulse of 275 → a launch speed of ≈ 420 u/s, crossing the table in about
/// two seconds before damping brings the ball to rest.
pub const CUE_STRIKE_SCALE: f32 = 55.0;

/// Drawn length of the cue stick while aiming (world units).
pub const CUE_STICK_LENGTH: f32 = 150.0;

// ── Collision Response ────────────────────────────────────────────────────────

/// Scale applied to the relative-speed magnitude when converting a confirmed
/// ball-ball contact into an impulse on the second ball.
/// Tested range: 0.02–0.10; above ~0.15 clusters visibly gain energy.
pub const COLLISION_FORCE_DAMPING: f32 = 0.05;

/// Fixed diagonal impulse applied to a racked ball the moment the cue ball
/// promotes it to dynamic.  Guarantees visible motion even when the contact
/// relative velocity is near zero; at ball mass 0.66 this is ≈ 0.5 u/s.
pub const NUDGE_IMPULSE: f32 = 0.35;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size for the mode line and the instructions overlay.
pub const HUD_FONT_SIZE: f32 = 20.0;
