//! Runtime table configuration loaded from `assets/table.toml`.
//!
//! [`TableConfig`] is a Bevy [`Resource`] that mirrors every tuneable
//! constant in [`crate::constants`].  At startup, [`load_table_config`]
//! reads `assets/table.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time
//! defaults, so a minimal TOML can override just the constants you care
//! about.
//!
//! Fixed geometry (cushion rectangles, pocket centres, colored-ball
//! stations) is intentionally *not* configurable: the capture and layout
//! rules are calibrated against it, and it stays in `src/constants.rs`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable table and cue configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/table.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    // ── Balls ────────────────────────────────────────────────────────────────
    pub ball_restitution: f32,
    pub ball_friction: f32,
    pub ball_density: f32,
    pub ball_linear_damping: f32,
    pub ball_angular_damping: f32,

    // ── Cushions ─────────────────────────────────────────────────────────────
    pub cushion_restitution: f32,
    pub cushion_friction: f32,

    // ── Rack ─────────────────────────────────────────────────────────────────
    pub rack_gap: f32,

    // ── Cue ──────────────────────────────────────────────────────────────────
    pub cue_power: f32,
    pub cue_strike_scale: f32,
    pub cue_stick_length: f32,

    // ── Collision Response ───────────────────────────────────────────────────
    pub collision_force_damping: f32,
    pub nudge_impulse: f32,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            // Balls
            ball_restitution: BALL_RESTITUTION,
            ball_friction: BALL_FRICTION,
            ball_density: BALL_DENSITY,
            ball_linear_damping: BALL_LINEAR_DAMPING,
            ball_angular_damping: BALL_ANGULAR_DAMPING,
            // Cushions
            cushion_restitution: CUSHION_RESTITUTION,
            cushion_friction: CUSHION_FRICTION,
            // Rack
            rack_gap: RACK_GAP,
            // Cue
            cue_power: CUE_POWER,
            cue_strike_scale: CUE_STRIKE_SCALE,
            cue_stick_length: CUE_STICK_LENGTH,
            // Collision Response
            collision_force_damping: COLLISION_FORCE_DAMPING,
            nudge_impulse: NUDGE_IMPULSE,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

/// Startup system: attempt to load `assets/table.toml` and overwrite the
/// `TableConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are
/// printed to stderr but do not abort the simulation.  A missing file is
/// silently ignored (defaults are already in place from `insert_resource`).
pub fn load_table_config(mut config: ResMut<TableConfig>) {
    let path = "assets/table.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<TableConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded table config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = TableConfig::default();
        assert_eq!(config.ball_restitution, BALL_RESTITUTION);
        assert_eq!(config.ball_density, BALL_DENSITY);
        assert_eq!(config.cushion_restitution, CUSHION_RESTITUTION);
        assert_eq!(config.rack_gap, RACK_GAP);
        assert_eq!(config.cue_power, CUE_POWER);
        assert_eq!(config.cue_strike_scale, CUE_STRIKE_SCALE);
        assert_eq!(config.collision_force_damping, COLLISION_FORCE_DAMPING);
        assert_eq!(config.nudge_impulse, NUDGE_IMPULSE);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: TableConfig = toml::from_str("cue_power = 8.0").unwrap();
        assert_eq!(config.cue_power, 8.0);
        assert_eq!(config.ball_restitution, BALL_RESTITUTION);
        assert_eq!(config.nudge_impulse, NUDGE_IMPULSE);
    }
}
