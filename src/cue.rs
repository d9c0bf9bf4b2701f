//! The cue controller: aim state, strike delivery, and user cue-ball
//! placement.
//!
//! ## Interaction model
//!
//! | Click target | Controller state | Effect |
//! |---|---|---|
//! | cue ball | Idle | select it — enter `Aiming` |
//! | cue ball | Aiming | strike along the aim angle, back to `Idle` |
//! | elsewhere | Idle, slot vacant, modes 2/3 | place a new dynamic cue ball there |
//!
//! While `Aiming`, pointer motion continuously re-derives the aim angle from
//! the pointer's offset to the cue ball.  Aiming never pauses the world —
//! physics keeps integrating regardless of the controller state.

use crate::ball::{spawn_cue_ball, CueBall, CueBallSlot};
use crate::config::TableConfig;
use crate::constants::{BALL_RADIUS, CUE_POWER, TABLE_CENTRE};
use crate::mode::ModeState;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Aim state ─────────────────────────────────────────────────────────────────

/// Whether the player is currently lining up a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CuePhase {
    #[default]
    Idle,
    Aiming,
}

/// Aim angle, strike power, and selection phase of the cue.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CueAim {
    /// Aim angle in radians; 0 points along +x, updated from the pointer
    /// while [`CuePhase::Aiming`].
    pub angle: f32,
    /// Strike power scalar; multiplied by the configured strike scale to get
    /// the impulse magnitude.
    pub power: f32,
    pub phase: CuePhase,
}

impl Default for CueAim {
    fn default() -> Self {
        Self {
            angle: 0.0,
            power: CUE_POWER,
            phase: CuePhase::Idle,
        }
    }
}

impl CueAim {
    pub fn begin_aiming(&mut self) {
        self.phase = CuePhase::Aiming;
    }

    /// Drop back to idle, abandoning any aim in progress.  Called on strike,
    /// pocketing of the cue ball, and mode switches.
    pub fn cancel(&mut self) {
        self.phase = CuePhase::Idle;
    }

    pub fn is_aiming(&self) -> bool {
        self.phase == CuePhase::Aiming
    }

    /// The strike impulse: unit vector at the aim angle scaled by
    /// power × scale.
    pub fn strike_vector(&self, scale: f32) -> Vec2 {
        Vec2::from_angle(self.angle) * self.power * scale
    }
}

/// Copy the configured strike power into the aim state once the config file
/// has been loaded.
pub fn sync_cue_power(mut aim: ResMut<CueAim>, config: Res<TableConfig>) {
    aim.power = config.cue_power;
}

// ── Pointer helpers ───────────────────────────────────────────────────────────

/// Window cursor position in world coordinates.
///
/// The camera sits on the table centre, so world space is the window space
/// shifted by the difference between the table centre and the window centre.
pub fn cursor_world(window: &Window) -> Option<Vec2> {
    window
        .cursor_position()
        .map(|cursor| cursor + TABLE_CENTRE - Vec2::new(window.width(), window.height()) / 2.0)
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// While aiming, track the pointer: the aim angle is the direction from the
/// cue ball to the pointer.
pub fn cue_aim_system(
    windows: Query<&Window>,
    slot: Res<CueBallSlot>,
    q_cue: Query<&Transform, With<CueBall>>,
    mut aim: ResMut<CueAim>,
) {
    if !aim.is_aiming() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(pointer) = cursor_world(window) else {
        return;
    };
    let Some(entity) = slot.entity() else {
        return;
    };
    let Ok(transform) = q_cue.get(entity) else {
        return;
    };

    let offset = pointer - transform.translation.truncate();
    if offset != Vec2::ZERO {
        aim.angle = offset.to_angle();
    }
}

/// Handle strike/select clicks.
pub fn cue_stroke_system(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mode: Res<ModeState>,
    mut slot: ResMut<CueBallSlot>,
    mut aim: ResMut<CueAim>,
    q_cue: Query<&Transform, With<CueBall>>,
    mut q_impulses: Query<&mut ExternalImpulse, With<CueBall>>,
    config: Res<TableConfig>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(click) = cursor_world(window) else {
        return;
    };

    // A click on the cue ball itself selects or strikes.
    if let Some(entity) = slot.entity() {
        if let Ok(transform) = q_cue.get(entity) {
            if click.distance(transform.translation.truncate()) < BALL_RADIUS {
                match aim.phase {
                    CuePhase::Idle => aim.begin_aiming(),
                    CuePhase::Aiming => {
                        // The pre-placed mode-1 cue ball starts static; the
                        // strike must make it dynamic before any impulse can
                        // take effect.
                        commands.entity(entity).insert(RigidBody::Dynamic);
                        let strike = aim.strike_vector(config.cue_strike_scale);
                        if let Ok(mut impulse) = q_impulses.get_mut(entity) {
                            impulse.impulse += strike;
                        }
                        info!(
                            "cue strike: angle {:.2} rad, power {:.1}",
                            aim.angle, aim.power
                        );
                        aim.cancel();
                    }
                }
                return;
            }
        }
    }

    // Missed the cue ball: in the user-placed modes a vacant slot accepts
    // exactly one new cue ball at the click point.
    if !mode.current().preplaces_cue_ball() && slot.is_vacant() && !aim.is_aiming() {
        let position = crate::table::clamp_to_baize(click);
        let entity = spawn_cue_ball(&mut commands, &config, position, false);
        match slot.place(entity) {
            Ok(()) => info!("cue ball placed at ({:.0}, {:.0})", position.x, position.y),
            Err(e) => warn!("cue-ball placement rejected: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggles_between_idle_and_aiming() {
        let mut aim = CueAim::default();
        assert!(!aim.is_aiming());

        aim.begin_aiming();
        assert!(aim.is_aiming());

        aim.cancel();
        assert_eq!(aim.phase, CuePhase::Idle);
    }

    #[test]
    fn strike_vector_follows_the_aim_angle() {
        let aim = CueAim {
            angle: 0.0,
            power: 5.0,
            phase: CuePhase::Aiming,
        };
        let strike = aim.strike_vector(55.0);
        assert!((strike.x - 275.0).abs() < 1e-3);
        assert!(strike.y.abs() < 1e-3);
    }

    #[test]
    fn strike_magnitude_is_power_times_scale() {
        let aim = CueAim {
            angle: std::f32::consts::FRAC_PI_3,
            power: 2.0,
            phase: CuePhase::Aiming,
        };
        assert!((aim.strike_vector(10.0).length() - 20.0).abs() < 1e-3);
    }
}
