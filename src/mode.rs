//! The mode state machine: which layout the table is running, and the
//! transition that tears down and rebuilds the ball population.
//!
//! A transition is latched: [`ModeState::take_transition`] yields the newly
//! requested mode exactly once, so the rebuild fires on the first tick after
//! a change and never again until the mode actually changes.  Re-selecting
//! the current mode is a no-op — existing balls keep their entities.

use crate::ball::{spawn_cue_ball, BallCollections, CueBallSlot};
use crate::config::TableConfig;
use crate::constants::CUE_START;
use crate::cue::CueAim;
use crate::layout::{spawn_colored, spawn_rack_reds, spawn_random_reds};
use bevy::prelude::*;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// The three table layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    /// Rack of reds, colored balls on their stations, cue ball pre-placed.
    #[default]
    StartingPositions,
    /// Reds and colored balls all scattered at random; user places the cue.
    RandomAll,
    /// Reds scattered at random, colored balls on stations; user places the cue.
    RandomRed,
}

impl TableMode {
    /// HUD label, including the key that selects the mode.
    pub fn label(self) -> &'static str {
        match self {
            TableMode::StartingPositions => "Starting Positions (PRESS 1)",
            TableMode::RandomAll => "Random All (PRESS 2)",
            TableMode::RandomRed => "Random Red (PRESS 3)",
        }
    }

    /// Whether entering this mode pre-places the cue ball, as opposed to
    /// deferring placement to a user click.
    pub fn preplaces_cue_ball(self) -> bool {
        matches!(self, TableMode::StartingPositions)
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// Current and last-applied mode.
///
/// `last_applied` starts as `None`, so the very first tick performs the
/// initial Starting-Positions build through the same transition path as
/// every later mode switch.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    current: TableMode,
    last_applied: Option<TableMode>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            current: TableMode::default(),
            last_applied: None,
        }
    }
}

impl ModeState {
    /// Record a mode-select input.  Requesting the active mode changes
    /// nothing.
    pub fn request(&mut self, mode: TableMode) {
        self.current = mode;
    }

    pub fn current(&self) -> TableMode {
        self.current
    }

    /// Yield the pending transition, if any, and latch it as applied.
    /// Returns `Some` exactly once per actual mode change.
    pub fn take_transition(&mut self) -> Option<TableMode> {
        if self.last_applied == Some(self.current) {
            None
        } else {
            self.last_applied = Some(self.current);
            Some(self.current)
        }
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Map the 1/2/3 keys onto mode requests.
pub fn mode_select_system(keys: Res<ButtonInput<KeyCode>>, mut mode: ResMut<ModeState>) {
    if keys.just_pressed(KeyCode::Digit1) {
        mode.request(TableMode::StartingPositions);
    } else if keys.just_pressed(KeyCode::Digit2) {
        mode.request(TableMode::RandomAll);
    } else if keys.just_pressed(KeyCode::Digit3) {
        mode.request(TableMode::RandomRed);
    }
}

/// Apply a pending mode transition: tear down every ball (cue included),
/// rebuild the collections for the new mode, and pre-place the cue ball when
/// the mode calls for it.
pub fn mode_rebuild_system(
    mut commands: Commands,
    mut mode: ResMut<ModeState>,
    mut collections: ResMut<BallCollections>,
    mut slot: ResMut<CueBallSlot>,
    mut aim: ResMut<CueAim>,
    config: Res<TableConfig>,
) {
    let Some(new_mode) = mode.take_transition() else {
        return;
    };

    // Teardown is total: collections, cue ball, and any aim in progress.
    collections.despawn_all(&mut commands);
    if let Some(entity) = slot.entity() {
        commands.entity(entity).despawn();
        slot.vacate();
    }
    aim.cancel();

    match new_mode {
        TableMode::StartingPositions => {
            spawn_rack_reds(&mut commands, &config, &mut collections);
            spawn_colored(&mut commands, &config, &mut collections, false);
            let cue = spawn_cue_ball(&mut commands, &config, CUE_START, true);
            if let Err(e) = slot.place(cue) {
                warn!("cue-ball slot rejected pre-placement: {e}");
            }
        }
        TableMode::RandomAll => {
            spawn_random_reds(&mut commands, &config, &mut collections);
            spawn_colored(&mut commands, &config, &mut collections, true);
        }
        TableMode::RandomRed => {
            spawn_random_reds(&mut commands, &config, &mut collections);
            spawn_colored(&mut commands, &config, &mut collections, false);
        }
    }

    info!("table rebuilt for mode: {}", new_mode.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_has_a_pending_transition() {
        let mut state = ModeState::default();
        assert_eq!(state.current(), TableMode::StartingPositions);
        assert_eq!(state.take_transition(), Some(TableMode::StartingPositions));
        // Latched: nothing further until the mode changes.
        assert_eq!(state.take_transition(), None);
    }

    #[test]
    fn reselecting_the_current_mode_is_a_no_op() {
        let mut state = ModeState::default();
        state.take_transition();

        state.request(TableMode::StartingPositions);
        assert_eq!(state.take_transition(), None);
    }

    #[test]
    fn each_mode_change_fires_exactly_once() {
        let mut state = ModeState::default();
        state.take_transition();

        state.request(TableMode::RandomRed);
        assert_eq!(state.take_transition(), Some(TableMode::RandomRed));
        assert_eq!(state.take_transition(), None);

        state.request(TableMode::RandomAll);
        state.request(TableMode::RandomRed); // superseded within the same tick
        assert_eq!(state.take_transition(), None);

        state.request(TableMode::RandomAll);
        assert_eq!(state.take_transition(), Some(TableMode::RandomAll));
    }

    #[test]
    fn only_starting_positions_preplaces_the_cue_ball() {
        assert!(TableMode::StartingPositions.preplaces_cue_ball());
        assert!(!TableMode::RandomAll.preplaces_cue_ball());
        assert!(!TableMode::RandomRed.preplaces_cue_ball());
    }
}
