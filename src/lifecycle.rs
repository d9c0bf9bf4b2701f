//! Per-tick pocket monitoring and the ball lifecycle it drives.
//!
//! Runs after the physics step so it observes settled positions.  Every ball
//! tracked by a collection, plus the cue ball, is tested against the six
//! pockets:
//!
//! - a captured **red** is removed from the world and from its collection
//!   (its only further trace is the potted counter);
//! - a captured **colored** ball forces the whole colored set to respot:
//!   every colored body is torn down and the six are regenerated at their
//!   canonical stations;
//! - a captured **cue ball** is removed and the slot vacated, re-arming
//!   exactly one replacement placement.
//!
//! Collections are walked in-place with `retain`, so a ball removed this
//! pass can never be examined a second time in the same tick.  Entities
//! that vanished from the world out-of-band are dropped from tracking
//! without counting as captures.

use crate::ball::{Ball, BallCollections, CueBallSlot};
use crate::config::TableConfig;
use crate::cue::CueAim;
use crate::layout::spawn_colored;
use crate::simulation::TableStats;
use crate::table::capturing_pocket;
use bevy::prelude::*;

/// Outcome of this tick's pocket test for one tracked ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BallFate {
    InPlay,
    Captured,
    /// The entity no longer exists in the world; forget it silently.
    Stale,
}

/// Scan every live ball against the pockets and apply capture consequences.
pub fn pocket_capture_system(
    mut commands: Commands,
    mut collections: ResMut<BallCollections>,
    mut slot: ResMut<CueBallSlot>,
    mut aim: ResMut<CueAim>,
    mut stats: ResMut<TableStats>,
    q_transforms: Query<&Transform, With<Ball>>,
    config: Res<TableConfig>,
) {
    let fate = |entity: Entity| -> BallFate {
        match q_transforms.get(entity) {
            Err(_) => BallFate::Stale,
            Ok(transform) => {
                if capturing_pocket(transform.translation.truncate()).is_some() {
                    BallFate::Captured
                } else {
                    BallFate::InPlay
                }
            }
        }
    };

    // ── Reds: individual removal ──────────────────────────────────────────────
    let mut reds_potted = 0u32;
    {
        let BallCollections {
            rack_reds,
            random_reds,
            ..
        } = &mut *collections;
        for reds in [rack_reds, random_reds] {
            reds.retain(|&entity| match fate(entity) {
                BallFate::InPlay => true,
                BallFate::Stale => false,
                BallFate::Captured => {
                    commands.entity(entity).despawn();
                    reds_potted += 1;
                    false
                }
            });
        }
    }
    if reds_potted > 0 {
        stats.reds_potted += reds_potted;
        info!("{reds_potted} red ball(s) potted");
    }

    // ── Colored: set respot ───────────────────────────────────────────────────
    collections
        .colored
        .retain(|&entity| fate(entity) != BallFate::Stale);
    let colored_captured = collections
        .colored
        .iter()
        .any(|&entity| fate(entity) == BallFate::Captured);
    if colored_captured {
        for &entity in &collections.colored {
            commands.entity(entity).despawn();
        }
        collections.colored.clear();
        spawn_colored(&mut commands, &config, &mut collections, false);
        stats.colours_respotted += 1;
        info!("colored ball potted — full set respotted");
    }

    // ── Cue ball: slot teardown ───────────────────────────────────────────────
    if let Some(entity) = slot.entity() {
        match fate(entity) {
            BallFate::InPlay => {}
            BallFate::Stale => slot.vacate(),
            BallFate::Captured => {
                commands.entity(entity).despawn();
                slot.vacate();
                aim.cancel();
                stats.cue_balls_lost += 1;
                info!("cue ball pocketed");
            }
        }
    }
}
