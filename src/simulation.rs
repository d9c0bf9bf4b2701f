//! Table plugin and simulation-wide counters.
//!
//! ## Tick order
//!
//! | Schedule | Systems |
//! |---|---|
//! | `Startup` | config load → table boundaries, cue-power sync |
//! | `Update` | mode select → mode rebuild, cue aim → cue stroke |
//! | `PostUpdate` | collision response → pocket monitor (after physics) |
//!
//! Mode rebuilds happen before the physics step of the same tick; collision
//! responses and pocket checks happen after it, so they observe settled
//! positions.  Everything runs on the single main-thread schedule — the
//! collections and the cue slot have no concurrent writers.

use crate::ball::{BallCollections, CueBallSlot};
use crate::config::{load_table_config, TableConfig};
use crate::cue::{cue_aim_system, cue_stroke_system, sync_cue_power, CueAim};
use crate::mode::{mode_rebuild_system, mode_select_system, ModeState};
use crate::{collision, lifecycle, table};
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Lifecycle counters surfaced on the HUD; the scoring hook reduced to
/// bookkeeping.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TableStats {
    /// Red balls captured by a pocket.
    pub reds_potted: u32,
    /// Times the colored set was torn down and respotted.
    pub colours_respotted: u32,
    /// Cue balls lost to a pocket.
    pub cue_balls_lost: u32,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers every resource and system of the table core.  Rendering and the
/// physics backend are added separately, so this plugin also serves headless
/// integration tests unchanged.
pub struct TablePlugin;

impl Plugin for TablePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TableConfig>()
            .init_resource::<BallCollections>()
            .init_resource::<CueBallSlot>()
            .init_resource::<ModeState>()
            .init_resource::<CueAim>()
            .init_resource::<TableStats>()
            // Registered by the Rapier plugin as well; idempotent, and it
            // keeps the classifier runnable without a physics backend.
            .add_message::<CollisionEvent>()
            .add_systems(
                Startup,
                (
                    load_table_config,
                    table::spawn_table_boundaries.after(load_table_config),
                    sync_cue_power.after(load_table_config),
                ),
            )
            .add_systems(
                Update,
                (
                    mode_select_system,
                    mode_rebuild_system.after(mode_select_system),
                    cue_aim_system,
                    cue_stroke_system.after(cue_aim_system),
                ),
            )
            .add_systems(
                PostUpdate,
                (
                    collision::collision_response_system,
                    lifecycle::pocket_capture_system,
                )
                    .chain(),
            );
    }
}
