//! Ball components, the ball body factory, and the two pieces of table-wide
//! ball state: the per-mode collections and the cue-ball slot.
//!
//! ## Ownership model
//!
//! Every ball is a physics entity; identity and category live on the entity
//! as components ([`Ball`], [`BallKind`], [`CueBall`]).  Membership lives in
//! [`BallCollections`]: each object ball is tracked by exactly one of the
//! three collections, and removal from the world and from the collection
//! happens in the same system pass so no dangling entity is ever retained.
//!
//! The cue ball is tracked separately by [`CueBallSlot`], which doubles as
//! the placement gate: a new cue ball may only be placed while the slot is
//! vacant, and the slot is vacated exactly once per pocketing or mode switch.

use crate::config::TableConfig;
use crate::constants::BALL_RADIUS;
use crate::error::{TableError, TableResult};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker for every ball on the table, cue ball included.  Fills the role of
/// the engine's `"ball"` label: the collision classifier filters on it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ball;

/// Category of an object ball.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Red,
    Colored(BallColor),
}

/// The six colored-ball colors, in canonical station order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    Yellow,
    Green,
    Brown,
    Blue,
    Pink,
    Black,
}

impl BallColor {
    /// All six colors in canonical station order (baulk line, then centre,
    /// pink, black spots).
    pub const ALL: [BallColor; 6] = [
        BallColor::Yellow,
        BallColor::Green,
        BallColor::Brown,
        BallColor::Blue,
        BallColor::Pink,
        BallColor::Black,
    ];

    /// Render color for this ball.
    pub fn color(self) -> Color {
        match self {
            BallColor::Yellow => Color::srgb_u8(255, 255, 0),
            BallColor::Green => Color::srgb_u8(0, 255, 0),
            BallColor::Brown => Color::srgb_u8(131, 67, 51),
            BallColor::Blue => Color::srgb_u8(0, 0, 128),
            BallColor::Pink => Color::srgb_u8(255, 105, 180),
            BallColor::Black => Color::srgb_u8(0, 0, 0),
        }
    }
}

/// Marker for the single player-controlled striking ball.
#[derive(Component, Debug, Clone, Copy)]
pub struct CueBall;

// ── Collections ───────────────────────────────────────────────────────────────

/// The three mode-selected ball collections.
///
/// Only one red collection is populated at a time: `rack_reds` in
/// Starting-Positions mode, `random_reds` in Random-All and Random-Red.
/// The colored collection is populated in every mode.
#[derive(Resource, Debug, Default)]
pub struct BallCollections {
    /// Reds racked at their triangular starting positions.
    pub rack_reds: Vec<Entity>,
    /// Reds scattered uniformly at random.
    pub random_reds: Vec<Entity>,
    /// The six colored balls.
    pub colored: Vec<Entity>,
}

impl BallCollections {
    /// All tracked object balls, in collection order.
    pub fn iter_all(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rack_reds
            .iter()
            .chain(self.random_reds.iter())
            .chain(self.colored.iter())
            .copied()
    }

    /// Total number of tracked object balls.
    pub fn len(&self) -> usize {
        self.rack_reds.len() + self.random_reds.len() + self.colored.len()
    }

    /// True when no object ball is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// At most one red collection may be non-empty at any time.
    pub fn reds_consistent(&self) -> bool {
        self.rack_reds.is_empty() || self.random_reds.is_empty()
    }

    /// Despawn every tracked ball and forget it.  Used on mode switches,
    /// where teardown must be atomic from the simulation's perspective.
    pub fn despawn_all(&mut self, commands: &mut Commands) {
        for entity in self.iter_all().collect::<Vec<_>>() {
            commands.entity(entity).despawn();
        }
        self.rack_reds.clear();
        self.random_reds.clear();
        self.colored.clear();
    }
}

// ── Cue-ball slot ─────────────────────────────────────────────────────────────

/// Lifecycle state of the cue ball: the single source of truth for both the
/// at-most-one-cue-ball invariant and the user-placement gate.
///
/// | Transition | Trigger |
/// |---|---|
/// | `Vacant → OnTable` | mode-1 pre-placement, or a user click in modes 2/3 |
/// | `OnTable → Vacant` | cue ball pocketed, or any mode switch |
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CueBallSlot {
    /// No cue ball on the table; one placement is permitted.
    #[default]
    Vacant,
    /// The cue ball identified by this entity is in play.
    OnTable(Entity),
}

impl CueBallSlot {
    /// The live cue-ball entity, if one is on the table.
    pub fn entity(&self) -> Option<Entity> {
        match self {
            CueBallSlot::Vacant => None,
            CueBallSlot::OnTable(entity) => Some(*entity),
        }
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, CueBallSlot::Vacant)
    }

    /// Occupy the slot.  Rejects the placement when a cue ball is already on
    /// the table — callers treat that as a defect signal and keep the
    /// existing ball.
    pub fn place(&mut self, entity: Entity) -> TableResult<()> {
        match self {
            CueBallSlot::Vacant => {
                *self = CueBallSlot::OnTable(entity);
                Ok(())
            }
            CueBallSlot::OnTable(_) => Err(TableError::DuplicateCueBall),
        }
    }

    /// Vacate the slot, permitting one new placement.
    pub fn vacate(&mut self) {
        *self = CueBallSlot::Vacant;
    }
}

// ── Body factory ──────────────────────────────────────────────────────────────

/// Spawn an object ball at `position` and return its entity.
///
/// All balls share one collider shape and material; what varies is the kind
/// and whether the body starts static (racked / spotted) or dynamic.
/// `ActiveEvents::COLLISION_EVENTS` makes the body report collision-start
/// pairs to the classifier.
pub fn spawn_ball(
    commands: &mut Commands,
    config: &TableConfig,
    position: Vec2,
    kind: BallKind,
    is_static: bool,
) -> Entity {
    commands.spawn((ball_body(config, position, is_static), Ball, kind)).id()
}

/// Spawn the cue ball at `position` and return its entity.
///
/// The cue ball carries the plain `Ball` label as well, so ball-ball
/// classification rules apply to it like any other ball.
pub fn spawn_cue_ball(
    commands: &mut Commands,
    config: &TableConfig,
    position: Vec2,
    is_static: bool,
) -> Entity {
    commands
        .spawn((ball_body(config, position, is_static), Ball, CueBall))
        .id()
}

/// Shared physics bundle for every ball body.
fn ball_body(
    config: &TableConfig,
    position: Vec2,
    is_static: bool,
) -> impl Bundle {
    (
        if is_static {
            RigidBody::Fixed
        } else {
            RigidBody::Dynamic
        },
        Collider::ball(BALL_RADIUS),
        Restitution::coefficient(config.ball_restitution),
        Friction::coefficient(config.ball_friction),
        ColliderMassProperties::Density(config.ball_density),
        Damping {
            linear_damping: config.ball_linear_damping,
            angular_damping: config.ball_angular_damping,
        },
        Velocity::zero(),
        ExternalImpulse::default(),
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_translation(position.extend(0.1)),
        Visibility::default(),
    )
}
