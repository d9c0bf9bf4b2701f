//! Table geometry: cushion and corner bodies, pocket descriptors, and the
//! pocket-capture predicate.
//!
//! The four cushions plus four corner bodies are static rigid bodies created
//! once at startup and never touched again.  Pockets carry no physics at all:
//! they are pure geometric descriptors compared against every live ball's
//! centre each tick by [`crate::lifecycle::pocket_capture_system`].

use crate::config::TableConfig;
use crate::constants::{
    BALL_RADIUS, CORNER_CENTRES, CORNER_RADIUS, CUSHION_THICKNESS, PLAY_MAX_X, PLAY_MAX_Y,
    PLAY_MIN_X, PLAY_MIN_Y, POCKET_CENTRES, POCKET_RADIUS, SPAWN_MAX_X, SPAWN_MAX_Y, SPAWN_MIN_X,
    SPAWN_MIN_Y, TABLE_CENTRE, TABLE_HEIGHT, TABLE_WIDTH,
};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker for the cushion and corner bodies.  Fills the role of the engine's
/// `"boundary"` label: the collision classifier filters on it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Cushion;

// ── Pockets ───────────────────────────────────────────────────────────────────

/// A pocket: a capture zone described by a centre and a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub centre: Vec2,
    pub radius: f32,
}

/// The six pockets of the table, corner pockets first, then the two middles.
pub fn pockets() -> [Pocket; 6] {
    POCKET_CENTRES.map(|centre| Pocket {
        centre,
        radius: POCKET_RADIUS,
    })
}

/// Returns the pocket capturing a ball centred at `position`, if any.
///
/// The boundary is exclusive: a ball at exactly `pocket.radius + BALL_RADIUS`
/// from a pocket centre is still in play.
pub fn capturing_pocket(position: Vec2) -> Option<Pocket> {
    pockets()
        .into_iter()
        .find(|pocket| position.distance(pocket.centre) < pocket.radius + BALL_RADIUS)
}

/// Clamp a point into the spawn rectangle inset by one ball radius per side,
/// so a ball centred there can never start overlapping a cushion.
pub fn clamp_to_baize(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x.clamp(SPAWN_MIN_X + BALL_RADIUS, SPAWN_MAX_X - BALL_RADIUS),
        point.y.clamp(SPAWN_MIN_Y + BALL_RADIUS, SPAWN_MAX_Y - BALL_RADIUS),
    )
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the four cushions and four corner bodies.
///
/// Cushion rectangles sit just outside the interior play surface with their
/// inner faces flush against it.  The rails are shorter than the interior
/// edges they guard (920 against a 960-unit edge, 440 against 480), leaving
/// gaps at the corners and rail middles where the pockets live.
pub fn spawn_table_boundaries(mut commands: Commands, config: Res<TableConfig>) {
    let half_t = CUSHION_THICKNESS / 2.0;

    // Horizontal rails (top / bottom), then vertical rails (left / right).
    let rails = [
        (
            Vec2::new(TABLE_CENTRE.x, PLAY_MIN_Y - half_t),
            Vec2::new(TABLE_WIDTH / 2.0, half_t),
        ),
        (
            Vec2::new(TABLE_CENTRE.x, PLAY_MAX_Y + half_t),
            Vec2::new(TABLE_WIDTH / 2.0, half_t),
        ),
        (
            Vec2::new(PLAY_MIN_X - half_t, TABLE_CENTRE.y),
            Vec2::new(half_t, TABLE_HEIGHT / 2.0),
        ),
        (
            Vec2::new(PLAY_MAX_X + half_t, TABLE_CENTRE.y),
            Vec2::new(half_t, TABLE_HEIGHT / 2.0),
        ),
    ];

    for (centre, half_extents) in rails {
        commands.spawn((
            Cushion,
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            Restitution::coefficient(config.cushion_restitution),
            Friction::coefficient(config.cushion_friction),
            Transform::from_translation(centre.extend(0.0)),
            Visibility::default(),
        ));
    }

    for centre in CORNER_CENTRES {
        commands.spawn((
            Cushion,
            RigidBody::Fixed,
            Collider::ball(CORNER_RADIUS),
            Restitution::coefficient(config.cushion_restitution),
            Transform::from_translation(centre.extend(0.0)),
            Visibility::default(),
        ));
    }

    println!("✓ Table boundaries spawned (4 rails, 4 corners)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_pockets_at_fixed_centres() {
        let pockets = pockets();
        assert_eq!(pockets.len(), 6);
        assert_eq!(pockets[0].centre, Vec2::new(138.0, 178.0));
        assert_eq!(pockets[3].centre, Vec2::new(1062.0, 623.0));
        assert!(pockets.iter().all(|p| p.radius == POCKET_RADIUS));
    }

    #[test]
    fn capture_boundary_is_exclusive() {
        let pocket = pockets()[0];
        let threshold = pocket.radius + BALL_RADIUS;

        // Dead centre: captured.
        assert!(capturing_pocket(pocket.centre).is_some());

        // Just inside the threshold: captured.
        let inside = pocket.centre + Vec2::new(threshold - 0.01, 0.0);
        assert!(capturing_pocket(inside).is_some());

        // Exactly at the threshold (and beyond): still in play.
        let at = pocket.centre + Vec2::new(threshold, 0.0);
        assert!(capturing_pocket(at).is_none());
        let past = pocket.centre + Vec2::new(threshold + 0.01, 0.0);
        assert!(capturing_pocket(past).is_none());
    }

    #[test]
    fn table_centre_is_never_captured() {
        assert!(capturing_pocket(TABLE_CENTRE).is_none());
    }

    #[test]
    fn clamp_pins_points_into_the_inset_rectangle() {
        let clamped = clamp_to_baize(Vec2::new(0.0, 0.0));
        assert_eq!(clamped, Vec2::new(SPAWN_MIN_X + BALL_RADIUS, SPAWN_MIN_Y + BALL_RADIUS));

        let clamped = clamp_to_baize(Vec2::new(5000.0, 5000.0));
        assert_eq!(clamped, Vec2::new(SPAWN_MAX_X - BALL_RADIUS, SPAWN_MAX_Y - BALL_RADIUS));

        // Interior points pass through untouched.
        let inside = Vec2::new(600.0, 400.0);
        assert_eq!(clamp_to_baize(inside), inside);
    }
}
