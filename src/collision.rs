//! Collision classification and response.
//!
//! Rapier resolves the contacts themselves; this module consumes the
//! collision-start events it emits and layers the table's gameplay response
//! on top:
//!
//! 1. **Cue ball × cushion** — diagnostic log only; the contact itself is
//!    already resolved by the physics step.
//! 2. **Ball × ball** — the event is the broad-phase signal; the pair is
//!    re-confirmed by centre distance, then the second ball receives an
//!    impulse along the centre line scaled by the pair's relative speed.
//! 3. **Cue ball × object ball** — a racked (static) ball struck by the cue
//!    ball is promoted to dynamic and nudged.  Rapier never moves a `Fixed`
//!    body no matter the incoming momentum, so without the promotion the
//!    rack would absorb the break shot entirely.
//!
//! The rules are not exclusive: a single pair may match several (the cue
//! ball carries the plain [`Ball`] label too).  Events naming despawned or
//! unlabeled entities fall through every rule and are dropped silently.

use crate::ball::{Ball, CueBall};
use crate::config::TableConfig;
use crate::constants::BALL_DIAMETER;
use crate::table::Cushion;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Narrow confirmation of a broad-phase ball pair: genuine overlap means the
/// centres are at most one diameter apart.
pub fn centres_overlap(a: Vec2, b: Vec2) -> bool {
    a.distance(b) <= BALL_DIAMETER
}

/// Impulse applied to the second ball of a confirmed pair: along the
/// normalised centre line from the first ball to the second, scaled by the
/// relative speed of the pair and the damping coefficient.  Coincident
/// centres yield a zero impulse rather than a NaN direction.
pub fn collision_impulse(p1: Vec2, p2: Vec2, v1: Vec2, v2: Vec2, damping: f32) -> Vec2 {
    let direction = (p2 - p1).normalize_or_zero();
    let relative_speed = (v1 - v2).length();
    direction * relative_speed * damping
}

// ── System ────────────────────────────────────────────────────────────────────

/// Classify each collision-start pair reported this tick and apply the
/// matching responses.  Pairs are independent; they are processed in
/// delivery order with no cross-pair state.
pub fn collision_response_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_balls: Query<(&Transform, &Velocity, &RigidBody), With<Ball>>,
    q_cue: Query<(), With<CueBall>>,
    q_cushions: Query<(), With<Cushion>>,
    mut q_impulses: Query<&mut ExternalImpulse, With<Ball>>,
    config: Res<TableConfig>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        // Rule 1: cue ball against a cushion — log only.
        let cue_cushion = (q_cue.contains(e1) && q_cushions.contains(e2))
            || (q_cue.contains(e2) && q_cushions.contains(e1));
        if cue_cushion {
            info!("cue ball struck a cushion");
        }

        // Rule 2: ball against ball — confirm the overlap, then push the
        // second ball of the pair along the centre line.
        if let (Ok((t1, v1, _)), Ok((t2, v2, _))) = (q_balls.get(e1), q_balls.get(e2)) {
            let p1 = t1.translation.truncate();
            let p2 = t2.translation.truncate();
            if centres_overlap(p1, p2) {
                let impulse =
                    collision_impulse(p1, p2, v1.linvel, v2.linvel, config.collision_force_damping);
                if let Ok(mut external) = q_impulses.get_mut(e2) {
                    external.impulse += impulse;
                }
            }
        }

        // Rule 3: cue ball against another ball — promote a static target to
        // dynamic so the strike can move it.
        let other = if q_cue.contains(e1) && q_balls.contains(e2) && !q_cue.contains(e2) {
            Some((e1, e2))
        } else if q_cue.contains(e2) && q_balls.contains(e1) && !q_cue.contains(e1) {
            Some((e2, e1))
        } else {
            None
        };
        if let Some((cue, target)) = other {
            let (Ok((cue_t, _, _)), Ok((target_t, _, target_body))) =
                (q_balls.get(cue), q_balls.get(target))
            else {
                continue;
            };
            let overlap = centres_overlap(
                cue_t.translation.truncate(),
                target_t.translation.truncate(),
            );
            if overlap && matches!(target_body, RigidBody::Fixed) {
                commands.entity(target).insert(RigidBody::Dynamic);
                if let Ok(mut external) = q_impulses.get_mut(target) {
                    external.impulse += Vec2::splat(config.nudge_impulse);
                }
                info!("object ball promoted to dynamic by cue contact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLLISION_FORCE_DAMPING;

    #[test]
    fn overlap_confirmation_uses_one_diameter() {
        let origin = Vec2::ZERO;
        assert!(centres_overlap(origin, Vec2::new(BALL_DIAMETER, 0.0)));
        assert!(centres_overlap(origin, Vec2::new(BALL_DIAMETER - 0.5, 0.0)));
        assert!(!centres_overlap(origin, Vec2::new(BALL_DIAMETER + 0.5, 0.0)));
    }

    #[test]
    fn impulse_points_from_first_to_second_ball() {
        let impulse = collision_impulse(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::ZERO,
            COLLISION_FORCE_DAMPING,
        );
        assert!(impulse.x > 0.0);
        assert_eq!(impulse.y, 0.0);
    }

    #[test]
    fn impulse_magnitude_scales_with_relative_speed() {
        let slow = collision_impulse(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::ZERO,
            COLLISION_FORCE_DAMPING,
        );
        let fast = collision_impulse(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::ZERO,
            COLLISION_FORCE_DAMPING,
        );
        assert!((slow.length() - 10.0 * COLLISION_FORCE_DAMPING).abs() < 1e-4);
        assert!((fast.length() - 40.0 * COLLISION_FORCE_DAMPING).abs() < 1e-4);
    }

    #[test]
    fn equal_velocities_produce_no_impulse() {
        let shared = Vec2::new(25.0, -5.0);
        let impulse = collision_impulse(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            shared,
            shared,
            COLLISION_FORCE_DAMPING,
        );
        assert_eq!(impulse, Vec2::ZERO);
    }

    #[test]
    fn coincident_centres_produce_no_impulse() {
        let impulse = collision_impulse(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::new(30.0, 0.0),
            Vec2::ZERO,
            COLLISION_FORCE_DAMPING,
        );
        assert_eq!(impulse, Vec2::ZERO);
    }
}
