//! Mode layout generators: the triangular rack, uniform-random scatter, and
//! the colored-ball stations.
//!
//! Each generator creates ball bodies through the factory in [`crate::ball`]
//! and records them in the caller's collection, so by the time the system
//! that triggered the rebuild returns, every spawned entity is tracked.
//! Position math is kept in pure functions so the geometry is testable
//! without a physics world.

use crate::ball::{spawn_ball, BallCollections, BallColor, BallKind};
use crate::config::TableConfig;
use crate::constants::{
    BALL_DIAMETER, BALL_RADIUS, COLORED_STATIONS, RACK_ANCHOR, RED_BALL_COUNT, SPAWN_MAX_X,
    SPAWN_MAX_Y, SPAWN_MIN_X, SPAWN_MIN_Y,
};
use bevy::prelude::*;
use rand::Rng;

// ── Position math ─────────────────────────────────────────────────────────────

/// The 15 rack positions: rows of 1..=5 balls, apex at `anchor`, rows
/// marching rightward at one spacing per row, each row centred on the apex.
pub fn rack_positions(anchor: Vec2, gap: f32) -> Vec<Vec2> {
    let spacing = BALL_DIAMETER + gap;
    let mut positions = Vec::with_capacity(RED_BALL_COUNT);
    for row in 0..5u32 {
        let x = anchor.x + row as f32 * spacing;
        for slot in 0..=row {
            let y = anchor.y + BALL_RADIUS + spacing * (row as f32 / 2.0 - slot as f32);
            positions.push(Vec2::new(x, y));
        }
    }
    positions
}

/// The six colored-ball stations paired with their fixed colors.  The
/// order-to-slot mapping never changes, even when positions are randomised.
pub fn colored_stations() -> [(Vec2, BallColor); 6] {
    let mut stations = [(Vec2::ZERO, BallColor::Yellow); 6];
    for (i, color) in BallColor::ALL.into_iter().enumerate() {
        stations[i] = (COLORED_STATIONS[i], color);
    }
    stations
}

/// Draw a uniform random point from the spawn rectangle inset by one ball
/// radius per side.  The inset guarantees a freshly spawned ball can never
/// overlap a cushion, so no spurious boundary contact fires on the first
/// physics step.
pub fn random_point_on_baize(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(SPAWN_MIN_X + BALL_RADIUS..SPAWN_MAX_X - BALL_RADIUS),
        rng.gen_range(SPAWN_MIN_Y + BALL_RADIUS..SPAWN_MAX_Y - BALL_RADIUS),
    )
}

// ── Generators ────────────────────────────────────────────────────────────────

/// Rack 15 static reds at the triangular starting positions.
pub fn spawn_rack_reds(
    commands: &mut Commands,
    config: &TableConfig,
    collections: &mut BallCollections,
) {
    for position in rack_positions(RACK_ANCHOR, config.rack_gap) {
        let entity = spawn_ball(commands, config, position, BallKind::Red, true);
        collections.rack_reds.push(entity);
    }
}

/// Scatter 15 dynamic reds uniformly over the play surface.
pub fn spawn_random_reds(
    commands: &mut Commands,
    config: &TableConfig,
    collections: &mut BallCollections,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..RED_BALL_COUNT {
        let position = random_point_on_baize(&mut rng);
        let entity = spawn_ball(commands, config, position, BallKind::Red, false);
        collections.random_reds.push(entity);
    }
}

/// Place the six colored balls.
///
/// With `randomize` false they sit static on their canonical stations; with
/// `randomize` true each is scattered dynamic at a random point, but the
/// color order is preserved so yellow is always the first entry and black
/// the last.
pub fn spawn_colored(
    commands: &mut Commands,
    config: &TableConfig,
    collections: &mut BallCollections,
    randomize: bool,
) {
    let mut rng = rand::thread_rng();
    for (station, color) in colored_stations() {
        let position = if randomize {
            random_point_on_baize(&mut rng)
        } else {
            station
        };
        let entity = spawn_ball(
            commands,
            config,
            position,
            BallKind::Colored(color),
            !randomize,
        );
        collections.colored.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RACK_GAP;

    #[test]
    fn rack_has_fifteen_balls_in_triangular_rows() {
        let positions = rack_positions(RACK_ANCHOR, RACK_GAP);
        assert_eq!(positions.len(), RED_BALL_COUNT);

        // Row widths 1..=5, each row one spacing further right.
        let spacing = BALL_DIAMETER + RACK_GAP;
        let mut index = 0;
        for row in 0..5 {
            let row_x = RACK_ANCHOR.x + row as f32 * spacing;
            for _ in 0..=row {
                assert!((positions[index].x - row_x).abs() < 1e-4);
                index += 1;
            }
        }
    }

    #[test]
    fn rack_rows_are_centred_on_the_anchor() {
        let positions = rack_positions(RACK_ANCHOR, RACK_GAP);
        let spacing = BALL_DIAMETER + RACK_GAP;

        // Apex ball sits half a diameter below the anchor line.
        assert!((positions[0].y - (RACK_ANCHOR.y + BALL_RADIUS)).abs() < 1e-4);

        // Last row (5 balls, indices 10..15): outermost balls are two
        // spacings either side of the row centre.
        let last_row = &positions[10..15];
        let first = last_row.first().unwrap().y;
        let last = last_row.last().unwrap().y;
        assert!((first - last - 4.0 * spacing).abs() < 1e-4);

        // Neighbouring balls within a row are exactly one spacing apart.
        for pair in last_row.windows(2) {
            assert!((pair[0].y - pair[1].y - spacing).abs() < 1e-4);
        }
    }

    #[test]
    fn colored_stations_keep_canonical_order() {
        let stations = colored_stations();
        assert_eq!(stations.len(), 6);
        assert_eq!(stations[0], (Vec2::new(370.0, 475.0), BallColor::Yellow));
        assert_eq!(stations[3], (Vec2::new(600.0, 400.0), BallColor::Blue));
        assert_eq!(stations[5], (Vec2::new(945.0, 400.0), BallColor::Black));
    }

    #[test]
    fn random_points_never_leave_the_inset_rectangle() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let p = random_point_on_baize(&mut rng);
            assert!(p.x >= SPAWN_MIN_X + BALL_RADIUS && p.x <= SPAWN_MAX_X - BALL_RADIUS);
            assert!(p.y >= SPAWN_MIN_Y + BALL_RADIUS && p.y <= SPAWN_MAX_Y - BALL_RADIUS);
        }
    }
}
