//! Simulation-specific error types.
//!
//! The table core has no user-visible error surface: classification
//! mismatches are silently absorbed and placement bounds are enforced by
//! construction.  What remains is a small set of programming-defect signals
//! (invariant violations) and constant-validation helpers used by tests and
//! the config loader.

use std::fmt;

/// Top-level error enum for the table simulation.
#[derive(Debug, PartialEq)]
pub enum TableError {
    /// An attempt was made to place a cue ball while one is already on the
    /// table.  At most one cue ball may exist at any time; callers treat
    /// this as a defect signal, log it, and keep the existing ball.
    DuplicateCueBall,

    /// A ball position was produced outside the inset spawn rectangle.
    /// Prevented by construction (clamped random bounds); surfacing this
    /// means the bounds math regressed.
    PlacementOutOfBounds {
        /// The offending coordinate.
        x: f32,
        y: f32,
    },

    /// A physics constant is outside its safe operating range.
    /// Returned by validation helpers; not triggered at runtime by default.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateCueBall => {
                write!(f, "a cue ball is already on the table")
            }
            TableError::PlacementOutOfBounds { x, y } => {
                write!(f, "ball placement ({}, {}) is outside the spawn rectangle", x, y)
            }
            TableError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Convenience alias: a `Result` using `TableError` as the error type.
pub type TableResult<T> = Result<T, TableError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if a restitution coefficient leaves the physically
/// meaningful range.  Values above 1.0 add energy on every bounce.
pub fn validate_restitution(name: &'static str, value: f32) -> TableResult<()> {
    if !(0.0..=1.0).contains(&value) {
        Err(TableError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the collision damping scale is outside its tested
/// range.  Above ~0.15 confirmed contacts visibly gain energy.
pub fn validate_collision_damping(value: f32) -> TableResult<()> {
    if value <= 0.0 || value > 0.15 {
        Err(TableError::UnsafeConstant {
            name: "COLLISION_FORCE_DAMPING",
            value,
            safe_range: "(0.0, 0.15]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the strike scale is not strictly positive.
pub fn validate_strike_scale(value: f32) -> TableResult<()> {
    if value <= 0.0 {
        Err(TableError::UnsafeConstant {
            name: "CUE_STRIKE_SCALE",
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BALL_RESTITUTION, COLLISION_FORCE_DAMPING, CUSHION_RESTITUTION};

    #[test]
    fn shipped_constants_pass_validation() {
        assert!(validate_restitution("BALL_RESTITUTION", BALL_RESTITUTION).is_ok());
        assert!(validate_restitution("CUSHION_RESTITUTION", CUSHION_RESTITUTION).is_ok());
        assert!(validate_collision_damping(COLLISION_FORCE_DAMPING).is_ok());
        assert!(validate_strike_scale(crate::constants::CUE_STRIKE_SCALE).is_ok());
    }

    #[test]
    fn out_of_range_constants_are_rejected() {
        assert!(validate_restitution("r", 1.2).is_err());
        assert!(validate_restitution("r", -0.1).is_err());
        assert!(validate_collision_damping(0.5).is_err());
        assert!(validate_strike_scale(0.0).is_err());
    }
}
