//! Baize — a snooker-style table simulation.
//!
//! A Rapier-backed rigid-body world holding balls and cushions, a pocket
//! detection and lifecycle layer, a cue aim-and-strike controller, and a
//! mode-driven layout generator with three layout policies.

pub mod ball;
pub mod collision;
pub mod config;
pub mod constants;
pub mod cue;
pub mod error;
pub mod graphics;
pub mod layout;
pub mod lifecycle;
pub mod mode;
pub mod rendering;
pub mod simulation;
pub mod table;
pub mod testing;
