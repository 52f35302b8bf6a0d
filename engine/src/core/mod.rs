//! Shared helpers for the board geometry and slot statistics

pub mod coords;
pub mod stats;
