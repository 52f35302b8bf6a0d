//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the machine MUST go through this module.
//!
//! Beans share a single generator per experiment (see [`SharedRng`]) so that a
//! fixed seed and a fixed call order reproduce the exact same fall pattern.

mod xorshift;

pub use xorshift::{RngManager, SharedRng};
