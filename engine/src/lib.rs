//! Bean Machine Core - Rust Engine
//!
//! Galton box ("bean counter") simulator with deterministic execution. Beans
//! drop through a triangular peg board, choosing left or right at every peg,
//! and accumulate in bottom slots approximating a binomial distribution.
//!
//! # Architecture
//!
//! - **core**: Board coordinates and slot statistics helpers
//! - **models**: Domain types (Bean)
//! - **policy**: Per-bean movement decisions (random and skill-based)
//! - **machine**: The steppable board engine, rendering, and checkpointing
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, shared across beans)
//! 2. At most one bean is in flight per board row
//! 3. `remaining + in_flight + slotted` bean counts are conserved by every
//!    operation

// Module declarations
pub mod core;
pub mod machine;
pub mod models;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use crate::core::coords::BoardPos;
pub use machine::{
    checkpoint::{CheckpointError, StateSnapshot},
    engine::BeanMachine,
};
pub use models::bean::{Bean, BeanSnapshot};
pub use policy::{BeanMode, Direction, MovementPolicy, RandomPolicy, SkillPolicy};
pub use rng::{RngManager, SharedRng};
