//! Bean machine - the board simulation engine
//!
//! - `engine`: the steppable board state machine
//! - `render`: textual board rendering (debugging aid)
//! - `checkpoint`: JSON snapshot/restore of machine + RNG state

pub mod checkpoint;
pub mod engine;
pub mod render;

pub use checkpoint::{CheckpointError, StateSnapshot};
pub use engine::BeanMachine;
