//! Random (luck mode) movement policy
//!
//! # Behavior
//!
//! - Every peg decision is an independent uniform coin flip
//! - Each decision consumes exactly one draw from the shared RNG
//! - No internal counter; `reset_progress` is a no-op
//!
//! Over many beans the slot histogram approaches the binomial distribution
//! the Galton box was built to demonstrate.

use super::{Direction, MovementPolicy, PolicySnapshot};
use crate::rng::SharedRng;

/// Luck-mode policy: 50/50 left/right at every peg
///
/// # Example
///
/// ```
/// use bean_machine_core_rs::policy::{MovementPolicy, RandomPolicy};
/// use bean_machine_core_rs::RngManager;
///
/// let rng = RngManager::shared(12345);
/// let mut policy = RandomPolicy::new(rng);
/// let direction = policy.decide_next(); // one RNG draw
/// ```
#[derive(Debug)]
pub struct RandomPolicy {
    rng: SharedRng,
}

impl RandomPolicy {
    /// Create a luck-mode policy drawing from the shared experiment RNG
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

impl MovementPolicy for RandomPolicy {
    fn decide_next(&mut self) -> Direction {
        if self.rng.borrow_mut().coin_flip() {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    fn reset_progress(&mut self) {
        // No per-run state to reset; the RNG sequence keeps advancing
    }

    fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot::Random
    }

    fn skill_level(&self) -> Option<u32> {
        None
    }
}
