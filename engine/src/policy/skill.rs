//! Skill-based (deterministic) movement policy
//!
//! # Behavior
//!
//! Each skill-mode bean draws a skill level once, at construction, from a
//! normal distribution matched to the board:
//!
//! ```text
//! mean  = slot_count * 0.5
//! stdev = sqrt(slot_count * 0.5 * (1 - 0.5))
//! level = round(gaussian * stdev + mean), clamped into [0, slot_count - 1]
//! ```
//!
//! During the fall the bean goes right exactly `skill_level` times, then left
//! for every remaining peg. The landing slot therefore equals the skill level,
//! on every run, regardless of the RNG sequence after construction.
//!
//! The level is never redrawn: repeating the experiment reproduces the same
//! per-slot counts for skill-mode beans.

use super::{Direction, MovementPolicy, PolicySnapshot};
use crate::rng::SharedRng;

/// Skill-mode policy: right `skill_level` times, then left the rest of the way
///
/// # Example
///
/// ```
/// use bean_machine_core_rs::policy::{Direction, MovementPolicy, SkillPolicy};
///
/// let mut policy = SkillPolicy::with_level(2);
/// assert_eq!(policy.decide_next(), Direction::Right);
/// assert_eq!(policy.decide_next(), Direction::Right);
/// assert_eq!(policy.decide_next(), Direction::Left);
/// assert_eq!(policy.decide_next(), Direction::Left);
/// ```
#[derive(Debug)]
pub struct SkillPolicy {
    /// Number of right-decisions this bean makes before switching to left
    skill_level: u32,
    /// Progress counter, starts at 1; stays put once the level is exhausted
    steps_taken: u32,
}

impl SkillPolicy {
    /// Create a skill policy, drawing the level from the shared RNG
    ///
    /// Consumes exactly one Gaussian sample (two raw draws). The drawn level
    /// is clamped into `[0, slot_count - 1]` so it always names a real slot.
    pub fn new(slot_count: usize, rng: &SharedRng) -> Self {
        let mean = slot_count as f64 * 0.5;
        let stdev = (slot_count as f64 * 0.5 * (1.0 - 0.5)).sqrt();
        let draw = rng.borrow_mut().next_gaussian() * stdev + mean;
        let skill_level = (draw.round() as i64).clamp(0, slot_count as i64 - 1) as u32;

        Self {
            skill_level,
            steps_taken: 1,
        }
    }

    /// Create a skill policy with a forced level
    ///
    /// Bypasses the Gaussian draw. Used for deterministic scenarios and
    /// tests; available in all builds like other test-support constructors.
    pub fn with_level(skill_level: u32) -> Self {
        Self {
            skill_level,
            steps_taken: 1,
        }
    }

    /// Rebuild a policy from checkpointed level and progress
    pub(crate) fn restore(skill_level: u32, steps_taken: u32) -> Self {
        Self {
            skill_level,
            steps_taken,
        }
    }
}

impl MovementPolicy for SkillPolicy {
    fn decide_next(&mut self) -> Direction {
        if self.steps_taken <= self.skill_level {
            self.steps_taken += 1;
            Direction::Right
        } else {
            Direction::Left
        }
    }

    fn reset_progress(&mut self) {
        self.steps_taken = 1;
    }

    fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot::Skill {
            skill_level: self.skill_level,
            steps_taken: self.steps_taken,
        }
    }

    fn skill_level(&self) -> Option<u32> {
        Some(self.skill_level)
    }
}
