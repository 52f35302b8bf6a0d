//! Movement Policy Module
//!
//! This module defines the per-bean decision interface consulted at every peg.
//!
//! # Overview
//!
//! Each time an in-flight bean reaches a peg, the machine asks the bean's
//! policy whether it falls left or right. Two policies exist:
//!
//! 1. **RandomPolicy** (luck mode): an independent uniform coin flip per peg.
//!    The slot distribution approaches a binomial.
//! 2. **SkillPolicy** (skill mode): a fixed skill level drawn once at
//!    construction; the bean goes right exactly `skill_level` times, then left
//!    for the rest of its fall. A skill-`k` bean always lands in slot `k`.
//!
//! # Policy Interface
//!
//! All policies implement the [`MovementPolicy`] trait:
//! ```rust
//! use bean_machine_core_rs::policy::{Direction, MovementPolicy, PolicySnapshot};
//!
//! #[derive(Debug)]
//! struct AlwaysLeft;
//!
//! impl MovementPolicy for AlwaysLeft {
//!     fn decide_next(&mut self) -> Direction {
//!         Direction::Left
//!     }
//!
//!     fn reset_progress(&mut self) {}
//!
//!     fn snapshot(&self) -> PolicySnapshot {
//!         PolicySnapshot::Random
//!     }
//!
//!     fn skill_level(&self) -> Option<u32> {
//!         None
//!     }
//! }
//! ```
//!
//! The machine only ever calls the trait operations; no downcasting to a
//! concrete policy is needed anywhere.

use serde::{Deserialize, Serialize};

use crate::rng::SharedRng;

mod random;
mod skill;

pub use random::RandomPolicy;
pub use skill::SkillPolicy;

/// Direction a bean takes at a peg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Selects which movement policy a bean is constructed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeanMode {
    /// Luck mode: 50/50 coin flip at every peg
    Luck,
    /// Skill mode: fixed skill level drawn once, deterministic path
    Skill,
}

/// Serializable state of a movement policy (for checkpointing)
///
/// Random policies carry no state of their own (the shared RNG state is
/// captured separately); skill policies carry the drawn level and the
/// progress counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicySnapshot {
    Random,
    Skill { skill_level: u32, steps_taken: u32 },
}

/// Per-bean movement decision logic
///
/// Consulted once per row the bean passes through. Implementations must be
/// deterministic given their construction inputs and the shared RNG sequence.
pub trait MovementPolicy: std::fmt::Debug {
    /// Decide the direction taken at the current peg
    ///
    /// Called exactly once per row; random policies consume one draw per
    /// call, skill policies advance their internal progress counter.
    fn decide_next(&mut self) -> Direction;

    /// Reset per-run progress; called when the bean re-enters circulation
    fn reset_progress(&mut self);

    /// Capture the serializable policy state
    fn snapshot(&self) -> PolicySnapshot;

    /// The fixed skill level, or `None` for luck-mode policies
    fn skill_level(&self) -> Option<u32>;
}

/// Construct the policy for a freshly created bean
///
/// Skill mode draws the skill level from `rng` immediately (exactly once);
/// luck mode keeps a handle to `rng` and draws at each peg instead.
pub fn build_policy(
    slot_count: usize,
    mode: BeanMode,
    rng: &SharedRng,
) -> Box<dyn MovementPolicy> {
    match mode {
        BeanMode::Luck => Box::new(RandomPolicy::new(rng.clone())),
        BeanMode::Skill => Box::new(SkillPolicy::new(slot_count, rng)),
    }
}

/// Rebuild a policy from its checkpointed state
///
/// Random policies are rebound to the supplied shared RNG; skill policies
/// restore their level and progress counter verbatim.
pub fn policy_from_snapshot(snapshot: PolicySnapshot, rng: &SharedRng) -> Box<dyn MovementPolicy> {
    match snapshot {
        PolicySnapshot::Random => Box::new(RandomPolicy::new(rng.clone())),
        PolicySnapshot::Skill {
            skill_level,
            steps_taken,
        } => Box::new(SkillPolicy::restore(skill_level, steps_taken)),
    }
}
