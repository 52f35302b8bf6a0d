//! Bean model
//!
//! A bean is an immutable identity plus an owned movement policy. The policy
//! carries all per-run mutable state (the skill progress counter); the bean
//! itself never changes after construction.
//!
//! Lifecycle: beans are created once per experiment, before the first
//! `reset`. A skill-mode bean draws its skill level at construction and keeps
//! it for life, across any number of `repeat` calls. Only the progress
//! counter is rewound when the bean re-enters circulation.

use uuid::Uuid;

use crate::policy::{
    build_policy, policy_from_snapshot, BeanMode, Direction, MovementPolicy, PolicySnapshot,
    SkillPolicy,
};
use crate::rng::SharedRng;
use serde::{Deserialize, Serialize};

/// A single bean, bound to its movement policy
///
/// # Example
/// ```
/// use bean_machine_core_rs::{Bean, BeanMode, RngManager};
///
/// let rng = RngManager::shared(12345);
/// let bean = Bean::new(10, BeanMode::Skill, &rng);
/// assert!(bean.skill_level().unwrap() < 10);
///
/// let lucky = Bean::new(10, BeanMode::Luck, &rng);
/// assert_eq!(lucky.skill_level(), None);
/// ```
#[derive(Debug)]
pub struct Bean {
    /// Unique bean identifier (stable across repeats and checkpoints)
    id: Uuid,
    /// Movement decision logic; owns all per-run mutable state
    policy: Box<dyn MovementPolicy>,
}

impl Bean {
    /// Create a bean for a `slot_count` board in the given mode
    ///
    /// Skill mode draws the skill level from `rng` here, exactly once; luck
    /// mode records the handle and draws one coin flip per peg instead.
    pub fn new(slot_count: usize, mode: BeanMode, rng: &SharedRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy: build_policy(slot_count, mode, rng),
        }
    }

    /// Create a skill-mode bean with a forced skill level
    ///
    /// Used for deterministic scenarios and tests.
    pub fn with_skill_level(skill_level: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy: Box::new(SkillPolicy::with_level(skill_level)),
        }
    }

    /// Unique identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The fixed skill level, or `None` for a luck-mode bean
    pub fn skill_level(&self) -> Option<u32> {
        self.policy.skill_level()
    }

    /// Decide the direction at the current peg
    ///
    /// Called by the machine once per row the bean passes through.
    pub fn choose_direction(&mut self) -> Direction {
        self.policy.decide_next()
    }

    /// Rewind per-run progress; called when the bean re-enters circulation
    pub fn reset_progress(&mut self) {
        self.policy.reset_progress();
    }

    /// Capture the serializable bean state
    pub fn snapshot(&self) -> BeanSnapshot {
        BeanSnapshot {
            id: self.id,
            policy: self.policy.snapshot(),
        }
    }

    /// Rebuild a bean from a snapshot, binding it to the given shared RNG
    pub fn from_snapshot(snapshot: BeanSnapshot, rng: &SharedRng) -> Self {
        Self {
            id: snapshot.id,
            policy: policy_from_snapshot(snapshot.policy, rng),
        }
    }
}

/// Serializable bean state (for checkpointing)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeanSnapshot {
    pub id: Uuid,
    pub policy: PolicySnapshot,
}
