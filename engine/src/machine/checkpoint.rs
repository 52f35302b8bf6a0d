//! Checkpoint - Save/Load Machine State
//!
//! Enables serialization and deserialization of the complete machine state
//! (board, slots, pool, RNG) for pause/resume of an experiment.
//!
//! # Critical Invariants
//!
//! - **Determinism**: capture → restore → continue produces the same slot
//!   distribution as the uninterrupted run
//! - **Conservation**: the snapshot holds exactly the circulating beans
//! - **Config Matching**: a snapshot only restores onto a matching board
//!   (guarded by a SHA-256 config hash)
//!
//! Snapshots are in-memory JSON strings; this module never touches the
//! filesystem.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use thiserror::Error;

use super::engine::{BeanMachine, InFlight};
use crate::models::bean::{Bean, BeanSnapshot};
use crate::rng::{RngManager, SharedRng};

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("config hash mismatch: snapshot {snapshot_hash} does not match board {expected_hash}")]
    ConfigMismatch {
        snapshot_hash: String,
        expected_hash: String,
    },

    #[error("snapshot position ({x}, {y}) is off the board")]
    InvalidPosition { x: usize, y: usize },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Complete machine state snapshot
///
/// Captures all state necessary to resume an experiment from an arbitrary
/// point: every bean (with policy state), its location class (in-flight,
/// slotted, or pooled), and the RNG state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Number of slots of the captured machine
    pub slot_count: usize,

    /// In-flight beans with their board positions, top row first
    pub in_flight: Vec<InFlightSnapshot>,

    /// Slot contents, oldest arrival first within each slot
    pub slots: Vec<Vec<BeanSnapshot>>,

    /// Pool of beans not yet inserted, in consumption order
    pub remaining: Vec<BeanSnapshot>,

    /// RNG state at capture time (CRITICAL for determinism)
    pub rng_state: u64,

    /// SHA-256 hash of the board config (for validation on restore)
    pub config_hash: String,
}

/// One in-flight bean with its position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InFlightSnapshot {
    pub y: usize,
    pub x: usize,
    pub bean: BeanSnapshot,
}

impl StateSnapshot {
    /// Capture the current machine and RNG state
    pub fn capture(machine: &BeanMachine, rng: &SharedRng) -> Self {
        let in_flight = machine
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(y, row)| {
                row.as_ref().map(|f| InFlightSnapshot {
                    y,
                    x: f.x,
                    bean: f.bean.snapshot(),
                })
            })
            .collect();

        let slots = machine
            .slots()
            .iter()
            .map(|slot| slot.iter().map(Bean::snapshot).collect())
            .collect();

        let remaining = machine.remaining().iter().map(Bean::snapshot).collect();

        Self {
            slot_count: machine.slot_count(),
            in_flight,
            slots,
            remaining,
            rng_state: rng.borrow().get_state(),
            config_hash: compute_config_hash(machine.slot_count()),
        }
    }

    /// Rebuild the machine and the shared RNG from this snapshot
    ///
    /// Random-mode beans are rebound to the restored RNG so the draw
    /// sequence continues exactly where the capture left off.
    pub fn restore(&self) -> Result<(BeanMachine, SharedRng), CheckpointError> {
        let expected_hash = compute_config_hash(self.slot_count);
        if self.config_hash != expected_hash {
            return Err(CheckpointError::ConfigMismatch {
                snapshot_hash: self.config_hash.clone(),
                expected_hash,
            });
        }

        let rng = RngManager::shared(self.rng_state);

        let mut rows: Vec<Option<InFlight>> = (0..self.slot_count).map(|_| None).collect();
        for snap in &self.in_flight {
            if snap.x > snap.y || snap.y >= self.slot_count {
                return Err(CheckpointError::InvalidPosition {
                    x: snap.x,
                    y: snap.y,
                });
            }
            rows[snap.y] = Some(InFlight {
                x: snap.x,
                bean: Bean::from_snapshot(snap.bean, &rng),
            });
        }

        let slots: Vec<VecDeque<Bean>> = self
            .slots
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|snap| Bean::from_snapshot(*snap, &rng))
                    .collect()
            })
            .collect();

        let remaining: VecDeque<Bean> = self
            .remaining
            .iter()
            .map(|snap| Bean::from_snapshot(*snap, &rng))
            .collect();

        let machine = BeanMachine::from_parts(self.slot_count, rows, slots, remaining);
        Ok((machine, rng))
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// SHA-256 hash of the board configuration
fn compute_config_hash(slot_count: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("slot_count:{}", slot_count));
    format!("{:x}", hasher.finalize())
}
