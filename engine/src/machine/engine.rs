//! Board engine
//!
//! Owns the full simulation state and the stepping/statistics/filtering
//! operations. The board is triangular: row `y` has `y + 1` peg positions,
//! and the bottom row feeds `slot_count` accumulation slots.
//!
//! # Step loop
//!
//! ```text
//! For each advance_step():
//! 1. Flush the bottom-row bean (if any) into its slot
//! 2. Move every in-flight bean one row down, bottom-most rows first,
//!    consulting its movement policy for the left/right choice
//! 3. Insert the next pooled bean at the apex (0, 0), if any remain
//! ```
//!
//! Rows are processed in descending index order so a bean moved into row
//! `y + 1` is never re-processed within the same call; no bean ever falls
//! two rows in one step.
//!
//! # Invariants
//!
//! 1. At most one bean occupies any row at a time
//! 2. `remaining + in_flight + Σ|slot_i|` is constant across operations
//! 3. Repeated `advance_step` calls reach the terminal state in at most
//!    `slot_count` steps after the last insertion
//!
//! # Example
//!
//! ```
//! use bean_machine_core_rs::{Bean, BeanMachine, BeanMode, RngManager};
//!
//! let rng = RngManager::shared(12345);
//! let beans = (0..20).map(|_| Bean::new(4, BeanMode::Luck, &rng)).collect();
//!
//! let mut machine = BeanMachine::new(4);
//! machine.reset(beans);
//! while machine.advance_step() {}
//!
//! assert_eq!(machine.count_beans_in_slots(), 20);
//! ```

use std::collections::VecDeque;

use tracing::debug;

use crate::core::coords::BoardPos;
use crate::core::stats::weighted_index_mean;
use crate::models::bean::Bean;
use crate::policy::Direction;

/// A bean in flight, pinned to its column within one board row
#[derive(Debug)]
pub(crate) struct InFlight {
    /// Column within the row, `0 <= x <= y`
    pub(crate) x: usize,
    pub(crate) bean: Bean,
}

/// The Galton box state machine
///
/// Holds the in-flight beans (one optional bean per row), the FIFO pool of
/// beans waiting to drop, and the per-slot accumulation queues. All
/// operations are synchronous; `advance_step` performs one bounded unit of
/// work and returns.
#[derive(Debug)]
pub struct BeanMachine {
    slot_count: usize,
    /// In-flight beans, indexed by row; at most one bean per row
    rows: Vec<Option<InFlight>>,
    /// Accumulation slots; arrivals append at the back, oldest at the front
    slots: Vec<VecDeque<Bean>>,
    /// Beans not yet inserted, consumed oldest-first
    remaining: VecDeque<Bean>,
}

impl BeanMachine {
    /// Create a machine with `slot_count` bottom slots
    ///
    /// # Panics
    /// Panics if `slot_count` is zero.
    pub fn new(slot_count: usize) -> Self {
        assert!(slot_count > 0, "slot_count must be positive");
        Self {
            slot_count,
            rows: (0..slot_count).map(|_| None).collect(),
            slots: (0..slot_count).map(|_| VecDeque::new()).collect(),
            remaining: VecDeque::new(),
        }
    }

    /// Number of slots the machine was initialized with
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Number of beans still waiting to be inserted
    pub fn remaining_bean_count(&self) -> usize {
        self.remaining.len()
    }

    /// Number of beans currently on the board
    pub fn in_flight_bean_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_some()).count()
    }

    /// Hard reset: load the machine with the given beans
    ///
    /// Clears every slot and the whole board, queues `beans` in the given
    /// order, and drops the first bean at the apex. After the call the
    /// in-flight count is 1 iff `beans` was non-empty.
    pub fn reset(&mut self, beans: Vec<Bean>) {
        for slot in &mut self.slots {
            slot.clear();
        }
        for row in &mut self.rows {
            *row = None;
        }
        self.remaining = VecDeque::from(beans);

        debug!(
            slot_count = self.slot_count,
            beans = self.remaining.len(),
            "machine reset"
        );

        self.insert_next_bean();
    }

    /// Advance the machine one step
    ///
    /// All in-flight beans fall one row; the bottom-row bean (if any) lands
    /// in its slot first, and a new bean enters at the apex if the pool is
    /// non-empty. Returns whether any state changed; `false` means the
    /// machine had already reached its terminal state when called.
    pub fn advance_step(&mut self) -> bool {
        if self.remaining.is_empty() && self.rows.iter().all(Option::is_none) {
            return false;
        }

        // 1. Bottom-row bean lands in the slot matching its column
        let bottom = self.slot_count - 1;
        if let Some(landed) = self.rows[bottom].take() {
            debug!(slot = landed.x, bean = %landed.bean.id(), "bean landed");
            self.slots[landed.x].push_back(landed.bean);
        }

        // 2. Remaining rows fall one step, bottom-most first so no bean is
        //    processed twice in one call
        for y in (0..bottom).rev() {
            if let Some(mut in_flight) = self.rows[y].take() {
                if in_flight.bean.choose_direction() == Direction::Right {
                    in_flight.x += 1;
                }
                self.rows[y + 1] = Some(in_flight);
            }
        }

        // 3. Next pooled bean enters at the apex
        self.insert_next_bean();

        true
    }

    /// Column of the in-flight bean in row `y`, or `None` if the row is empty
    ///
    /// # Panics
    /// Panics if `y >= slot_count` (programming error, fail fast).
    pub fn in_flight_x(&self, y: usize) -> Option<usize> {
        self.rows[y].as_ref().map(|in_flight| in_flight.x)
    }

    /// Positions of all in-flight beans, top row first
    pub fn in_flight_positions(&self) -> Vec<BoardPos> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.as_ref().map(|in_flight| BoardPos::new(in_flight.x, y)))
            .collect()
    }

    /// Number of beans accumulated in slot `i`
    ///
    /// # Panics
    /// Panics if `i >= slot_count` (programming error, fail fast).
    pub fn slot_bean_count(&self, i: usize) -> usize {
        self.slots[i].len()
    }

    /// Total number of beans across all slots
    pub fn count_beans_in_slots(&self) -> usize {
        self.slots.iter().map(VecDeque::len).sum()
    }

    /// Weighted mean of the slot index over all slotted beans
    ///
    /// Returns `0.0` when no beans have landed yet.
    pub fn average_slot_bean_count(&self) -> f64 {
        let counts: Vec<usize> = self.slots.iter().map(VecDeque::len).collect();
        weighted_index_mean(&counts)
    }

    /// Remove the numerically-lower half of the slotted distribution
    ///
    /// Removes `⌊total/2⌋` beans scanning from slot 0 upward, oldest-first
    /// within a slot; the higher-index slots survive. For an odd total the
    /// larger half remains.
    pub fn upper_half(&mut self) {
        let to_remove = self.count_beans_in_slots() / 2;
        let mut removed = 0;
        let mut idx = 0;

        while removed < to_remove && idx < self.slot_count {
            if self.slots[idx].pop_front().is_some() {
                removed += 1;
            } else {
                idx += 1;
            }
        }
        debug!(removed, "upper_half filter applied");
    }

    /// Remove the numerically-upper half of the slotted distribution
    ///
    /// Mirror of [`BeanMachine::upper_half`]: removes `⌊total/2⌋` beans
    /// scanning from slot `slot_count - 1` downward, oldest-first within a
    /// slot; the lower-index slots survive.
    pub fn lower_half(&mut self) {
        let to_remove = self.count_beans_in_slots() / 2;
        let mut removed = 0;
        let mut idx = self.slot_count;

        while removed < to_remove && idx > 0 {
            if self.slots[idx - 1].pop_front().is_some() {
                removed += 1;
            } else {
                idx -= 1;
            }
        }
        debug!(removed, "lower_half filter applied");
    }

    /// Repeat the experiment with the beans already in the machine
    ///
    /// Scoops every in-flight bean (top row first) and every slotted bean
    /// (slot order, oldest first) back into the pool, rewinding each bean's
    /// movement progress, then drops the first collected bean at the apex.
    /// Unlike [`BeanMachine::reset`] no beans are discarded.
    pub fn repeat(&mut self) {
        for y in 0..self.slot_count {
            if let Some(mut in_flight) = self.rows[y].take() {
                in_flight.bean.reset_progress();
                self.remaining.push_back(in_flight.bean);
            }
        }
        for slot in &mut self.slots {
            while let Some(mut bean) = slot.pop_front() {
                bean.reset_progress();
                self.remaining.push_back(bean);
            }
        }

        debug!(beans = self.remaining.len(), "experiment repeated");

        self.insert_next_bean();
    }

    /// Pop the pool head onto the apex, if any bean remains
    fn insert_next_bean(&mut self) {
        if let Some(bean) = self.remaining.pop_front() {
            self.rows[0] = Some(InFlight { x: 0, bean });
        }
    }

    // Internal views for checkpointing
    pub(crate) fn rows(&self) -> &[Option<InFlight>] {
        &self.rows
    }

    pub(crate) fn slots(&self) -> &[VecDeque<Bean>] {
        &self.slots
    }

    pub(crate) fn remaining(&self) -> &VecDeque<Bean> {
        &self.remaining
    }

    /// Rebuild a machine from checkpointed parts
    pub(crate) fn from_parts(
        slot_count: usize,
        rows: Vec<Option<InFlight>>,
        slots: Vec<VecDeque<Bean>>,
        remaining: VecDeque<Bean>,
    ) -> Self {
        Self {
            slot_count,
            rows,
            slots,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_beans(levels: &[u32]) -> Vec<Bean> {
        levels.iter().map(|&k| Bean::with_skill_level(k)).collect()
    }

    #[test]
    #[should_panic(expected = "slot_count must be positive")]
    fn test_zero_slot_count_panics() {
        BeanMachine::new(0);
    }

    #[test]
    fn test_new_machine_is_empty() {
        let machine = BeanMachine::new(4);
        assert_eq!(machine.remaining_bean_count(), 0);
        assert_eq!(machine.in_flight_bean_count(), 0);
        assert_eq!(machine.count_beans_in_slots(), 0);
        for y in 0..4 {
            assert_eq!(machine.in_flight_x(y), None);
        }
    }

    #[test]
    fn test_reset_places_first_bean_at_apex() {
        let mut machine = BeanMachine::new(3);
        machine.reset(skill_beans(&[0, 1, 2]));

        assert_eq!(machine.in_flight_x(0), Some(0));
        assert_eq!(machine.remaining_bean_count(), 2);
        assert_eq!(machine.in_flight_bean_count(), 1);
    }

    #[test]
    fn test_reset_with_no_beans() {
        let mut machine = BeanMachine::new(3);
        machine.reset(Vec::new());

        assert_eq!(machine.in_flight_x(0), None);
        assert_eq!(machine.remaining_bean_count(), 0);
        assert!(!machine.advance_step());
    }

    #[test]
    fn test_reset_clears_previous_run() {
        let mut machine = BeanMachine::new(2);
        machine.reset(skill_beans(&[1, 0]));
        while machine.advance_step() {}
        assert_eq!(machine.count_beans_in_slots(), 2);

        machine.reset(skill_beans(&[0]));
        assert_eq!(machine.count_beans_in_slots(), 0);
        assert_eq!(machine.remaining_bean_count(), 0);
        assert_eq!(machine.in_flight_x(0), Some(0));
    }

    #[test]
    fn test_bean_falls_one_row_per_step() {
        let mut machine = BeanMachine::new(4);
        machine.reset(skill_beans(&[0]));

        assert_eq!(machine.in_flight_x(0), Some(0));
        machine.advance_step();
        assert_eq!(machine.in_flight_x(0), None);
        assert_eq!(machine.in_flight_x(1), Some(0));
        machine.advance_step();
        assert_eq!(machine.in_flight_x(2), Some(0));
    }

    #[test]
    fn test_single_slot_machine_lands_immediately() {
        let mut machine = BeanMachine::new(1);
        machine.reset(skill_beans(&[0]));

        assert!(machine.advance_step());
        assert_eq!(machine.slot_bean_count(0), 1);
        assert!(!machine.advance_step());
    }

    #[test]
    #[should_panic]
    fn test_in_flight_x_out_of_range_panics() {
        let machine = BeanMachine::new(2);
        machine.in_flight_x(2);
    }

    #[test]
    fn test_slot_arrival_order_is_fifo() {
        let mut machine = BeanMachine::new(2);
        let beans = skill_beans(&[1, 1, 1]);
        let ids: Vec<_> = beans.iter().map(Bean::id).collect();
        machine.reset(beans);
        while machine.advance_step() {}

        let landed: Vec<_> = machine.slots()[1].iter().map(Bean::id).collect();
        assert_eq!(landed, ids, "oldest arrivals must sit at the slot front");
    }
}
