//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce an exact bean fall pattern)
//! - Testing (verify behavior)
//! - Repeating experiments with known outcomes
//!
//! # Sharing
//!
//! All beans of one experiment draw from a single generator, handed out as a
//! [`SharedRng`]. The machine runs strictly single-threaded, so an
//! `Rc<RefCell<_>>` handle is sufficient; the draw sequence is order-sensitive
//! and must not be split across independent generators.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Shared handle to the experiment-wide random source.
///
/// Every bean holds a clone of this handle; luck-mode beans draw one coin flip
/// per peg, skill-mode beans draw one Gaussian sample at construction.
pub type SharedRng = Rc<RefCell<RngManager>>;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use bean_machine_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let flip = rng.coin_flip();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create a seeded generator wrapped in the shared handle beans expect
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::RngManager;
    ///
    /// let rng = RngManager::shared(12345);
    /// let flip = rng.borrow_mut().coin_flip();
    /// ```
    pub fn shared(seed: u64) -> SharedRng {
        Rc::new(RefCell::new(Self::new(seed)))
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Draw a uniform coin flip: `true` with probability 1/2
    ///
    /// Consumes exactly one draw from the sequence. This is the peg decision
    /// primitive for luck-mode beans.
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let go_right = rng.coin_flip();
    /// ```
    pub fn coin_flip(&mut self) -> bool {
        self.range(0, 2) == 1
    }

    /// Get current RNG state (for checkpointing/replay)
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Useful for sampling from probability distributions.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) by dividing by 2^64
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Draw a standard-normal sample (mean 0, stdev 1)
    ///
    /// Box-Muller transform over two uniform draws; consumes exactly two
    /// values from the sequence. Used once per skill-mode bean to draw its
    /// skill level.
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let g = rng.next_gaussian();
    /// assert!(g.is_finite());
    /// ```
    pub fn next_gaussian(&mut self) -> f64 {
        // Shift the first uniform into (0, 1] so ln() stays finite
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(100, 50); // min > max should panic
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                val >= 0.0 && val < 1.0,
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_next_f64_deterministic() {
        let mut rng1 = RngManager::new(99999);
        let mut rng2 = RngManager::new(99999);

        for _ in 0..100 {
            let val1 = rng1.next_f64();
            let val2 = rng2.next_f64();
            assert_eq!(val1, val2, "next_f64() not deterministic");
        }
    }

    #[test]
    fn test_coin_flip_consumes_one_draw() {
        let mut flipped = RngManager::new(777);
        let mut raw = RngManager::new(777);

        for _ in 0..100 {
            let flip = flipped.coin_flip();
            let expected = raw.next() % 2 == 1;
            assert_eq!(flip, expected, "coin_flip() should map one draw to one flip");
        }
        assert_eq!(flipped.get_state(), raw.get_state());
    }

    #[test]
    fn test_gaussian_finite() {
        let mut rng = RngManager::new(4242);
        for _ in 0..1000 {
            let g = rng.next_gaussian();
            assert!(g.is_finite(), "next_gaussian() produced non-finite {}", g);
        }
    }

    #[test]
    fn test_shared_handle_sees_one_sequence() {
        let shared = RngManager::shared(555);
        let handle_a = shared.clone();
        let handle_b = shared.clone();

        let mut reference = RngManager::new(555);
        let expected_first = reference.next();
        let expected_second = reference.next();

        assert_eq!(handle_a.borrow_mut().next(), expected_first);
        assert_eq!(handle_b.borrow_mut().next(), expected_second);
    }
}
