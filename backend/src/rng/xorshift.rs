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
//! - Debugging (reproduce exact auction runs)
//! - Testing (golden-output regression on a fixed seed)
//! - Research (validate results across implementations)

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use auction_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(42);
/// let item_type = rng.range(0, 6); // [0, 6)
/// let price = rng.uniform_rounded(0.0, 100.0); // two decimals
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is coerced to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
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

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) using the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform draw in [lo, hi)
    ///
    /// Also well-defined when hi < lo: the draw then lands in (hi, lo],
    /// which the overbid-reset strategy relies on when a bidding factor
    /// has drifted below 1.0.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform draw in [lo, hi), rounded to 2 decimal places
    ///
    /// Starting prices are quoted in cents; the rounding keeps bid
    /// comparisons stable and must match across runs exactly.
    pub fn uniform_rounded(&mut self, lo: f64, hi: f64) -> f64 {
        (self.uniform(lo, hi) * 100.0).round() / 100.0
    }

    /// Random permutation of `0..n` (Fisher–Yates)
    ///
    /// Used to draw each round's clearing order.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = self.range(0, (i + 1) as i64) as usize;
            order.swap(i, j);
        }
        order
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
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
        rng.range(100, 50);
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
    fn test_uniform_respects_bounds() {
        let mut rng = RngManager::new(777);

        for _ in 0..1000 {
            let val = rng.uniform(1.0, 1.9);
            assert!(val >= 1.0 && val < 1.9, "uniform draw {} out of bounds", val);
        }
    }

    #[test]
    fn test_uniform_reversed_bounds() {
        let mut rng = RngManager::new(777);

        // hi < lo draws land between the two bounds
        for _ in 0..1000 {
            let val = rng.uniform(1.0, 0.4);
            assert!(val > 0.4 && val <= 1.0, "reversed draw {} out of bounds", val);
        }
    }

    #[test]
    fn test_uniform_rounded_two_decimals() {
        let mut rng = RngManager::new(999);

        for _ in 0..1000 {
            let val = rng.uniform_rounded(0.0, 100.0);
            let cents = val * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-9,
                "{} is not rounded to 2 decimals",
                val
            );
        }
    }

    #[test]
    fn test_permutation_is_a_permutation() {
        let mut rng = RngManager::new(4242);

        for n in [1usize, 2, 3, 7, 20] {
            let mut perm = rng.permutation(n);
            perm.sort_unstable();
            let expected: Vec<usize> = (0..n).collect();
            assert_eq!(perm, expected, "permutation({}) lost or duplicated indices", n);
        }
    }

    #[test]
    fn test_permutation_deterministic() {
        let mut rng1 = RngManager::new(31337);
        let mut rng2 = RngManager::new(31337);

        assert_eq!(rng1.permutation(10), rng2.permutation(10));
    }
}
