//! Bidding-factor matrix
//!
//! One multiplier per (buyer, seller) pair. A buyer's bid at a seller is
//! `factor × starting_price`. The matrix is created once at simulation
//! start, mutated in place by adaptation after every round, and never
//! recreated.
//!
//! # Critical Invariants
//!
//! 1. Entries start in `[1.0, 1.9)` and stay strictly positive: adaptation
//!    multiplies by per-buyer deltas in `[0.7, 1.3]` or redraws toward 1.0.
//! 2. The matrix is never mutated while a round is clearing. Rounds work on
//!    the clearing-order copy from [`BidMatrix::columns_ordered`]; only
//!    adaptation writes back, between rounds.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Initial bidding-factor range
pub const INITIAL_FACTOR_RANGE: (f64, f64) = (1.0, 1.9);

/// N × K bidding-factor matrix, row per buyer, column per seller
///
/// # Example
///
/// ```
/// use auction_simulator_core_rs::{BidMatrix, RngManager};
///
/// let mut rng = RngManager::new(42);
/// let matrix = BidMatrix::init(10, 3, &mut rng);
/// assert_eq!(matrix.num_buyers(), 10);
/// assert!(matrix.factor(0, 0) >= 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidMatrix {
    /// `factors[buyer][seller]`
    factors: Vec<Vec<f64>>,
}

impl BidMatrix {
    /// Draw the initial matrix, uniform in `[1.0, 1.9)` per entry
    pub fn init(num_buyers: usize, num_sellers: usize, rng: &mut RngManager) -> Self {
        let factors = (0..num_buyers)
            .map(|_| {
                (0..num_sellers)
                    .map(|_| rng.uniform(INITIAL_FACTOR_RANGE.0, INITIAL_FACTOR_RANGE.1))
                    .collect()
            })
            .collect();
        Self { factors }
    }

    /// Build a matrix from explicit factors (tests, replay)
    ///
    /// # Panics
    ///
    /// Panics if rows have unequal lengths.
    pub fn from_rows(factors: Vec<Vec<f64>>) -> Self {
        if let Some(first) = factors.first() {
            let width = first.len();
            assert!(
                factors.iter().all(|row| row.len() == width),
                "factor rows must have equal length"
            );
        }
        Self { factors }
    }

    pub fn num_buyers(&self) -> usize {
        self.factors.len()
    }

    pub fn num_sellers(&self) -> usize {
        self.factors.first().map_or(0, |row| row.len())
    }

    /// Current factor for (buyer, seller)
    pub fn factor(&self, buyer: usize, seller: usize) -> f64 {
        self.factors[buyer][seller]
    }

    /// Multiply the (buyer, seller) factor in place
    pub fn scale(&mut self, buyer: usize, seller: usize, by: f64) {
        self.factors[buyer][seller] *= by;
    }

    /// Overwrite the (buyer, seller) factor
    pub fn set(&mut self, buyer: usize, seller: usize, value: f64) {
        self.factors[buyer][seller] = value;
    }

    /// Copy of the matrix with columns rearranged into clearing order
    ///
    /// `order[pos]` is the true seller index cleared at position `pos`.
    /// The copy is what a round computes bids from; the matrix itself
    /// stays in true seller orientation.
    pub fn columns_ordered(&self, order: &[usize]) -> Vec<Vec<f64>> {
        self.factors
            .iter()
            .map(|row| order.iter().map(|&s| row[s]).collect())
            .collect()
    }

}
