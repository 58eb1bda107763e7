//! Profit accounting
//!
//! Turns a round's settlement log into per-buyer and per-seller profit
//! deltas, then folds deltas into running totals.
//!
//! # Accounting rule
//!
//! Walking the log in clearing order:
//! - the seller at each position earns what the winner paid;
//! - a buyer's first win earns them `market_price − price_paid`;
//! - a repeat win (resale mode) means the buyer hands back the previously
//!   won item: the buyer is charged a fee of `prior_price_paid × penalty`
//!   on top of the normal margin, and the prior position's seller has the
//!   original sale revenue charged back while keeping the fee.
//!
//! # Critical Invariants
//!
//! 1. With no repeat wins, `Σ seller deltas == Σ prices paid` and each
//!    winner's delta is exactly `market_price − price_paid`.
//! 2. "First win" is an explicit per-buyer flag, never inferred from a
//!    zero profit accumulator — a legitimately zero-profit win counts.
//! 3. Seller deltas are indexed by clearing position; the engine alone
//!    restores true seller identity.

use crate::models::settlement::SettlementRecord;
use serde::{Deserialize, Serialize};

/// Additive profit contributions of a single round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundProfits {
    /// Per-buyer delta, indexed by buyer
    pub buyer_deltas: Vec<f64>,

    /// Per-seller delta, indexed by clearing position
    pub seller_deltas: Vec<f64>,
}

impl RoundProfits {
    /// Account one round's settlement log
    ///
    /// # Arguments
    ///
    /// * `settlements` - the round's log, in clearing order
    /// * `num_buyers` - N (sizes the buyer delta vector)
    /// * `penalty` - repurchase penalty rate
    pub fn settle(settlements: &[SettlementRecord], num_buyers: usize, penalty: f64) -> Self {
        let mut buyer_deltas = vec![0.0; num_buyers];
        let mut seller_deltas = vec![0.0; settlements.len()];
        let mut has_won = vec![false; num_buyers];

        for (position, record) in settlements.iter().enumerate() {
            seller_deltas[position] += record.price_paid;

            if !has_won[record.winner] {
                buyer_deltas[record.winner] += record.market_price - record.price_paid;
                has_won[record.winner] = true;
                continue;
            }

            // Repeat win: the buyer returns the most recently won item.
            let (prior_position, prior) = settlements[..position]
                .iter()
                .enumerate()
                .rev()
                .find(|(_, r)| r.winner == record.winner)
                .expect("has_won flag set without a prior settlement");

            let fee = prior.price_paid * penalty;
            buyer_deltas[record.winner] += record.market_price - record.price_paid - fee;
            seller_deltas[prior_position] += fee - prior.price_paid;
        }

        Self {
            buyer_deltas,
            seller_deltas,
        }
    }
}

/// Running profit totals across rounds
///
/// The engine owns one of these per simulation and folds every round's
/// [`RoundProfits`] into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitAccumulator {
    /// Cumulative profit per buyer
    pub buyers: Vec<f64>,

    /// Cumulative profit per seller (true seller order)
    pub sellers: Vec<f64>,
}

impl ProfitAccumulator {
    pub fn new(num_buyers: usize, num_sellers: usize) -> Self {
        Self {
            buyers: vec![0.0; num_buyers],
            sellers: vec![0.0; num_sellers],
        }
    }

    /// Fold in one round's deltas (seller deltas already in true order)
    pub fn add(&mut self, buyer_deltas: &[f64], seller_deltas: &[f64]) {
        for (total, delta) in self.buyers.iter_mut().zip(buyer_deltas) {
            *total += delta;
        }
        for (total, delta) in self.sellers.iter_mut().zip(seller_deltas) {
            *total += delta;
        }
    }
}
