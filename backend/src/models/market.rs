//! Market setup
//!
//! Static attributes drawn once at simulation start:
//! - each seller's item type (fixed across all rounds)
//! - each seller's starting price per round (the full schedule is drawn
//!   up front, one row per round)
//! - each buyer's bid-decrease and bid-increase deltas
//!
//! # Critical Invariants
//!
//! 1. All draws go through the engine's single [`RngManager`] in a fixed
//!    order: item types → price schedule → lower deltas → higher deltas.
//!    Reordering the draws changes every downstream result.
//! 2. Starting prices are rounded to 2 decimals at draw time; nothing
//!    downstream re-rounds.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Bid-decrease factor range, one draw per buyer
pub const LOWER_DELTA_RANGE: (f64, f64) = (0.7, 1.0);

/// Bid-increase factor range, one draw per buyer
pub const HIGHER_DELTA_RANGE: (f64, f64) = (1.0, 1.3);

/// Static market attributes for one simulation run
///
/// # Example
///
/// ```
/// use auction_simulator_core_rs::{MarketSetup, RngManager};
///
/// let mut rng = RngManager::new(42);
/// let setup = MarketSetup::generate(6, 3, 10, 8, 100.0, &mut rng);
/// assert_eq!(setup.item_types.len(), 3);
/// assert_eq!(setup.price_schedule.len(), 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSetup {
    /// Item type auctioned by each seller, in `[0, num_item_types)`
    pub item_types: Vec<usize>,

    /// Starting price per (round, seller), 2-decimal values in
    /// `[0, max_starting_price]`
    pub price_schedule: Vec<Vec<f64>>,

    /// Per-buyer factor applied to the winner's bidding factor (≤ 1)
    pub lower_delta: Vec<f64>,

    /// Per-buyer factor applied to losers' bidding factors (≥ 1)
    pub higher_delta: Vec<f64>,
}

impl MarketSetup {
    /// Draw the full market setup for a run
    ///
    /// # Arguments
    ///
    /// * `num_item_types` - M distinct item types
    /// * `num_sellers` - K sellers, one item each
    /// * `num_buyers` - N buyers
    /// * `num_rounds` - R rounds (price schedule rows)
    /// * `max_starting_price` - upper bound of the starting-price draw
    /// * `rng` - the simulation's generator
    pub fn generate(
        num_item_types: usize,
        num_sellers: usize,
        num_buyers: usize,
        num_rounds: usize,
        max_starting_price: f64,
        rng: &mut RngManager,
    ) -> Self {
        let item_types = assign_items_to_sellers(num_sellers, num_item_types, rng);
        let price_schedule =
            assign_prices_to_items(num_sellers, num_rounds, max_starting_price, rng);

        let lower_delta = (0..num_buyers)
            .map(|_| rng.uniform(LOWER_DELTA_RANGE.0, LOWER_DELTA_RANGE.1))
            .collect();
        let higher_delta = (0..num_buyers)
            .map(|_| rng.uniform(HIGHER_DELTA_RANGE.0, HIGHER_DELTA_RANGE.1))
            .collect();

        Self {
            item_types,
            price_schedule,
            lower_delta,
            higher_delta,
        }
    }

    /// Starting prices for one round, indexed by true seller
    pub fn round_prices(&self, round: usize) -> &[f64] {
        &self.price_schedule[round]
    }
}

/// Assign each seller an independent uniform-random item type in `[0, M)`
///
/// Multiple sellers may auction the same type; the assignment is fixed for
/// the whole run.
pub fn assign_items_to_sellers(
    num_sellers: usize,
    num_item_types: usize,
    rng: &mut RngManager,
) -> Vec<usize> {
    (0..num_sellers)
        .map(|_| rng.range(0, num_item_types as i64) as usize)
        .collect()
}

/// Draw the per-round starting price for every seller
///
/// Each (round, seller) cell is an independent uniform draw in
/// `[0, max_price]`, rounded to 2 decimals (the rounding makes the upper
/// bound reachable).
pub fn assign_prices_to_items(
    num_sellers: usize,
    num_rounds: usize,
    max_price: f64,
    rng: &mut RngManager,
) -> Vec<Vec<f64>> {
    (0..num_rounds)
        .map(|_| {
            (0..num_sellers)
                .map(|_| rng.uniform_rounded(0.0, max_price))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_types_within_bounds() {
        let mut rng = RngManager::new(42);
        let items = assign_items_to_sellers(50, 6, &mut rng);

        assert_eq!(items.len(), 50);
        assert!(items.iter().all(|&m| m < 6));
    }

    #[test]
    fn test_price_schedule_shape_and_rounding() {
        let mut rng = RngManager::new(42);
        let prices = assign_prices_to_items(3, 8, 100.0, &mut rng);

        assert_eq!(prices.len(), 8);
        for row in &prices {
            assert_eq!(row.len(), 3);
            for &p in row {
                assert!((0.0..=100.0).contains(&p));
                let cents = p * 100.0;
                assert!((cents - cents.round()).abs() < 1e-9, "{} not 2-decimal", p);
            }
        }
    }

    #[test]
    fn test_deltas_within_ranges() {
        let mut rng = RngManager::new(7);
        let setup = MarketSetup::generate(6, 3, 10, 8, 100.0, &mut rng);

        assert_eq!(setup.lower_delta.len(), 10);
        assert_eq!(setup.higher_delta.len(), 10);
        assert!(setup.lower_delta.iter().all(|&d| (0.7..1.0).contains(&d)));
        assert!(setup.higher_delta.iter().all(|&d| (1.0..1.3).contains(&d)));
    }

    #[test]
    fn test_generate_deterministic() {
        let mut rng1 = RngManager::new(42);
        let mut rng2 = RngManager::new(42);

        let a = MarketSetup::generate(6, 3, 10, 8, 100.0, &mut rng1);
        let b = MarketSetup::generate(6, 3, 10, 8, 100.0, &mut rng2);

        assert_eq!(a.item_types, b.item_types);
        assert_eq!(a.price_schedule, b.price_schedule);
        assert_eq!(a.lower_delta, b.lower_delta);
        assert_eq!(a.higher_delta, b.higher_delta);
    }
}
