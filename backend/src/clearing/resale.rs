//! Resale-allowed clearing (impure auction)
//!
//! Buyers stay in the bidding for every item, even after winning. Before an
//! item's market price is computed, each prior winner's bid is floored at
//!
//! ```text
//! starting_price + (past_market_price − past_price_paid) + past_price_paid × penalty
//! ```
//!
//! once per prior win, in settlement-log order. A buyer who already locked
//! in surplus elsewhere can thereby raise their bid by that surplus plus a
//! penalty-scaled reserve. Winning again later triggers the repurchase
//! accounting in the profit ledger.

use crate::models::settlement::ClearingOutcome;

use super::{clear_position, ClearingError};

/// Clear one round with resale allowed
///
/// # Arguments
///
/// * `prices` - starting prices, already permuted into clearing order
/// * `factors` - N × K bidding factors, columns permuted to match
/// * `penalty` - repurchase penalty rate (≥ 0)
///
/// # Errors
///
/// [`ClearingError::NoBidsBelowMarket`] if some item sees every bid at or
/// above its market price. Callers abort the round; silent continuation is
/// not an option.
pub fn clear_round_with_resale(
    prices: &[f64],
    factors: &[Vec<f64>],
    penalty: f64,
) -> Result<ClearingOutcome, ClearingError> {
    let mut outcome = ClearingOutcome::with_capacity(prices.len());

    for (position, &starting_price) in prices.iter().enumerate() {
        let mut bids: Vec<f64> = factors
            .iter()
            .map(|row| row[position] * starting_price)
            .collect();

        // Floor prior winners' bids, one adjustment per past win.
        for record in &outcome.settlements {
            let floor = starting_price
                + (record.market_price - record.price_paid)
                + record.price_paid * penalty;
            if floor > bids[record.winner] {
                bids[record.winner] = floor;
            }
        }

        let pool: Vec<(usize, f64)> = bids.iter().copied().enumerate().collect();
        let (record, overbidders) = clear_position(&pool, starting_price, position)?;
        outcome.push(record, overbidders);
    }

    Ok(outcome)
}
