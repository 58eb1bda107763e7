//! Round clearing engines
//!
//! One round auctions every seller's item sequentially, in a clearing order
//! the engine draws fresh each round. Two engines share the per-item rule
//! and differ in who may bid:
//!
//! - [`resale`]: buyers may win repeatedly; a buyer's later bids are floored
//!   by their accrued surplus plus a penalty-scaled reserve (impure auction).
//! - [`pure`]: a buyer who has won drops out of every later item entirely
//!   (pure auction).
//!
//! # Per-item rule
//!
//! 1. Market price = arithmetic mean of the participating bids.
//! 2. Candidate pool = bids strictly below the market price. An empty pool
//!    is a named error, never an index panic.
//! 3. Winner = highest pool bid, ties to the lowest buyer index.
//! 4. Price paid = second-highest pool bid (a duplicate of the maximum
//!    counts); a singleton pool pays the seller's starting price.
//!
//! # Critical Invariants
//!
//! - `price_paid ≤ market_price` for every settlement: the price paid is
//!   always drawn from bids strictly below the mean, or the starting price,
//!   which only applies when every other bid sits at or above the mean.
//! - The bid matrix is never touched: engines work on the clearing-order
//!   copy and communicate only through the append-only settlement log.

mod pure;
mod resale;

pub use pure::clear_round_exclusive;
pub use resale::clear_round_with_resale;

use crate::models::settlement::SettlementRecord;
use thiserror::Error;

/// Errors raised while clearing a round
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClearingError {
    /// Every participating bid was at or above the market price
    #[error("no bids below the market price at clearing position {position}")]
    NoBidsBelowMarket { position: usize },

    /// Pure mode: every buyer has already won an item this round
    #[error("no eligible buyers remain at clearing position {position}")]
    NoEligibleBuyers { position: usize },
}

/// Clear one item given its participating `(buyer, bid)` pairs
///
/// `bids` must be in increasing buyer-index order so the tie-break falls to
/// the lowest index naturally. Returns the settlement record and the buyers
/// who bid at or above the market price (overbidders).
pub(crate) fn clear_position(
    bids: &[(usize, f64)],
    starting_price: f64,
    position: usize,
) -> Result<(SettlementRecord, Vec<usize>), ClearingError> {
    if bids.is_empty() {
        return Err(ClearingError::NoEligibleBuyers { position });
    }

    let market_price = bids.iter().map(|&(_, bid)| bid).sum::<f64>() / bids.len() as f64;

    // Explicit max-tracking scan: no sort, no float-equality lookup.
    // `best` is the winning (buyer, bid); `second` the second-highest pool
    // bid counting duplicates of the maximum.
    let mut best: Option<(usize, f64)> = None;
    let mut second: Option<f64> = None;
    let mut overbidders = Vec::new();

    for &(buyer, bid) in bids {
        if bid >= market_price {
            overbidders.push(buyer);
            continue;
        }
        match best {
            None => best = Some((buyer, bid)),
            Some((_, best_bid)) if bid > best_bid => {
                second = Some(best_bid);
                best = Some((buyer, bid));
            }
            Some(_) => {
                if second.map_or(true, |s| bid > s) {
                    second = Some(bid);
                }
            }
        }
    }

    let (winner, _winning_bid) = best.ok_or(ClearingError::NoBidsBelowMarket { position })?;
    let price_paid = second.unwrap_or(starting_price);

    let record = SettlementRecord {
        winner,
        market_price,
        price_paid,
    };
    tracing::debug!(
        position,
        winner,
        market_price,
        price_paid,
        "cleared item"
    );
    Ok((record, overbidders))
}
