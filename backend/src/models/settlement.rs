//! Settlement records
//!
//! What one round of clearing produced, in clearing order. The log is
//! append-only: the resale bid adjustment and the repurchase-penalty lookup
//! both scan it instead of mutating bids mid-round.

use serde::{Deserialize, Serialize};

/// One seller-item cleared within a round
///
/// Position in the round's log is the clearing position, not the seller's
/// true index; the engine alone owns that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Winning buyer index
    pub winner: usize,

    /// Mean of the (adjusted) eligible bids at this position
    pub market_price: f64,

    /// What the winner actually pays: the second-highest bid below the
    /// market price, or the starting price when only one bid qualified
    pub price_paid: f64,
}

/// Output of clearing one full round, everything in clearing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearingOutcome {
    /// Winning buyer per clearing position
    pub winners: Vec<usize>,

    /// Append-only settlement log
    pub settlements: Vec<SettlementRecord>,

    /// Buyers whose bid was at or above the market price, per position
    /// (input to the overbid-reset strategy)
    pub overbidders: Vec<Vec<usize>>,
}

impl ClearingOutcome {
    pub fn with_capacity(num_sellers: usize) -> Self {
        Self {
            winners: Vec::with_capacity(num_sellers),
            settlements: Vec::with_capacity(num_sellers),
            overbidders: Vec::with_capacity(num_sellers),
        }
    }

    /// Market prices in clearing order
    pub fn market_prices(&self) -> Vec<f64> {
        self.settlements.iter().map(|s| s.market_price).collect()
    }

    /// Record one cleared position
    pub fn push(&mut self, record: SettlementRecord, overbidders: Vec<usize>) {
        self.winners.push(record.winner);
        self.settlements.push(record);
        self.overbidders.push(overbidders);
    }
}
