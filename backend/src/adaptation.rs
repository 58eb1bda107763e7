//! Bidding-factor adaptation
//!
//! After a round clears, every buyer's factor at each auctioned seller is
//! updated in place: the winner's factor shrinks by their personal
//! `lower_delta`, everyone else's grows by their personal `higher_delta` —
//! including buyers who won a different item this round. The updated matrix
//! carries into the next round.

use std::fmt;
use std::str::FromStr;

use crate::models::bids::BidMatrix;
use crate::models::settlement::ClearingOutcome;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecognized strategy tag
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported bidding strategy: {0}")]
pub struct UnsupportedStrategy(pub String);

/// How losers' factors react beyond the standard update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiddingStrategy {
    /// Winner shrinks, losers grow; nothing else
    #[default]
    Standard,

    /// As `Standard`, then every loser whose bid was at or above the
    /// market price is redrawn uniformly between 1.0 and their current
    /// factor, pulling chronic overbidders back toward the market
    OverbidReset,
}

impl BiddingStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            BiddingStrategy::Standard => "standard",
            BiddingStrategy::OverbidReset => "overbid-reset",
        }
    }
}

impl fmt::Display for BiddingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiddingStrategy {
    type Err = UnsupportedStrategy;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "standard" => Ok(BiddingStrategy::Standard),
            "overbid-reset" => Ok(BiddingStrategy::OverbidReset),
            other => Err(UnsupportedStrategy(other.to_string())),
        }
    }
}

/// Apply one round's factor updates in place
///
/// # Arguments
///
/// * `matrix` - the persistent bidding-factor matrix (true orientation)
/// * `outcome` - the round's clearing outcome
/// * `order` - `order[pos]` = true seller cleared at position `pos`
/// * `lower_delta` / `higher_delta` - per-buyer adaptation factors
/// * `strategy` - loser handling
/// * `rng` - the simulation's generator (overbid-reset redraws)
pub fn update_bidding_factors(
    matrix: &mut BidMatrix,
    outcome: &ClearingOutcome,
    order: &[usize],
    lower_delta: &[f64],
    higher_delta: &[f64],
    strategy: BiddingStrategy,
    rng: &mut RngManager,
) {
    for (position, &seller) in order.iter().enumerate() {
        let winner = outcome.winners[position];

        for buyer in 0..matrix.num_buyers() {
            if buyer == winner {
                matrix.scale(buyer, seller, lower_delta[buyer]);
            } else {
                matrix.scale(buyer, seller, higher_delta[buyer]);
            }
        }

        if strategy == BiddingStrategy::OverbidReset {
            // Winners bid below the market price, so overbidders are
            // always losers here.
            for &buyer in &outcome.overbidders[position] {
                let current = matrix.factor(buyer, seller);
                matrix.set(buyer, seller, rng.uniform(1.0, current));
            }
        }
    }
}
