//! Exclusive clearing (pure auction)
//!
//! Each buyer may win at most one item per round. A buyer who has won drops
//! out of every later item completely: their bid joins neither the market
//! price mean nor the candidate pool. There is no bid adjustment step —
//! with no repurchases, no reserve needs pricing in.

use crate::models::settlement::ClearingOutcome;

use super::{clear_position, ClearingError};

/// Clear one round with at most one win per buyer
///
/// # Arguments
///
/// * `prices` - starting prices, already permuted into clearing order
/// * `factors` - N × K bidding factors, columns permuted to match
///
/// # Errors
///
/// [`ClearingError::NoBidsBelowMarket`] if an item sees every eligible bid
/// at or above its market price; [`ClearingError::NoEligibleBuyers`] if no
/// buyers remain (impossible when buyers outnumber sellers, still guarded).
pub fn clear_round_exclusive(
    prices: &[f64],
    factors: &[Vec<f64>],
) -> Result<ClearingOutcome, ClearingError> {
    let mut outcome = ClearingOutcome::with_capacity(prices.len());
    let mut has_won = vec![false; factors.len()];

    for (position, &starting_price) in prices.iter().enumerate() {
        let pool: Vec<(usize, f64)> = factors
            .iter()
            .enumerate()
            .filter(|&(buyer, _)| !has_won[buyer])
            .map(|(buyer, row)| (buyer, row[position] * starting_price))
            .collect();

        let (record, overbidders) = clear_position(&pool, starting_price, position)?;
        has_won[record.winner] = true;
        outcome.push(record, overbidders);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_winner_excluded_from_later_items() {
        // Item 0: bids 10, 15, 12 → winner 2 pays 10.
        // Item 1: buyer 2 is out; eligible bids 20, 24 → mean 22, only 20
        // is below it, so buyer 0 wins and pays the starting price.
        let prices = [10.0, 20.0];
        let factors = vec![vec![1.0, 1.0], vec![1.5, 1.2], vec![1.2, 1.8]];

        let outcome = clear_round_exclusive(&prices, &factors).unwrap();

        assert_eq!(outcome.winners, vec![2, 0]);

        let second = outcome.settlements[1];
        assert!((second.market_price - 22.0).abs() < 1e-12);
        assert_eq!(second.price_paid, 20.0);
        assert_eq!(outcome.overbidders[1], vec![1]);
    }

    #[test]
    fn test_winners_are_distinct() {
        let prices = [30.0, 10.0, 20.0];
        let factors = vec![
            vec![1.1, 1.3, 1.2],
            vec![1.6, 1.1, 1.5],
            vec![1.3, 1.7, 1.1],
            vec![1.8, 1.4, 1.6],
            vec![1.2, 1.2, 1.3],
        ];

        let outcome = clear_round_exclusive(&prices, &factors).unwrap();

        let mut seen = outcome.winners.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), outcome.winners.len(), "a buyer won twice");
    }

    #[test]
    fn test_last_lone_bidder_cannot_clear() {
        // With two buyers the second item's single eligible bid equals the
        // market price, which is the named degenerate-round error.
        let prices = [10.0, 10.0];
        let factors = vec![vec![1.0, 1.0], vec![2.0, 2.0]];

        let err = clear_round_exclusive(&prices, &factors).unwrap_err();

        assert_eq!(err, ClearingError::NoBidsBelowMarket { position: 1 });
    }
}
