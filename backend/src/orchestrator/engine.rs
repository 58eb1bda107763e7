//! Auction engine - the round loop
//!
//! Integrates all components:
//! - Market setup (item types, price schedule, buyer deltas)
//! - Round clearing (resale or exclusive engine)
//! - Profit accounting (round deltas → running totals)
//! - Bidding-factor adaptation (feeds the next round)
//!
//! # Round loop
//!
//! ```text
//! For each round r:
//! 1. Draw a fresh permutation of sellers (clearing order)
//! 2. Reorder round-r starting prices and factor columns to match
//! 3. Clear every item (resale or exclusive engine)
//! 4. Account profits from the settlement log
//! 5. Adapt bidding factors (clearing positions → true sellers)
//! 6. Restore true seller order, fold into totals, append histories
//! ```
//!
//! # Determinism
//!
//! All randomness is via one seeded xorshift64* generator. Same seed +
//! same config = bit-identical histories (deterministic replay).
//!
//! # Example
//!
//! ```
//! use auction_simulator_core_rs::{run_simulation, AuctionConfig};
//!
//! let config = AuctionConfig {
//!     num_item_types: 6,
//!     num_sellers: 3,
//!     num_buyers: 10,
//!     num_rounds: 8,
//!     max_starting_price: 100.0,
//!     penalty: 0.05,
//!     pure: false,
//!     strategy: Default::default(),
//!     rng_seed: 42,
//! };
//!
//! let outcome = run_simulation(config).unwrap();
//! assert_eq!(outcome.buyer_profit_history.len(), 9);
//! assert!(outcome.buyer_profit_history[0].iter().all(|&p| p == 0.0));
//! ```

use crate::adaptation::{update_bidding_factors, BiddingStrategy};
use crate::clearing::{clear_round_exclusive, clear_round_with_resale, ClearingError};
use crate::ledger::{ProfitAccumulator, RoundProfits};
use crate::models::bids::BidMatrix;
use crate::models::market::MarketSetup;
use crate::models::settlement::SettlementRecord;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Complete simulation configuration
///
/// # Fields
///
/// * `num_item_types` - M distinct item types
/// * `num_sellers` - K sellers, each auctioning one item per round
/// * `num_buyers` - N buyers; must exceed `num_sellers`
/// * `num_rounds` - R bidding rounds
/// * `max_starting_price` - upper bound of the starting-price draws
/// * `penalty` - repurchase penalty rate (resale mode)
/// * `pure` - true = at most one win per buyer per round
/// * `strategy` - loser factor adaptation rule
/// * `rng_seed` - seed for deterministic replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionConfig {
    pub num_item_types: usize,
    pub num_sellers: usize,
    pub num_buyers: usize,
    pub num_rounds: usize,
    pub max_starting_price: f64,
    pub penalty: f64,
    pub pure: bool,
    #[serde(default)]
    pub strategy: BiddingStrategy,
    pub rng_seed: u64,
}

impl AuctionConfig {
    /// Validate the configuration
    ///
    /// The one hard precondition is `num_buyers > num_sellers`: with K
    /// sellers clearing per round, fewer buyers cannot guarantee every
    /// item a non-empty candidate pool.
    fn validate(&self) -> Result<(), SimulationError> {
        if self.num_item_types == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one item type required".to_string(),
            ));
        }
        if self.num_sellers == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one seller required".to_string(),
            ));
        }
        if self.num_buyers <= self.num_sellers {
            return Err(SimulationError::InvalidConfig(format!(
                "buyers ({}) must outnumber sellers ({})",
                self.num_buyers, self.num_sellers
            )));
        }
        if !self.max_starting_price.is_finite() || self.max_starting_price <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "max starting price must be positive and finite, got {}",
                self.max_starting_price
            )));
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "penalty must be non-negative and finite, got {}",
                self.penalty
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by the engine
///
/// There are no retries anywhere: the simulation is a deterministic batch
/// computation, and any failure aborts the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration rejected before anything runs
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A round degenerated while clearing
    #[error("clearing failed: {0}")]
    Clearing(#[from] ClearingError),

    /// `round()` called after all rounds completed
    #[error("simulation already complete after {rounds} rounds")]
    SimulationComplete { rounds: usize },
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of one round, everything in true seller order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round index, 0-based
    pub round: usize,

    /// Winning buyer per true seller
    pub winners: Vec<usize>,

    /// This round's profit contribution per buyer
    pub buyer_deltas: Vec<f64>,

    /// This round's profit contribution per true seller
    pub seller_deltas: Vec<f64>,

    /// Market price observed at each true seller
    pub market_prices: Vec<f64>,

    /// The raw settlement log, still in clearing order
    pub settlements: Vec<SettlementRecord>,
}

/// Full simulation history, the engine's external product
///
/// Each history has `num_rounds + 1` rows: row 0 is all zeros (pre-round
/// state), row `r` is the state after round `r − 1`. Profit rows are
/// cumulative; market-price rows are per-round observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// `(R+1) × N` cumulative buyer profits
    pub buyer_profit_history: Vec<Vec<f64>>,

    /// `(R+1) × K` cumulative seller profits
    pub seller_profit_history: Vec<Vec<f64>>,

    /// `(R+1) × K` market prices in true seller order
    pub market_price_history: Vec<Vec<f64>>,
}

// ============================================================================
// Engine
// ============================================================================

/// Auction engine owning all simulation state
///
/// Holds the static market setup, the persistent bid matrix, and the one
/// RNG; there is no state anywhere else. Single-threaded and sequential —
/// a run of R rounds over K sellers terminates in O(R × K × N).
#[derive(Debug)]
pub struct AuctionEngine {
    config: AuctionConfig,

    /// Static attributes drawn at construction
    setup: MarketSetup,

    /// Persistent bidding-factor matrix, adapted every round
    factors: BidMatrix,

    /// Deterministic RNG, the only source of randomness
    rng: RngManager,

    rounds_completed: usize,

    totals: ProfitAccumulator,

    buyer_profit_history: Vec<Vec<f64>>,
    seller_profit_history: Vec<Vec<f64>>,
    market_price_history: Vec<Vec<f64>>,
}

impl AuctionEngine {
    /// Validate the config and draw the full market setup
    pub fn new(config: AuctionConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = RngManager::new(config.rng_seed);
        let setup = MarketSetup::generate(
            config.num_item_types,
            config.num_sellers,
            config.num_buyers,
            config.num_rounds,
            config.max_starting_price,
            &mut rng,
        );
        let factors = BidMatrix::init(config.num_buyers, config.num_sellers, &mut rng);

        tracing::info!(
            sellers = config.num_sellers,
            buyers = config.num_buyers,
            rounds = config.num_rounds,
            pure = config.pure,
            "auction engine initialized"
        );

        Ok(Self {
            totals: ProfitAccumulator::new(config.num_buyers, config.num_sellers),
            buyer_profit_history: vec![vec![0.0; config.num_buyers]],
            seller_profit_history: vec![vec![0.0; config.num_sellers]],
            market_price_history: vec![vec![0.0; config.num_sellers]],
            config,
            setup,
            factors,
            rng,
            rounds_completed: 0,
        })
    }

    /// Rounds completed so far
    pub fn current_round(&self) -> usize {
        self.rounds_completed
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_completed >= self.config.num_rounds
    }

    /// The persistent bidding-factor matrix (true seller orientation)
    pub fn bidding_factors(&self) -> &BidMatrix {
        &self.factors
    }

    pub fn setup(&self) -> &MarketSetup {
        &self.setup
    }

    /// Execute one round
    pub fn round(&mut self) -> Result<RoundResult, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::SimulationComplete {
                rounds: self.rounds_completed,
            });
        }

        let round = self.rounds_completed;
        let num_sellers = self.config.num_sellers;

        // 1-2: clearing order, reorder prices and factor columns
        let order = self.rng.permutation(num_sellers);
        let scheduled = self.setup.round_prices(round);
        let prices: Vec<f64> = order.iter().map(|&seller| scheduled[seller]).collect();
        let ordered_factors = self.factors.columns_ordered(&order);

        // 3: clear
        let outcome = if self.config.pure {
            clear_round_exclusive(&prices, &ordered_factors)?
        } else {
            clear_round_with_resale(&prices, &ordered_factors, self.config.penalty)?
        };

        // 4: account profits
        let profits = RoundProfits::settle(
            &outcome.settlements,
            self.config.num_buyers,
            self.config.penalty,
        );

        // 5: adapt factors for the next round
        update_bidding_factors(
            &mut self.factors,
            &outcome,
            &order,
            &self.setup.lower_delta,
            &self.setup.higher_delta,
            self.config.strategy,
            &mut self.rng,
        );

        // 6: restore true seller order and fold into running state
        let mut winners = vec![0usize; num_sellers];
        let mut seller_deltas = vec![0.0; num_sellers];
        let mut market_prices = vec![0.0; num_sellers];
        for (position, &seller) in order.iter().enumerate() {
            winners[seller] = outcome.winners[position];
            seller_deltas[seller] = profits.seller_deltas[position];
            market_prices[seller] = outcome.settlements[position].market_price;
        }

        self.totals.add(&profits.buyer_deltas, &seller_deltas);
        self.buyer_profit_history.push(self.totals.buyers.clone());
        self.seller_profit_history.push(self.totals.sellers.clone());
        self.market_price_history.push(market_prices.clone());
        self.rounds_completed += 1;

        tracing::info!(
            round,
            winners = ?winners,
            "round cleared"
        );

        Ok(RoundResult {
            round,
            winners,
            buyer_deltas: profits.buyer_deltas,
            seller_deltas,
            market_prices,
            settlements: outcome.settlements,
        })
    }

    /// Run every remaining round and return the full history
    pub fn run(mut self) -> Result<SimulationOutcome, SimulationError> {
        while !self.is_finished() {
            self.round()?;
        }
        Ok(SimulationOutcome {
            buyer_profit_history: self.buyer_profit_history,
            seller_profit_history: self.seller_profit_history,
            market_price_history: self.market_price_history,
        })
    }
}

/// Run a complete simulation: the engine's single external entry point
pub fn run_simulation(config: AuctionConfig) -> Result<SimulationOutcome, SimulationError> {
    AuctionEngine::new(config)?.run()
}
