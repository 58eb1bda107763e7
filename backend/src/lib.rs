//! Auction Simulator Core - Rust Engine
//!
//! Iterated double-auction market simulator with deterministic execution.
//! Buyers adapt bid multipliers round over round; sellers clear one item
//! each per round in a randomized order.
//!
//! # Architecture
//!
//! - **models**: Domain types (MarketSetup, BidMatrix, settlement records)
//! - **clearing**: Round clearing engines (resale-allowed and exclusive)
//! - **ledger**: Profit accounting with repurchase penalties
//! - **adaptation**: Bidding-factor strategies
//! - **orchestrator**: Main round loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (one seeded RNG per simulation)
//! 2. The bid matrix is owned by the engine and never mutated mid-round;
//!    rounds communicate through an append-only settlement log
//! 3. Absent repurchases, seller profits sum to exactly the prices paid

// Module declarations
pub mod adaptation;
pub mod clearing;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use adaptation::{update_bidding_factors, BiddingStrategy, UnsupportedStrategy};
pub use clearing::{clear_round_exclusive, clear_round_with_resale, ClearingError};
pub use ledger::{ProfitAccumulator, RoundProfits};
pub use models::{
    bids::BidMatrix,
    market::MarketSetup,
    settlement::{ClearingOutcome, SettlementRecord},
};
pub use orchestrator::{
    run_simulation, AuctionConfig, AuctionEngine, RoundResult, SimulationError, SimulationOutcome,
};
pub use rng::RngManager;
