//! Simulation driver
//!
//! Owns the market setup, bid matrix, and RNG, and runs the round loop.

mod engine;

pub use engine::{
    run_simulation, AuctionConfig, AuctionEngine, RoundResult, SimulationError, SimulationOutcome,
};
