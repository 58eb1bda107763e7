//! Auction simulator CLI
//!
//! Thin wrapper over the engine: parse parameters, run one simulation,
//! report final/mean/median profit figures (or the raw histories as JSON).

use auction_simulator_core_rs::{run_simulation, AuctionConfig, BiddingStrategy, SimulationOutcome};
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "auction-sim")]
#[command(about = "Run an iterated double-auction market simulation")]
struct Cli {
    /// Number of distinct item types (M)
    num_item_types: usize,

    /// Number of buyers (N); must exceed the number of sellers
    num_buyers: usize,

    /// Number of sellers (K)
    num_sellers: usize,

    /// Number of bidding rounds (R)
    num_rounds: usize,

    /// Maximum starting price
    max_starting_price: f64,

    /// Repurchase penalty rate
    penalty: f64,

    /// Pure auction: at most one win per buyer per round
    #[arg(value_parser = clap::builder::BoolishValueParser::new())]
    pure: bool,

    /// RNG seed (fixed seed = reproducible run)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Bidding strategy: standard | overbid-reset
    #[arg(long, default_value = "standard")]
    strategy: BiddingStrategy,

    /// Emit the full histories as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AuctionConfig {
        num_item_types: cli.num_item_types,
        num_sellers: cli.num_sellers,
        num_buyers: cli.num_buyers,
        num_rounds: cli.num_rounds,
        max_starting_price: cli.max_starting_price,
        penalty: cli.penalty,
        pure: cli.pure,
        strategy: cli.strategy,
        rng_seed: cli.seed,
    };

    let outcome = match run_simulation(config) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(%err, "simulation failed");
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        // Serialization of plain float/int vectors cannot fail.
        println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
    } else {
        print_summary(&outcome);
    }
    ExitCode::SUCCESS
}

fn print_summary(outcome: &SimulationOutcome) {
    let buyers = outcome
        .buyer_profit_history
        .last()
        .expect("histories always hold the zero row");
    let sellers = outcome
        .seller_profit_history
        .last()
        .expect("histories always hold the zero row");

    println!("=== Buyers ===");
    for (buyer, profit) in buyers.iter().enumerate() {
        println!("buyer {:>3}: {:>12.2}", buyer, profit);
    }
    println!("mean: {:.2}  median: {:.2}", mean(buyers), median(buyers));

    println!("=== Sellers ===");
    for (seller, profit) in sellers.iter().enumerate() {
        println!("seller {:>2}: {:>12.2}", seller, profit);
    }
    println!("mean: {:.2}  median: {:.2}", mean(sellers), median(sellers));
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
    }
}
