//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//! The engine seeds exactly one generator at construction and threads it
//! through market setup, per-round clearing order, and strategy draws.

mod xorshift;

pub use xorshift::RngManager;
