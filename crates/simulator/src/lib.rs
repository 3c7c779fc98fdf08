//! # Meridian Portfolio Simulator
//!
//! This crate combines multiple price series with user-supplied allocation
//! weights into a single cumulative weighted-return series.
//!
//! Like the analytics engine, this is a pure Layer 1 crate: it operates on
//! already-fetched data, holds no state, and performs no I/O. The return
//! model is deliberately naive (an additive running sum of weighted
//! per-interval returns, not a compounded portfolio value) because that is
//! what the dashboard visualizes.

pub mod error;
pub mod portfolio;

pub use error::SimulationError;
pub use portfolio::{simulate, AllocationSet, ReturnPoint};
