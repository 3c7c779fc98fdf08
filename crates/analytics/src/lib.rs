//! # Meridian Analytics Engine
//!
//! This crate turns a raw price series into the point-in-time change
//! statistics the dashboard reports for each instrument.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes an already-fetched `PriceSeries` as input and
//!   produces a `ChangeStats` as output, which makes it highly reliable and
//!   easy to test.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `ChangeStats`: The derived statistics for one instrument.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, MOVING_AVERAGE_WINDOW};
pub use error::AnalyticsError;
pub use stats::ChangeStats;
