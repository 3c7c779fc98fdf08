//! # Meridian News Sentiment
//!
//! Fetches news headlines for a user-supplied topic and scores their
//! sentiment polarity with a small financial lexicon. This pipeline is fully
//! independent of the price analytics: it consumes headline strings, nothing
//! else.

pub mod error;
pub mod news;
pub mod scorer;

pub use error::SentimentError;
pub use news::{Headline, NewsClient};
pub use scorer::SentimentScorer;
