use core_types::Instrument;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub market: MarketConfig,
    pub narrator: NarratorConfig,
    pub news: NewsConfig,
}

/// The instrument universe and the history window requested per instrument.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// The number of calendar days of history to request per instrument.
    pub lookback_days: u32,
    /// Equity indexes to track, display name -> upstream ticker.
    pub indexes: BTreeMap<String, String>,
    /// Currency pairs to track, display name -> upstream ticker.
    pub currencies: BTreeMap<String, String>,
}

impl MarketConfig {
    /// The full configured universe, indexes before currencies.
    pub fn instruments(&self) -> Vec<Instrument> {
        self.indexes
            .iter()
            .chain(self.currencies.iter())
            .map(|(name, ticker)| Instrument::new(name, ticker))
            .collect()
    }
}

/// Parameters for the language-model insight service.
#[derive(Debug, Clone, Deserialize)]
pub struct NarratorConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Bearer token. Left empty in config.toml; supplied via the
    /// MERIDIAN__NARRATOR__API_KEY environment variable. An empty key
    /// disables narration and the dashboard falls back to local summaries.
    #[serde(default)]
    pub api_key: String,
}

/// Parameters for the news-headline search service.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    /// Article-search endpoint URL.
    pub api_url: String,
    /// Bearer token. Supplied via MERIDIAN__NEWS__API_KEY; an empty key
    /// disables the news command.
    #[serde(default)]
    pub api_key: String,
    /// Default number of headlines requested per topic.
    pub page_size: u32,
}
