use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, MarketConfig, NarratorConfig, NewsConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `MERIDIAN__*` environment variables on top
/// (so API keys never have to live in the file), and deserializes the result
/// into our strongly-typed `Config` struct.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment overrides, e.g. MERIDIAN__NARRATOR__API_KEY maps to
        // narrator.api_key.
        .add_source(
            config::Environment::with_prefix("MERIDIAN")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects configurations the rest of the system cannot meaningfully run on.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.market.lookback_days < 2 {
        return Err(ConfigError::Validation(format!(
            "market.lookback_days must be at least 2 to compute a change, got {}",
            config.market.lookback_days
        )));
    }
    if config.market.indexes.is_empty() && config.market.currencies.is_empty() {
        return Err(ConfigError::Validation(
            "no instruments configured under market.indexes or market.currencies".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?;
        validate(&config)?;
        Ok(config)
    }

    const VALID: &str = r#"
        [market]
        lookback_days = 30

        [market.indexes]
        "S&P 500" = "^GSPC"

        [market.currencies]
        "EUR/USD" = "EURUSD=X"

        [narrator]
        api_url = "https://api.example.com/v1/chat/completions"
        model = "test-model"

        [news]
        api_url = "https://news.example.com/v2/everything"
        page_size = 10
    "#;

    #[test]
    fn valid_config_parses_with_empty_keys() {
        let config = parse(VALID).unwrap();

        assert_eq!(config.market.lookback_days, 30);
        assert!(config.narrator.api_key.is_empty());
        assert!(config.news.api_key.is_empty());

        let instruments = config.market.instruments();
        assert_eq!(instruments.len(), 2);
        assert_eq!(instruments[0].name, "S&P 500");
        assert_eq!(instruments[0].ticker, "^GSPC");
    }

    #[test]
    fn short_lookback_is_rejected() {
        let toml = VALID.replace("lookback_days = 30", "lookback_days = 1");
        assert!(matches!(
            parse(&toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_universe_is_rejected() {
        let toml = VALID
            .replace("\"S&P 500\" = \"^GSPC\"", "")
            .replace("\"EUR/USD\" = \"EURUSD=X\"", "");
        assert!(matches!(
            parse(&toml),
            Err(ConfigError::Validation(_))
        ));
    }
}
