use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build or send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The market data API returned an error for '{ticker}': {code}: {description}")]
    Upstream {
        ticker: String,
        code: String,
        description: String,
    },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("No usable price data returned for '{0}'")]
    NoData(String),
}
