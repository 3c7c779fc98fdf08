use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("News API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("News API returned an error: {0}")]
    ApiError(String),
}
