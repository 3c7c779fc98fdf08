use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Chat-completions API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chat-completions API returned an error: {0}")]
    ApiError(String),

    #[error("Chat-completions API returned no choices")]
    EmptyResponse,
}
