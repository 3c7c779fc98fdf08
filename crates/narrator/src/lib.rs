use crate::error::NarratorError;
use analytics::ChangeStats;
use configuration::NarratorConfig;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod error;

const SYSTEM_PROMPT: &str = "You are a market dashboard assistant. You turn \
pre-computed statistics into a brief, neutral insight for a general audience. \
Two sentences at most. Never give investment advice and never invent numbers.";

/// The JSON payload for an OpenAI-style chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// A client that asks a language model to phrase computed statistics as a
/// narrative insight.
pub struct InsightNarrator {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl InsightNarrator {
    /// Creates a new `InsightNarrator`.
    ///
    /// Returns `None` if no API key is configured, allowing the dashboard to
    /// gracefully fall back to locally generated summaries.
    pub fn from_config(config: &NarratorConfig) -> Option<Self> {
        if config.api_key.is_empty() {
            tracing::warn!("Narrator is not configured (missing api_key); using local summaries.");
            return None;
        }
        Some(Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Asks the model for a narrative insight on one instrument's statistics.
    ///
    /// The statistics are already final when this runs; a failure here never
    /// affects the computed numbers, only their phrasing.
    pub async fn generate(&self, name: &str, stats: &ChangeStats) -> Result<String, NarratorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt_for(name, stats),
                },
            ],
            temperature: 0.4,
            max_tokens: 120,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(NarratorError::ApiError(error_text));
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(NarratorError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

/// The user prompt handed to the model: all numbers pre-computed, nothing for
/// the model to calculate.
fn prompt_for(name: &str, stats: &ChangeStats) -> String {
    let moving_average = match stats.moving_average_5 {
        Some(avg) => format!("{avg}"),
        None => "unavailable (fewer than five observations)".to_string(),
    };
    format!(
        "Instrument: {name}. Latest close: {current}. Previous close: {previous}. \
         Change: {change_pct}%. Five-day moving average: {moving_average}.",
        current = stats.current,
        previous = stats.previous,
        change_pct = stats.change_pct,
    )
}

/// Deterministic local summary used whenever the language model is
/// unconfigured or fails. States the same facts the model would.
pub fn fallback_insight(name: &str, stats: &ChangeStats) -> String {
    let movement = if stats.change_pct > Decimal::ZERO {
        format!("up {}% from the previous close", stats.change_pct)
    } else if stats.change_pct < Decimal::ZERO {
        format!("down {}% from the previous close", stats.change_pct.abs())
    } else {
        "unchanged from the previous close".to_string()
    };

    match stats.moving_average_5 {
        Some(avg) => format!(
            "{name} closed at {}, {movement}; the 5-day average sits at {avg}.",
            stats.current
        ),
        None => format!(
            "{name} closed at {}, {movement}; not enough history yet for a 5-day average.",
            stats.current
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stats(change_pct: Decimal, moving_average_5: Option<Decimal>) -> ChangeStats {
        ChangeStats {
            current: dec!(110.00),
            previous: dec!(100.00),
            change_pct,
            moving_average_5,
        }
    }

    #[test]
    fn narrator_is_disabled_without_api_key() {
        let config = NarratorConfig {
            api_url: "https://api.example.com/v1/chat/completions".to_string(),
            model: "test-model".to_string(),
            api_key: String::new(),
        };
        assert!(InsightNarrator::from_config(&config).is_none());
    }

    #[test]
    fn fallback_states_name_direction_and_change() {
        let text = fallback_insight("S&P 500", &stats(dec!(10.00), Some(dec!(105.00))));

        assert!(text.contains("S&P 500"));
        assert!(text.contains("up 10.00%"));
        assert!(text.contains("105.00"));
    }

    #[test]
    fn fallback_reports_missing_history_instead_of_zero() {
        let text = fallback_insight("S&P 500", &stats(dec!(-2.50), None));

        assert!(text.contains("down 2.50%"));
        assert!(text.contains("not enough history"));
        assert!(!text.contains("average sits at"));
    }

    #[test]
    fn prompt_carries_every_precomputed_number() {
        let prompt = prompt_for("EUR/USD", &stats(dec!(10.00), Some(dec!(105.00))));

        assert!(prompt.contains("EUR/USD"));
        assert!(prompt.contains("110.00"));
        assert!(prompt.contains("100.00"));
        assert!(prompt.contains("10.00%"));
        assert!(prompt.contains("105.00"));
    }
}
