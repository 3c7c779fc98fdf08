use crate::error::SentimentError;
use chrono::{DateTime, Utc};
use configuration::NewsConfig;
use reqwest::Client;
use serde::Deserialize;

/// One news headline returned by the search endpoint.
#[derive(Debug, Clone)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Response envelope of a NewsAPI-style `everything` search.
///
/// On failure the endpoint keeps HTTP 200-ish semantics and reports
/// `status = "error"` with a code and message in the body, so both shapes
/// live in one struct.
#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    source: ArticleSource,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// A client for a NewsAPI-style headline search service.
pub struct NewsClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl NewsClient {
    /// Creates a new `NewsClient`.
    ///
    /// Returns `None` if no API key is configured, so the caller can report
    /// the feature as unavailable instead of firing doomed requests.
    pub fn from_config(config: &NewsConfig) -> Option<Self> {
        if config.api_key.is_empty() {
            tracing::warn!("News client is not configured (missing api_key).");
            return None;
        }
        Some(Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetches the most recent headlines matching a topic.
    ///
    /// Articles without a title are dropped; a missing source name becomes
    /// "unknown" rather than an error.
    pub async fn top_headlines(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Vec<Headline>, SentimentError> {
        let page_size = limit.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", topic),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ])
            .send()
            .await?;

        let payload: NewsResponse = response.json().await?;

        if payload.status != "ok" {
            let code = payload.code.unwrap_or_else(|| "unknown".to_string());
            let message = payload.message.unwrap_or_default();
            return Err(SentimentError::ApiError(format!("{code}: {message}")));
        }

        let headlines = payload
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?;
                Some(Headline {
                    title,
                    source: article.source.name.unwrap_or_else(|| "unknown".to_string()),
                    published_at: article.published_at,
                })
            })
            .collect();

        Ok(headlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_disabled_without_api_key() {
        let config = NewsConfig {
            api_url: "https://news.example.com/v2/everything".to_string(),
            api_key: String::new(),
            page_size: 10,
        };
        assert!(NewsClient::from_config(&config).is_none());
    }

    #[test]
    fn article_payload_deserializes() {
        let payload = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Example Wire"},
                "title": "Dollar rallies after jobs report",
                "publishedAt": "2026-08-05T14:30:00Z"
            }]
        }"#;

        let parsed: NewsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.status, "ok");
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(
            parsed.articles[0].title.as_deref(),
            Some("Dollar rallies after jobs report")
        );
    }

    #[test]
    fn error_payload_deserializes() {
        let payload = r#"{
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        }"#;

        let parsed: NewsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.code.as_deref(), Some("apiKeyInvalid"));
        assert!(parsed.articles.is_empty());
    }
}
