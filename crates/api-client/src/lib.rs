use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use core_types::{Instrument, PricePoint, PriceSeries};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::ChartResponse;

/// The generic, abstract interface for a market data provider.
/// This trait is the contract the dashboard orchestrator uses, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetches the daily close history for one instrument over a lookback
    /// window of calendar days.
    async fn fetch_daily_closes(
        &self,
        instrument: &Instrument,
        lookback_days: u32,
    ) -> Result<PriceSeries, ApiError>;
}

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; meridian/0.1)";

/// A concrete implementation of `MarketData` for the Yahoo Finance v8 chart
/// endpoint. The endpoint is public and unauthenticated.
#[derive(Clone)]
pub struct YahooChartClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the client at an alternate host, used by tests and mirrors.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build reqwest client"),
            base_url: base_url.into(),
        }
    }
}

impl Default for YahooChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketData for YahooChartClient {
    async fn fetch_daily_closes(
        &self,
        instrument: &Instrument,
        lookback_days: u32,
    ) -> Result<PriceSeries, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, instrument.ticker);
        let range = format!("{lookback_days}d");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", range.as_str()),
                ("interval", "1d"),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // The endpoint reports failures inside the payload (chart.error), so
        // parse first and only fall back to the HTTP status when the body is
        // not chart-shaped at all.
        let parsed = serde_json::from_str::<ChartResponse>(&text).map_err(|e| {
            if status.is_success() {
                ApiError::Deserialization(e.to_string())
            } else {
                ApiError::Upstream {
                    ticker: instrument.ticker.clone(),
                    code: status.to_string(),
                    description: text.trim().to_string(),
                }
            }
        })?;

        chart_to_series(instrument, parsed)
    }
}

/// Converts a chart payload into a validated `PriceSeries`.
///
/// Intervals with a `null` close (venue holidays, stale pre-listing days)
/// are skipped rather than treated as errors; the series is then sorted and
/// de-duplicated by timestamp so downstream consumers can rely on the
/// strict-ordering invariant.
pub fn chart_to_series(
    instrument: &Instrument,
    response: ChartResponse,
) -> Result<PriceSeries, ApiError> {
    if let Some(error) = response.chart.error {
        return Err(ApiError::Upstream {
            ticker: instrument.ticker.clone(),
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| {
            ApiError::InvalidData(format!("empty chart result for '{}'", instrument.ticker))
        })?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|quote| quote.close)
        .unwrap_or_default();

    if timestamps.len() != closes.len() {
        return Err(ApiError::InvalidData(format!(
            "timestamp/close length mismatch for '{}': {} vs {}",
            instrument.ticker,
            timestamps.len(),
            closes.len()
        )));
    }

    let mut skipped = 0usize;
    let mut points = Vec::with_capacity(timestamps.len());
    for (unix_seconds, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else {
            skipped += 1;
            continue;
        };
        let timestamp = Utc
            .timestamp_opt(unix_seconds, 0)
            .single()
            .ok_or_else(|| ApiError::InvalidData(format!("invalid timestamp: {unix_seconds}")))?;
        let close = Decimal::from_f64(close)
            .ok_or_else(|| ApiError::InvalidData(format!("unrepresentable close: {close}")))?;
        points.push(PricePoint { timestamp, close });
    }

    if skipped > 0 {
        tracing::debug!(
            ticker = %instrument.ticker,
            skipped,
            "skipped intervals with null closes"
        );
    }

    points.sort_by_key(|p| p.timestamp);
    points.dedup_by_key(|p| p.timestamp);

    if points.is_empty() {
        return Err(ApiError::NoData(instrument.name.clone()));
    }

    let series = PriceSeries::new(&instrument.name, points);
    series
        .validate()
        .map_err(|e| ApiError::InvalidData(e.to_string()))?;

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument() -> Instrument {
        Instrument::new("S&P 500", "^GSPC")
    }

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn chart_payload_converts_to_series() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1753920000, 1754006400, 1754092800],
                    "indicators": {"quote": [{"close": [6363.35, 6339.39, 6329.94]}]}
                }],
                "error": null
            }
        }"#;

        let series = chart_to_series(&instrument(), parse(payload)).unwrap();

        assert_eq!(series.instrument, "S&P 500");
        assert_eq!(series.len(), 3);
        assert!(series.validate().is_ok());
        assert_eq!(series.latest().unwrap().close.round_dp(2).to_string(), "6329.94");
    }

    #[test]
    fn null_closes_are_skipped() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1753920000, 1754006400, 1754092800],
                    "indicators": {"quote": [{"close": [6363.35, null, 6329.94]}]}
                }],
                "error": null
            }
        }"#;

        let series = chart_to_series(&instrument(), parse(payload)).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn upstream_error_is_surfaced() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;

        let err = chart_to_series(&instrument(), parse(payload)).unwrap_err();
        assert!(matches!(err, ApiError::Upstream { .. }));
    }

    #[test]
    fn all_null_closes_mean_no_data() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1753920000, 1754006400],
                    "indicators": {"quote": [{"close": [null, null]}]}
                }],
                "error": null
            }
        }"#;

        let err = chart_to_series(&instrument(), parse(payload)).unwrap_err();
        assert!(matches!(err, ApiError::NoData(_)));
    }

    #[test]
    fn length_mismatch_is_invalid_data() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1753920000],
                    "indicators": {"quote": [{"close": [6363.35, 6339.39]}]}
                }],
                "error": null
            }
        }"#;

        let err = chart_to_series(&instrument(), parse(payload)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidData(_)));
    }
}
