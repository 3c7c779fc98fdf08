use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A market instrument: the display name shown to the user and the ticker
/// understood by the upstream data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Human-readable name (e.g. "S&P 500").
    pub name: String,
    /// Upstream symbol (e.g. "^GSPC").
    pub ticker: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// A single close observation. Upstream feeds carry full OHLC bars; only the
/// close survives the ingestion boundary because nothing downstream reads the
/// other fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
}

/// An ordered series of close prices for one instrument over a lookback
/// window.
///
/// Invariant: `points` is sorted by strictly increasing timestamp. The
/// ingestion layer establishes this (see `validate`); consumers rely on it
/// and never mutate the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Display name of the instrument this series belongs to.
    pub instrument: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(instrument: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            instrument: instrument.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent observation, if any.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Checks the series invariants: strictly increasing timestamps and
    /// positive closes.
    pub fn validate(&self) -> Result<(), CoreError> {
        for pair in self.points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(CoreError::InvalidInput(
                    self.instrument.clone(),
                    format!(
                        "timestamps not strictly increasing at {}",
                        pair[1].timestamp
                    ),
                ));
            }
        }
        if let Some(point) = self.points.iter().find(|p| p.close <= Decimal::ZERO) {
            return Err(CoreError::InvalidInput(
                self.instrument.clone(),
                format!("non-positive close {} at {}", point.close, point.timestamp),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn point(day: u32, close: Decimal) -> PricePoint {
        PricePoint {
            timestamp: Utc.with_ymd_and_hms(2026, 7, day, 0, 0, 0).unwrap(),
            close,
        }
    }

    #[test]
    fn validate_accepts_ordered_series() {
        let series = PriceSeries::new("Test", vec![point(1, dec!(10)), point(2, dec!(11))]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_timestamps() {
        let series = PriceSeries::new("Test", vec![point(1, dec!(10)), point(1, dec!(11))]);
        assert!(series.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_close() {
        let series = PriceSeries::new("Test", vec![point(1, dec!(10)), point(2, dec!(0))]);
        assert!(series.validate().is_err());
    }
}
