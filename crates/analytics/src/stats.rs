use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time change statistics for a single instrument.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// narrative and presentation layers consume. It is computed fresh from a
/// `PriceSeries` on every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStats {
    /// The latest close in the series.
    pub current: Decimal,
    /// The second-latest close in the series.
    pub previous: Decimal,
    /// Signed percentage change between `previous` and `current`, rounded to
    /// two decimal places.
    pub change_pct: Decimal,
    /// Arithmetic mean of the trailing five closes (inclusive of the latest),
    /// rounded to two decimal places.
    ///
    /// `None` when the series holds fewer than five observations. Consumers
    /// must render this as "not enough history", never as zero.
    pub moving_average_5: Option<Decimal>,
}
