use crate::error::AnalyticsError;
use crate::stats::ChangeStats;
use core_types::PriceSeries;
use rust_decimal::Decimal;

/// Number of trailing closes that feed the moving average.
pub const MOVING_AVERAGE_WINDOW: usize = 5;

/// Minimum observations needed to compute a change percentage.
const MIN_OBSERVATIONS: usize = 2;

/// A stateless calculator for deriving change statistics from a price series.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing change statistics.
    ///
    /// # Arguments
    ///
    /// * `series` - The close-price history of one instrument, in timestamp
    ///   order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ChangeStats` or an `AnalyticsError`.
    /// The series needs at least two observations; the moving average
    /// additionally needs five and is reported as `None` below that, so a
    /// short series is not an error for it.
    pub fn change_stats(&self, series: &PriceSeries) -> Result<ChangeStats, AnalyticsError> {
        let points = &series.points;

        if points.len() < MIN_OBSERVATIONS {
            return Err(AnalyticsError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: points.len(),
            });
        }

        let current = points[points.len() - 1].close;
        let previous = points[points.len() - 2].close;

        if previous == Decimal::ZERO {
            return Err(AnalyticsError::DivisionByZero("change_pct".to_string()));
        }

        let change_pct = ((current - previous) / previous * Decimal::from(100)).round_dp(2);

        let moving_average_5 = if points.len() >= MOVING_AVERAGE_WINDOW {
            let window = &points[points.len() - MOVING_AVERAGE_WINDOW..];
            let sum: Decimal = window.iter().map(|p| p.close).sum();
            Some((sum / Decimal::from(MOVING_AVERAGE_WINDOW as u32)).round_dp(2))
        } else {
            None
        };

        Ok(ChangeStats {
            current,
            previous,
            change_pct,
            moving_average_5,
        })
    }
}
