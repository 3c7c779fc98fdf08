use crate::error::SimulationError;
use chrono::{DateTime, Utc};
use core_types::PriceSeries;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-supplied allocation weights, keyed by instrument display name.
///
/// Each weight is an independent fraction of notional capital in `[0, 1]`.
/// Weights are NOT required to sum to one and are never normalized here:
/// a user dialing 40% and 40% expects exactly those fractions applied, not a
/// silent rescale to 50/50.
pub type AllocationSet = BTreeMap<String, Decimal>;

/// One entry of the simulated portfolio-return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub timestamp: DateTime<Utc>,
    /// Running sum of allocation-weighted per-interval returns up to and
    /// including this interval. A fraction, not a percentage.
    pub cumulative_return: Decimal,
}

/// Simulates the cumulative weighted return of a portfolio.
///
/// Every instrument with a positive weight contributes its per-interval
/// simple return `(close[t] - close[t-1]) / close[t-1]`, scaled by its
/// weight; intervals are summed across instruments and accumulated into a
/// running total that starts at zero before the first interval. The sum is
/// additive by design, not compounded.
///
/// All weighted series must share an identical timestamp sequence. Feeds
/// with differing trading calendars are rejected with
/// [`SimulationError::MisalignedSeries`] rather than silently aligned by
/// position, which would produce meaningless results.
///
/// Names present in `series_by_name` without an allocation are ignored.
pub fn simulate(
    allocations: &AllocationSet,
    series_by_name: &BTreeMap<String, PriceSeries>,
) -> Result<Vec<ReturnPoint>, SimulationError> {
    let weighted: Vec<(&str, Decimal)> = allocations
        .iter()
        .filter(|(_, weight)| **weight > Decimal::ZERO)
        .map(|(name, weight)| (name.as_str(), *weight))
        .collect();

    if weighted.is_empty() {
        return Err(SimulationError::EmptyPortfolio);
    }

    // Every allocated name must be backed by data, zero-weighted or not; a
    // request referencing an unknown instrument is rejected outright.
    let missing: Vec<String> = allocations
        .keys()
        .filter(|name| !series_by_name.contains_key(*name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(SimulationError::UnknownInstrument(missing));
    }

    // The first weighted series sets the time index every other series must
    // match exactly.
    let (reference_name, _) = weighted[0];
    let reference = &series_by_name[reference_name];

    for (name, _) in &weighted {
        let series = &series_by_name[*name];
        if series.len() < 2 {
            return Err(SimulationError::InsufficientData {
                instrument: (*name).to_string(),
                actual: series.len(),
            });
        }
        let aligned = series.len() == reference.len()
            && series
                .points
                .iter()
                .zip(&reference.points)
                .all(|(a, b)| a.timestamp == b.timestamp);
        if !aligned {
            return Err(SimulationError::MisalignedSeries {
                instrument: (*name).to_string(),
                reference: reference_name.to_string(),
            });
        }
    }

    // Weighted per-interval returns, summed across instruments.
    let intervals = reference.len() - 1;
    let mut combined = vec![Decimal::ZERO; intervals];
    for (name, weight) in &weighted {
        let points = &series_by_name[*name].points;
        for (t, pair) in points.windows(2).enumerate() {
            let previous = pair[0].close;
            if previous == Decimal::ZERO {
                return Err(SimulationError::DivisionByZero {
                    instrument: (*name).to_string(),
                });
            }
            combined[t] += *weight * (pair[1].close - previous) / previous;
        }
    }

    // Running total. Each entry is stamped with the timestamp that closes
    // its interval.
    let mut cumulative = Decimal::ZERO;
    let series = combined
        .into_iter()
        .enumerate()
        .map(|(t, interval_return)| {
            cumulative += interval_return;
            ReturnPoint {
                timestamp: reference.points[t + 1].timestamp,
                cumulative_return: cumulative,
            }
        })
        .collect();

    Ok(series)
}
