//! Descriptive statistics over daily listening totals.

use serde::Serialize;

use super::daily::daily_totals;
use super::round2;
use crate::table::EventTable;

/// Multiples of the mean that classify a day as high or low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayThresholds {
    /// Days above `high_factor * mean` are high
    pub high_factor: f64,
    /// Days below `low_factor * mean` are low
    pub low_factor: f64,
}

impl Default for DayThresholds {
    fn default() -> Self {
        Self {
            high_factor: 1.5,
            low_factor: 0.5,
        }
    }
}

/// Spread of minutes per active day.
///
/// Real-valued fields are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyVariability {
    pub mean: f64,
    /// Sample standard deviation, 0 for a single day
    pub std_dev: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub high_days: usize,
    pub low_days: usize,
    pub active_days: usize,
}

/// Daily variability with the default 1.5x / 0.5x thresholds.
pub fn daily_variability(table: &EventTable) -> Option<DailyVariability> {
    daily_variability_with(table, DayThresholds::default())
}

/// Daily variability with explicit high/low thresholds. `None` for an empty
/// table.
pub fn daily_variability_with(
    table: &EventTable,
    thresholds: DayThresholds,
) -> Option<DailyVariability> {
    let mut values: Vec<f64> = daily_totals(table).iter().map(|d| d.minutes).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std_dev = if n > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };

    let high_cut = thresholds.high_factor * mean;
    let low_cut = thresholds.low_factor * mean;

    Some(DailyVariability {
        mean: round2(mean),
        std_dev: round2(std_dev),
        p25: round2(percentile(&values, 0.25)),
        median: round2(percentile(&values, 0.50)),
        p75: round2(percentile(&values, 0.75)),
        high_days: values.iter().filter(|&&v| v > high_cut).count(),
        low_days: values.iter().filter(|&&v| v < low_cut).count(),
        active_days: n,
    })
}

/// Linear-interpolation percentile over sorted, non-empty values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
