//! Strategy and run configuration.

use chrono::NaiveDate;

use super::aggregate::AggregationPeriod;
use super::indicator::{DEFAULT_MOMENTUM_LOOKBACK, DEFAULT_TREND_PERIOD};

pub const DEFAULT_TREND_THRESHOLD: f64 = 40.0;
pub const DEFAULT_OSC_UPPER_BAND: f64 = -25.0;
pub const DEFAULT_OSC_LOWER_BAND: f64 = -75.0;

/// Signal thresholds. `osc_lower_band` is a chart annotation only and never
/// participates in entry or exit decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub trend_threshold: f64,
    pub osc_upper_band: f64,
    pub osc_lower_band: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            osc_upper_band: DEFAULT_OSC_UPPER_BAND,
            osc_lower_band: DEFAULT_OSC_LOWER_BAND,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub thresholds: Thresholds,
    pub trend_period: usize,
    pub momentum_lookback: usize,
    pub aggregation_period: AggregationPeriod,
    /// Inclusive date range applied to the daily bars before aggregation.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            thresholds: Thresholds::default(),
            trend_period: DEFAULT_TREND_PERIOD,
            momentum_lookback: DEFAULT_MOMENTUM_LOOKBACK,
            aggregation_period: AggregationPeriod::default(),
            start_date: None,
            end_date: None,
        }
    }
}

impl StrategyConfig {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}
