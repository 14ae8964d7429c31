//! Indicator series and the frame adapter.
//!
//! Indicator values are computed outside this crate (see
//! [`crate::ports::indicator_port::IndicatorPort`]) and arrive as series
//! aligned with the weekly bars. This module zips them onto the bars:
//! - `IndicatorPoint`: a single, possibly undefined, value
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a time series of indicator values
//! - `IndicatorFrame`: a bar with both indicator values attached

use chrono::NaiveDate;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::warn;

use super::error::{InsufficientHistory, WeektraderError};
use super::ohlcv::WeeklyBar;

pub const DEFAULT_TREND_PERIOD: usize = 14;
pub const DEFAULT_MOMENTUM_LOOKBACK: usize = 140;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    /// Trend intensity, 0..=100 (e.g. ADX).
    TrendStrength(usize),
    /// Position within the recent high/low range, -100..=0 (e.g. Williams %R).
    MomentumOscillator(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::TrendStrength(period) => write!(f, "ADX({})", period),
            IndicatorType::MomentumOscillator(lookback) => write!(f, "WILLR({})", lookback),
        }
    }
}

impl IndicatorType {
    /// Values outside this range are treated as unavailable.
    pub fn valid_range(&self) -> RangeInclusive<f64> {
        match self {
            IndicatorType::TrendStrength(_) => 0.0..=100.0,
            IndicatorType::MomentumOscillator(_) => -100.0..=0.0,
        }
    }

    fn accept(&self, value: Option<f64>) -> Option<f64> {
        value.filter(|v| self.valid_range().contains(v))
    }
}

impl IndicatorSeries {
    /// Build a series by pairing each bar date with the matching value.
    pub fn from_values(
        indicator_type: IndicatorType,
        bars: &[WeeklyBar],
        values: &[Option<f64>],
    ) -> Self {
        let values = bars
            .iter()
            .zip(values.iter().copied().chain(std::iter::repeat(None)))
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                value,
            })
            .collect();
        IndicatorSeries {
            indicator_type,
            values,
        }
    }

    /// Number of leading points without a value.
    pub fn warmup_len(&self) -> usize {
        self.values
            .iter()
            .take_while(|p| p.value.is_none())
            .count()
    }
}

/// A weekly bar with its indicator values. `None` means unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub bar: WeeklyBar,
    pub trend_strength: Option<f64>,
    pub momentum: Option<f64>,
}

impl IndicatorFrame {
    pub fn is_ready(&self) -> bool {
        self.trend_strength.is_some() && self.momentum.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    pub frames: Vec<IndicatorFrame>,
    pub warning: Option<InsufficientHistory>,
}

/// Zip bars with both indicator series. Both series must carry exactly one
/// point per bar, in the same date order.
pub fn build_frames(
    bars: Vec<WeeklyBar>,
    trend: &IndicatorSeries,
    momentum: &IndicatorSeries,
) -> Result<FrameSet, WeektraderError> {
    check_alignment(&bars, trend)?;
    check_alignment(&bars, momentum)?;

    let rejected = out_of_range(trend) + out_of_range(momentum);
    if rejected > 0 {
        warn!(
            values = rejected,
            trend = %trend.indicator_type,
            momentum = %momentum.indicator_type,
            "out-of-range indicator values treated as unavailable"
        );
    }

    let frames: Vec<IndicatorFrame> = bars
        .into_iter()
        .zip(trend.values.iter().zip(momentum.values.iter()))
        .map(|(bar, (t, m))| IndicatorFrame {
            bar,
            trend_strength: trend.indicator_type.accept(t.value),
            momentum: momentum.indicator_type.accept(m.value),
        })
        .collect();

    let unavailable = frames.iter().filter(|f| !f.is_ready()).count();
    let warning = if unavailable > 0 {
        let w = InsufficientHistory {
            rows: unavailable,
            total: frames.len(),
        };
        warn!(
            rows = w.rows,
            total = w.total,
            trend = %trend.indicator_type,
            trend_warmup = trend.warmup_len(),
            momentum = %momentum.indicator_type,
            momentum_warmup = momentum.warmup_len(),
            "indicator warm-up rows will not generate signals"
        );
        Some(w)
    } else {
        None
    };

    Ok(FrameSet { frames, warning })
}

/// Finite values that fall outside the indicator's range.
fn out_of_range(series: &IndicatorSeries) -> usize {
    let range = series.indicator_type.valid_range();
    series
        .values
        .iter()
        .filter_map(|p| p.value)
        .filter(|v| v.is_finite() && !range.contains(v))
        .count()
}

fn check_alignment(bars: &[WeeklyBar], series: &IndicatorSeries) -> Result<(), WeektraderError> {
    let misaligned = |index| WeektraderError::MisalignedIndicator {
        indicator: series.indicator_type.to_string(),
        index,
    };
    if series.values.len() != bars.len() {
        return Err(misaligned(bars.len().min(series.values.len())));
    }
    match bars
        .iter()
        .zip(series.values.iter())
        .position(|(bar, point)| bar.date != point.date)
    {
        Some(index) => Err(misaligned(index)),
        None => Ok(()),
    }
}
