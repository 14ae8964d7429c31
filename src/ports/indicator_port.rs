//! Indicator computation port trait.
//!
//! Implementations return one point per bar, dated like the bars, with
//! `None` for the warm-up prefix where the window is not yet full.

use crate::domain::error::WeektraderError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::WeeklyBar;

pub trait IndicatorPort {
    /// Trend intensity over a `period`-bar window, 0..=100.
    fn trend_strength(
        &self,
        bars: &[WeeklyBar],
        period: usize,
    ) -> Result<IndicatorSeries, WeektraderError>;

    /// Momentum oscillator over a `lookback`-bar high/low range, -100..=0.
    fn momentum_oscillator(
        &self,
        bars: &[WeeklyBar],
        lookback: usize,
    ) -> Result<IndicatorSeries, WeektraderError>;
}
