#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use weektrader::domain::error::WeektraderError;
use weektrader::domain::indicator::{IndicatorSeries, IndicatorType};
pub use weektrader::domain::ohlcv::{OhlcvBar, WeeklyBar};
use weektrader::ports::data_port::DataPort;
use weektrader::ports::indicator_port::IndicatorPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday of week `n`, counting from 2024-01-01.
pub fn monday(n: i64) -> NaiveDate {
    date(2024, 1, 1) + Duration::weeks(n)
}

pub fn make_bar(d: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: d,
        open,
        high,
        low,
        close,
        volume: 1_000.0,
    }
}

/// One daily bar per week, so each becomes its own weekly bar.
pub fn one_bar_per_week(prices: &[(f64, f64, f64, f64)]) -> Vec<OhlcvBar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| make_bar(monday(i as i64), o, h, l, c))
        .collect()
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, WeektraderError> {
        let bars = self.data.get(symbol).ok_or_else(|| WeektraderError::Data {
            reason: format!("no data for {symbol}"),
        })?;
        Ok(bars
            .iter()
            .filter(|b| start_date.is_none_or(|s| b.date >= s))
            .filter(|b| end_date.is_none_or(|e| b.date <= e))
            .cloned()
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, WeektraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// Hands back fixed per-bar values, padded with `None`.
pub struct ScriptedIndicators {
    pub trend: Vec<Option<f64>>,
    pub momentum: Vec<Option<f64>>,
}

impl IndicatorPort for ScriptedIndicators {
    fn trend_strength(
        &self,
        bars: &[WeeklyBar],
        period: usize,
    ) -> Result<IndicatorSeries, WeektraderError> {
        Ok(IndicatorSeries::from_values(
            IndicatorType::TrendStrength(period),
            bars,
            &self.trend,
        ))
    }

    fn momentum_oscillator(
        &self,
        bars: &[WeeklyBar],
        lookback: usize,
    ) -> Result<IndicatorSeries, WeektraderError> {
        Ok(IndicatorSeries::from_values(
            IndicatorType::MomentumOscillator(lookback),
            bars,
            &self.momentum,
        ))
    }
}

/// The three-week scenario: warm-up, buy, sell on the final row.
pub fn scenario() -> (Vec<OhlcvBar>, ScriptedIndicators) {
    let bars = one_bar_per_week(&[
        (100.0, 110.0, 90.0, 105.0),
        (105.0, 108.0, 95.0, 98.0),
        (100.0, 120.0, 99.0, 118.0),
    ]);
    let indicators = ScriptedIndicators {
        trend: vec![None, Some(45.0), Some(50.0)],
        momentum: vec![None, Some(-10.0), Some(-30.0)],
    };
    (bars, indicators)
}
