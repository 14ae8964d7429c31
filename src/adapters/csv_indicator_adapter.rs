//! CSV adapter for precomputed indicator values.
//!
//! Reads `date,trend_strength,momentum`. An empty cell, `NaN` or a date with
//! no row means the value is undefined for that bar. No indicator math
//! happens here.

use crate::adapters::csv_adapter::parse_date;
use crate::domain::error::WeektraderError;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::WeeklyBar;
use crate::ports::indicator_port::IndicatorPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
struct Row {
    trend_strength: Option<f64>,
    momentum: Option<f64>,
}

pub struct CsvIndicatorAdapter {
    rows: HashMap<NaiveDate, Row>,
}

impl CsvIndicatorAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WeektraderError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| WeektraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> Result<Self, WeektraderError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut rows = HashMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| WeektraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let date = parse_date(&record)?;
            let row = Row {
                trend_strength: parse_optional(record.get(1), "trend_strength")?,
                momentum: parse_optional(record.get(2), "momentum")?,
            };
            if rows.insert(date, row).is_some() {
                return Err(WeektraderError::Data {
                    reason: format!("duplicate indicator row for {}", date),
                });
            }
        }

        Ok(Self { rows })
    }

    fn series(
        &self,
        indicator_type: IndicatorType,
        bars: &[WeeklyBar],
        pick: fn(&Row) -> Option<f64>,
    ) -> IndicatorSeries {
        let values = bars
            .iter()
            .map(|bar| IndicatorPoint {
                date: bar.date,
                value: self.rows.get(&bar.date).and_then(pick),
            })
            .collect();
        IndicatorSeries {
            indicator_type,
            values,
        }
    }
}

fn parse_optional(cell: Option<&str>, name: &str) -> Result<Option<f64>, WeektraderError> {
    match cell.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(|v| Some(v).filter(|v| v.is_finite()))
            .map_err(|e| WeektraderError::Data {
                reason: format!("invalid {} value: {}", name, e),
            }),
    }
}

impl IndicatorPort for CsvIndicatorAdapter {
    fn trend_strength(
        &self,
        bars: &[WeeklyBar],
        period: usize,
    ) -> Result<IndicatorSeries, WeektraderError> {
        Ok(self.series(IndicatorType::TrendStrength(period), bars, |r| {
            r.trend_strength
        }))
    }

    fn momentum_oscillator(
        &self,
        bars: &[WeeklyBar],
        lookback: usize,
    ) -> Result<IndicatorSeries, WeektraderError> {
        Ok(self.series(IndicatorType::MomentumOscillator(lookback), bars, |r| {
            r.momentum
        }))
    }
}
