//! Daily-to-period bar aggregation.
//!
//! Each daily bar is keyed by the last calendar day of the period it falls
//! in. Consecutive bars sharing a key are folded into one bar; periods with
//! no trading days never appear in the output.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::error::WeektraderError;
use super::ohlcv::{OhlcvBar, WeeklyBar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPeriod {
    /// Calendar weeks ending on `ending` (inclusive).
    Weekly { ending: Weekday },
    /// Calendar months, labelled by their last day.
    Monthly,
}

impl Default for AggregationPeriod {
    fn default() -> Self {
        AggregationPeriod::Weekly {
            ending: Weekday::Sun,
        }
    }
}

impl AggregationPeriod {
    /// The last calendar day of the period containing `date`.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            AggregationPeriod::Weekly { ending } => {
                let ahead = (ending.num_days_from_monday() + 7
                    - date.weekday().num_days_from_monday())
                    % 7;
                date + Duration::days(ahead as i64)
            }
            AggregationPeriod::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|first| first.pred_opt())
                    .unwrap_or(date)
            }
        }
    }
}

impl fmt::Display for AggregationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationPeriod::Weekly {
                ending: Weekday::Sun,
            } => write!(f, "weekly"),
            AggregationPeriod::Weekly { ending } => {
                write!(f, "weekly:{}", ending.to_string().to_lowercase())
            }
            AggregationPeriod::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for AggregationPeriod {
    type Err = String;

    /// Accepts `weekly`, `weekly:<day>` (e.g. `weekly:fri`) and `monthly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "weekly" | "week" | "w" => Ok(AggregationPeriod::default()),
            "monthly" | "month" | "m" => Ok(AggregationPeriod::Monthly),
            other => match other.strip_prefix("weekly:") {
                Some(day) => day
                    .parse::<Weekday>()
                    .map(|ending| AggregationPeriod::Weekly { ending })
                    .map_err(|_| format!("unknown week-ending day '{day}'")),
                None => Err(format!("unknown aggregation period '{s}'")),
            },
        }
    }
}

/// Fold daily bars (ascending by date) into one bar per period.
pub fn aggregate(
    daily: &[OhlcvBar],
    period: AggregationPeriod,
) -> Result<Vec<WeeklyBar>, WeektraderError> {
    if daily.is_empty() {
        return Err(WeektraderError::EmptyInput);
    }

    let mut out: Vec<WeeklyBar> = Vec::new();
    let mut previous: Option<NaiveDate> = None;

    for bar in daily {
        bar.validate().map_err(|reason| WeektraderError::InvalidBar {
            date: bar.date,
            reason,
        })?;
        if let Some(prev) = previous {
            if bar.date <= prev {
                return Err(WeektraderError::UnorderedBars {
                    previous: prev,
                    date: bar.date,
                });
            }
        }
        previous = Some(bar.date);

        let end = period.period_end(bar.date);
        match out.last_mut() {
            Some(current) if current.date == end => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
            }
            _ => out.push(OhlcvBar {
                date: end,
                ..bar.clone()
            }),
        }
    }

    debug!(
        daily = daily.len(),
        periods = out.len(),
        period = %period,
        "aggregated bars"
    );
    Ok(out)
}
