//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A bar covering one aggregation period, dated by the period's last day.
pub type WeeklyBar = OhlcvBar;

impl OhlcvBar {
    /// Checks that all fields are finite and non-negative, that open and
    /// close are strictly positive, and that the high/low envelope contains
    /// open and close.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} is not finite"));
            }
            if value < 0.0 {
                return Err(format!("{name} is negative"));
            }
        }
        for (name, value) in [("open", self.open), ("close", self.close)] {
            if value == 0.0 {
                return Err(format!("{name} is zero"));
            }
        }
        if self.high < self.open.max(self.close) {
            return Err("high is below open/close".into());
        }
        if self.low > self.open.min(self.close) {
            return Err("low is above open/close".into());
        }
        Ok(())
    }
}
