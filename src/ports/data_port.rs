//! Daily price data port trait.

use crate::domain::error::WeektraderError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `symbol` in ascending date order. `None` bounds are open.
    fn fetch_daily(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, WeektraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, WeektraderError>;
}
