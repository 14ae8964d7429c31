//! CSV file daily-bar adapter.
//!
//! Reads `<base>/<SYMBOL>.csv` with columns `date,open,high,low,close,volume`.

use crate::domain::error::WeektraderError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn data_error(reason: String) -> WeektraderError {
    WeektraderError::Data { reason }
}

fn parse_number(record: &StringRecord, index: usize, name: &str) -> Result<f64, WeektraderError> {
    record
        .get(index)
        .ok_or_else(|| data_error(format!("missing {} column", name)))?
        .trim()
        .parse()
        .map_err(|e| data_error(format!("invalid {} value: {}", name, e)))
}

pub(crate) fn parse_date(record: &StringRecord) -> Result<NaiveDate, WeektraderError> {
    let date_str = record
        .get(0)
        .ok_or_else(|| data_error("missing date column".into()))?;
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| data_error(format!("invalid date format: {}", e)))
}

impl DataPort for CsvAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, WeektraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path)
            .map_err(|e| data_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;
            let date = parse_date(&record)?;

            if start_date.is_some_and(|s| date < s) || end_date.is_some_and(|e| date > e) {
                continue;
            }

            bars.push(OhlcvBar {
                date,
                open: parse_number(&record, 1, "open")?,
                high: parse_number(&record, 2, "high")?,
                low: parse_number(&record, 3, "low")?,
                close: parse_number(&record, 4, "close")?,
                volume: parse_number(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        debug!(symbol, path = %path.display(), bars = bars.len(), "loaded daily bars");
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, WeektraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            data_error(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| data_error(format!("directory entry error: {}", e)))?;
            let name = entry.file_name();
            if let Some(symbol) = name.to_string_lossy().strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000.5\n";

        fs::write(path.join("SPY.csv"), csv_content).unwrap();
        fs::write(path.join("QQQ.csv"), "date,open,high,low,close,volume\n").unwrap();
        fs::write(path.join("notes.txt"), "ignored").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_daily_returns_sorted_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_daily("SPY", None, None).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, date(2024, 1, 15));
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000.0);
        assert_eq!(bars[2].volume, 55000.5);
    }

    #[test]
    fn fetch_daily_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let day = date(2024, 1, 16);
        let bars = adapter.fetch_daily("SPY", Some(day), Some(day)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, day);

        let bars = adapter.fetch_daily("SPY", Some(day), None).unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn fetch_daily_errors_for_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let err = adapter.fetch_daily("XYZ", None, None).unwrap_err();
        assert!(matches!(err, WeektraderError::Data { .. }));
    }

    #[test]
    fn fetch_daily_errors_for_bad_number() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("BAD.csv"),
            "date,open,high,low,close,volume\n2024-01-15,abc,1,1,1,1\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter.fetch_daily("BAD", None, None).unwrap_err();
        assert!(err.to_string().contains("invalid open value"));
    }

    #[test]
    fn list_symbols_returns_csv_stems() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        assert_eq!(adapter.list_symbols().unwrap(), vec!["QQQ", "SPY"]);
    }
}
