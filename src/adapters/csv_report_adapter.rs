//! CSV report adapter.
//!
//! Writes the per-bar frame table and the trade ledger for an external
//! charting layer:
//! - `frames.csv`: bar, indicators, signal flags, bands, buy-and-hold %
//! - `trades.csv`: ledger rows with cumulative return
//! - `events.csv`: engine events (optional)

use crate::domain::analysis::Analysis;
use crate::domain::backtest::TradeEvent;
use crate::domain::error::WeektraderError;
use crate::domain::position::ExitReason;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct FrameRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    trend_strength: Option<f64>,
    momentum: Option<f64>,
    buy: bool,
    sell: bool,
    osc_upper_band: f64,
    osc_lower_band: f64,
    buy_and_hold_pct: f64,
}

#[derive(Debug, Serialize)]
struct TradeRow {
    entry_date: String,
    exit_date: String,
    entry_price: f64,
    exit_price: f64,
    profit_pct: f64,
    cumulative_return_pct: f64,
    exit_reason: &'static str,
}

#[derive(Debug, Serialize)]
struct EventRow {
    kind: &'static str,
    index: usize,
    date: String,
    price: f64,
    profit_pct: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct CsvReportAdapter {
    pub include_events: bool,
}

impl CsvReportAdapter {
    pub fn new(include_events: bool) -> Self {
        Self { include_events }
    }
}

fn csv_error(e: csv::Error) -> WeektraderError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => WeektraderError::Io(io),
        other => WeektraderError::Data {
            reason: format!("CSV write error: {:?}", other),
        },
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), WeektraderError> {
    let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn exit_reason_label(reason: ExitReason) -> &'static str {
    match reason {
        ExitReason::Signal => "signal",
        ExitReason::EndOfData => "end_of_data",
    }
}

fn event_row(event: &TradeEvent) -> EventRow {
    match *event {
        TradeEvent::Enter { index, date, price } => EventRow {
            kind: "enter",
            index,
            date: date.to_string(),
            price,
            profit_pct: None,
        },
        TradeEvent::Exit {
            index,
            date,
            price,
            profit_pct,
        } => EventRow {
            kind: "exit",
            index,
            date: date.to_string(),
            price,
            profit_pct: Some(profit_pct),
        },
        TradeEvent::ForcedExit {
            index,
            date,
            price,
            profit_pct,
        } => EventRow {
            kind: "forced_exit",
            index,
            date: date.to_string(),
            price,
            profit_pct: Some(profit_pct),
        },
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, analysis: &Analysis, output_dir: &Path) -> Result<(), WeektraderError> {
        fs::create_dir_all(output_dir)?;
        let thresholds = &analysis.config.thresholds;

        let frames: Vec<FrameRow> = analysis
            .frames
            .iter()
            .zip(&analysis.signals)
            .zip(&analysis.buy_and_hold.series)
            .map(|((frame, signal), bh)| FrameRow {
                date: frame.bar.date.to_string(),
                open: frame.bar.open,
                high: frame.bar.high,
                low: frame.bar.low,
                close: frame.bar.close,
                volume: frame.bar.volume,
                trend_strength: frame.trend_strength,
                momentum: frame.momentum,
                buy: signal.buy,
                sell: signal.sell,
                osc_upper_band: thresholds.osc_upper_band,
                osc_lower_band: thresholds.osc_lower_band,
                buy_and_hold_pct: bh.cumulative_return_pct,
            })
            .collect();
        write_rows(&output_dir.join("frames.csv"), &frames)?;

        let trades: Vec<TradeRow> = analysis
            .ledger
            .entries()
            .iter()
            .map(|e| TradeRow {
                entry_date: e.trade.entry_date.to_string(),
                exit_date: e.trade.exit_date.to_string(),
                entry_price: e.trade.entry_price,
                exit_price: e.trade.exit_price,
                profit_pct: e.trade.profit_pct,
                cumulative_return_pct: e.cumulative_return_pct,
                exit_reason: exit_reason_label(e.trade.exit_reason),
            })
            .collect();
        write_rows(&output_dir.join("trades.csv"), &trades)?;

        if self.include_events {
            let events: Vec<EventRow> = analysis.events.iter().map(event_row).collect();
            write_rows(&output_dir.join("events.csv"), &events)?;
        }

        info!(
            dir = %output_dir.display(),
            frames = frames.len(),
            trades = trades.len(),
            "report written"
        );
        Ok(())
    }
}
