//! Backtest engine.
//!
//! Walks frames in date order with a one-bar execution delay: a signal
//! known at the close of row `i` fills at the open of row `i + 1`. The final
//! row is never used for a signal; a position still open there is closed at
//! that row's close.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::error::WeektraderError;
use super::indicator::IndicatorFrame;
use super::ledger::TradeLedger;
use super::position::{ExitReason, PositionState, Trade};
use super::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub enum TradeEvent {
    Enter {
        /// Row whose signal triggered the entry.
        index: usize,
        date: NaiveDate,
        price: f64,
    },
    Exit {
        index: usize,
        date: NaiveDate,
        price: f64,
        profit_pct: f64,
    },
    ForcedExit {
        index: usize,
        date: NaiveDate,
        price: f64,
        profit_pct: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub ledger: TradeLedger,
    pub events: Vec<TradeEvent>,
}

/// Run the two-state (Flat/Long) machine over `frames` and their signals.
pub fn run_backtest(
    frames: &[IndicatorFrame],
    signals: &[Signal],
) -> Result<BacktestResult, WeektraderError> {
    if frames.len() != signals.len() {
        return Err(WeektraderError::SignalLengthMismatch {
            frames: frames.len(),
            signals: signals.len(),
        });
    }

    let mut ledger = TradeLedger::new();
    let mut events = Vec::new();
    let mut state = PositionState::Flat;

    for (i, pair) in frames.windows(2).enumerate() {
        let next = &pair[1].bar;
        let signal = signals[i];

        state = match state {
            PositionState::Flat if signal.buy => {
                if next.open <= 0.0 || !next.open.is_finite() {
                    return Err(WeektraderError::InvalidBar {
                        date: next.date,
                        reason: format!("cannot enter at non-positive open {}", next.open),
                    });
                }
                debug!(index = i, date = %next.date, price = next.open, "enter long");
                events.push(TradeEvent::Enter {
                    index: i,
                    date: next.date,
                    price: next.open,
                });
                PositionState::Long {
                    entry_price: next.open,
                    entry_date: next.date,
                }
            }
            PositionState::Long {
                entry_price,
                entry_date,
            } if signal.sell => {
                let trade = Trade::close(
                    entry_price,
                    entry_date,
                    next.open,
                    next.date,
                    ExitReason::Signal,
                );
                debug!(
                    index = i,
                    date = %next.date,
                    price = next.open,
                    profit_pct = trade.profit_pct,
                    "exit long"
                );
                events.push(TradeEvent::Exit {
                    index: i,
                    date: next.date,
                    price: next.open,
                    profit_pct: trade.profit_pct,
                });
                ledger.record(trade);
                PositionState::Flat
            }
            unchanged => unchanged,
        };
    }

    debug!(open_at_end = state.is_long(), "signal loop finished");

    if let (
        PositionState::Long {
            entry_price,
            entry_date,
        },
        Some(last),
    ) = (state, frames.last())
    {
        let index = frames.len() - 1;
        let trade = Trade::close(
            entry_price,
            entry_date,
            last.bar.close,
            last.bar.date,
            ExitReason::EndOfData,
        );
        debug!(
            index,
            date = %last.bar.date,
            price = last.bar.close,
            profit_pct = trade.profit_pct,
            "forced exit at end of data"
        );
        events.push(TradeEvent::ForcedExit {
            index,
            date: last.bar.date,
            price: last.bar.close,
            profit_pct: trade.profit_pct,
        });
        ledger.record(trade);
    }

    info!(
        rows = frames.len(),
        trades = ledger.len(),
        cumulative_return_pct = ledger.last().map(|e| e.cumulative_return_pct),
        "backtest complete"
    );

    Ok(BacktestResult { ledger, events })
}
