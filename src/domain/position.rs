//! Position state and closed trades.

use chrono::NaiveDate;

/// Backtest position state. At most one position can be open, so `Long`
/// carries the only entry there is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Long {
        entry_price: f64,
        entry_date: NaiveDate,
    },
}

impl PositionState {
    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Sell signal, filled at the next bar's open.
    Signal,
    /// Still open on the last bar, closed at its close.
    EndOfData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit_pct: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    pub fn close(
        entry_price: f64,
        entry_date: NaiveDate,
        exit_price: f64,
        exit_date: NaiveDate,
        exit_reason: ExitReason,
    ) -> Self {
        Trade {
            entry_date,
            exit_date,
            entry_price,
            exit_price,
            profit_pct: profit_pct(entry_price, exit_price),
            exit_reason,
        }
    }

    pub fn is_win(&self) -> bool {
        self.profit_pct > 0.0
    }

    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}

/// (exit - entry) / entry * 100
pub fn profit_pct(entry_price: f64, exit_price: f64) -> f64 {
    (exit_price - entry_price) / entry_price * 100.0
}
