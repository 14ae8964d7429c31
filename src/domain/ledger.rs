//! Append-only trade ledger with compounded returns.

use super::position::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub trade: Trade,
    /// (prod(1 + p/100) - 1) * 100 over all trades up to and including this one.
    pub cumulative_return_pct: f64,
}

/// Trades in exit order. Entries cannot be modified once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLedger {
    entries: Vec<LedgerEntry>,
    growth: f64,
}

impl TradeLedger {
    pub fn new() -> Self {
        TradeLedger {
            entries: Vec::new(),
            growth: 1.0,
        }
    }

    pub fn record(&mut self, trade: Trade) {
        self.growth *= 1.0 + trade.profit_pct / 100.0;
        self.entries.push(LedgerEntry {
            trade,
            cumulative_return_pct: (self.growth - 1.0) * 100.0,
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn trades(&self) -> impl Iterator<Item = &Trade> {
        self.entries.iter().map(|e| &e.trade)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }
}

impl Default for TradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::ExitReason;
    use chrono::{Duration, NaiveDate};

    fn trade(i: i64, pct: f64) -> Trade {
        let entry_date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap() + Duration::weeks(i * 2);
        Trade::close(
            100.0,
            entry_date,
            100.0 + pct,
            entry_date + Duration::weeks(1),
            ExitReason::Signal,
        )
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = TradeLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.last().is_none());
    }

    #[test]
    fn default_ledger_compounds_from_one() {
        let mut ledger = TradeLedger::default();
        ledger.record(trade(0, 10.0));
        assert!((ledger.entries()[0].cumulative_return_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_return_compounds() {
        let mut ledger = TradeLedger::new();
        ledger.record(trade(0, 10.0));
        ledger.record(trade(1, -10.0));
        ledger.record(trade(2, 5.0));

        let cum: Vec<f64> = ledger
            .entries()
            .iter()
            .map(|e| e.cumulative_return_pct)
            .collect();
        assert!((cum[0] - 10.0).abs() < 1e-9);
        assert!((cum[1] - (-1.0)).abs() < 1e-9);
        assert!((cum[2] - 3.95).abs() < 1e-9);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut ledger = TradeLedger::new();
        for i in 0..4 {
            ledger.record(trade(i, i as f64));
        }
        let dates: Vec<_> = ledger.trades().map(|t| t.exit_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(ledger.len(), 4);
    }
}
