//! Strategy performance and the buy-and-hold baseline.

use chrono::NaiveDate;

use super::error::WeektraderError;
use super::ledger::TradeLedger;
use super::ohlcv::WeeklyBar;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate_pct: f64,
    pub cumulative_return_pct: f64,
    pub avg_profit_pct: f64,
    pub best_trade_pct: f64,
    pub worst_trade_pct: f64,
    pub avg_holding_days: f64,
}

/// An empty ledger is reported as `NoTrades` rather than as zero rates.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyPerformance {
    NoTrades,
    Traded(TradeStats),
}

impl StrategyPerformance {
    pub fn evaluate(ledger: &TradeLedger) -> Self {
        if ledger.is_empty() {
            return StrategyPerformance::NoTrades;
        }

        let mut winning_trades = 0usize;
        let mut losing_trades = 0usize;
        let mut growth = 1.0_f64;
        let mut total_profit = 0.0_f64;
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut total_days = 0i64;

        for trade in ledger.trades() {
            let p = trade.profit_pct;
            if p > 0.0 {
                winning_trades += 1;
            } else if p < 0.0 {
                losing_trades += 1;
            }
            growth *= 1.0 + p / 100.0;
            total_profit += p;
            best = best.max(p);
            worst = worst.min(p);
            total_days += trade.holding_days();
        }

        let total_trades = ledger.len();
        let n = total_trades as f64;

        StrategyPerformance::Traded(TradeStats {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate_pct: winning_trades as f64 / n * 100.0,
            cumulative_return_pct: (growth - 1.0) * 100.0,
            avg_profit_pct: total_profit / n,
            best_trade_pct: best,
            worst_trade_pct: worst,
            avg_holding_days: total_days as f64 / n,
        })
    }

    pub fn stats(&self) -> Option<&TradeStats> {
        match self {
            StrategyPerformance::NoTrades => None,
            StrategyPerformance::Traded(stats) => Some(stats),
        }
    }

    pub fn total_trades(&self) -> usize {
        self.stats().map_or(0, |s| s.total_trades)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyAndHoldPoint {
    pub date: NaiveDate,
    pub cumulative_return_pct: f64,
}

/// Passive baseline over the full bar series, independent of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyAndHold {
    /// (last close - first open) / first open * 100
    pub return_pct: f64,
    /// (close / first open - 1) * 100 for every bar.
    pub series: Vec<BuyAndHoldPoint>,
}

impl BuyAndHold {
    pub fn compute(bars: &[WeeklyBar]) -> Result<Self, WeektraderError> {
        let (first, last) = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(WeektraderError::EmptyInput),
        };
        if first.open <= 0.0 {
            return Err(WeektraderError::InvalidBar {
                date: first.date,
                reason: "first open must be positive".into(),
            });
        }
        let base = first.open;

        let series = bars
            .iter()
            .map(|b| BuyAndHoldPoint {
                date: b.date,
                cumulative_return_pct: (b.close / base - 1.0) * 100.0,
            })
            .collect();

        Ok(BuyAndHold {
            return_pct: (last.close - base) / base * 100.0,
            series,
        })
    }
}
