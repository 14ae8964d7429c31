//! End-to-end analysis pipeline.
//!
//! aggregate -> attach indicators -> signals -> backtest -> evaluate, as one
//! synchronous batch over already-fetched daily bars.

use tracing::info;

use super::aggregate::aggregate;
use super::backtest::{run_backtest, TradeEvent};
use super::config::StrategyConfig;
use super::error::{InsufficientHistory, WeektraderError};
use super::indicator::{build_frames, IndicatorFrame};
use super::ledger::TradeLedger;
use super::metrics::{BuyAndHold, StrategyPerformance};
use super::ohlcv::OhlcvBar;
use super::signal::{generate_signals, Signal};
use crate::ports::indicator_port::IndicatorPort;

/// Fewest aggregated bars that can execute a trade (signal row + fill row).
pub const MIN_BARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub config: StrategyConfig,
    pub frames: Vec<IndicatorFrame>,
    pub signals: Vec<Signal>,
    pub ledger: TradeLedger,
    pub events: Vec<TradeEvent>,
    pub performance: StrategyPerformance,
    pub buy_and_hold: BuyAndHold,
    pub warning: Option<InsufficientHistory>,
}

pub fn run_analysis(
    daily: &[OhlcvBar],
    indicators: &dyn IndicatorPort,
    config: &StrategyConfig,
) -> Result<Analysis, WeektraderError> {
    let in_range: Vec<OhlcvBar> = daily
        .iter()
        .filter(|b| config.contains(b.date))
        .cloned()
        .collect();

    let weekly = aggregate(&in_range, config.aggregation_period)?;
    if weekly.len() < MIN_BARS {
        return Err(WeektraderError::InsufficientData {
            bars: weekly.len(),
            minimum: MIN_BARS,
        });
    }

    let trend = indicators.trend_strength(&weekly, config.trend_period)?;
    let momentum = indicators.momentum_oscillator(&weekly, config.momentum_lookback)?;
    let buy_and_hold = BuyAndHold::compute(&weekly)?;
    let frame_set = build_frames(weekly, &trend, &momentum)?;

    let signals = generate_signals(&frame_set.frames, &config.thresholds);
    let result = run_backtest(&frame_set.frames, &signals)?;
    let performance = StrategyPerformance::evaluate(&result.ledger);

    info!(
        daily = in_range.len(),
        bars = frame_set.frames.len(),
        trades = performance.total_trades(),
        buy_and_hold_pct = buy_and_hold.return_pct,
        "analysis complete"
    );

    Ok(Analysis {
        config: config.clone(),
        frames: frame_set.frames,
        signals,
        ledger: result.ledger,
        events: result.events,
        performance,
        buy_and_hold,
        warning: frame_set.warning,
    })
}
