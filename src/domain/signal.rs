//! Per-row buy/sell signal evaluation.
//!
//! A signal depends only on its own row's indicator values and the
//! configured thresholds. Buy and sell may both be true on the same row;
//! the backtest state machine decides which one matters.

use super::config::Thresholds;
use super::indicator::IndicatorFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signal {
    pub buy: bool,
    pub sell: bool,
}

/// buy  = trend > trend_threshold AND momentum > osc_upper_band
/// sell = momentum < osc_upper_band
pub fn evaluate(frame: &IndicatorFrame, thresholds: &Thresholds) -> Signal {
    match (frame.trend_strength, frame.momentum) {
        (Some(trend), Some(momentum)) => Signal {
            buy: trend > thresholds.trend_threshold && momentum > thresholds.osc_upper_band,
            sell: momentum < thresholds.osc_upper_band,
        },
        _ => Signal::default(),
    }
}

pub fn generate_signals(frames: &[IndicatorFrame], thresholds: &Thresholds) -> Vec<Signal> {
    frames.iter().map(|f| evaluate(f, thresholds)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::WeeklyBar;
    use chrono::NaiveDate;

    fn frame(trend: Option<f64>, momentum: Option<f64>) -> IndicatorFrame {
        IndicatorFrame {
            bar: WeeklyBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 105.0,
                volume: 0.0,
            },
            trend_strength: trend,
            momentum,
        }
    }

    #[test]
    fn buy_requires_strong_trend_and_high_momentum() {
        let t = Thresholds::default();
        assert_eq!(
            evaluate(&frame(Some(45.0), Some(-10.0)), &t),
            Signal {
                buy: true,
                sell: false
            }
        );
        assert!(!evaluate(&frame(Some(35.0), Some(-10.0)), &t).buy);
        assert!(!evaluate(&frame(Some(45.0), Some(-30.0)), &t).buy);
    }

    #[test]
    fn thresholds_are_strict() {
        let t = Thresholds::default();
        let s = evaluate(&frame(Some(40.0), Some(-25.0)), &t);
        assert!(!s.buy);
        assert!(!s.sell);
    }

    #[test]
    fn sell_ignores_trend() {
        let t = Thresholds::default();
        let s = evaluate(&frame(Some(5.0), Some(-30.0)), &t);
        assert!(s.sell);
        assert!(!s.buy);
    }

    #[test]
    fn missing_indicator_gives_no_signal() {
        let t = Thresholds::default();
        assert_eq!(evaluate(&frame(None, Some(-90.0)), &t), Signal::default());
        assert_eq!(evaluate(&frame(Some(60.0), None), &t), Signal::default());
    }

    #[test]
    fn lower_band_does_not_affect_signals() {
        let base = Thresholds::default();
        let moved = Thresholds {
            osc_lower_band: -99.0,
            ..base
        };
        for f in [
            frame(Some(50.0), Some(-80.0)),
            frame(Some(50.0), Some(-10.0)),
        ] {
            assert_eq!(evaluate(&f, &base), evaluate(&f, &moved));
        }
    }

    #[test]
    fn custom_thresholds() {
        let t = Thresholds {
            trend_threshold: 20.0,
            osc_upper_band: -50.0,
            ..Thresholds::default()
        };
        let s = evaluate(&frame(Some(25.0), Some(-40.0)), &t);
        assert!(s.buy);
        assert!(!s.sell);
    }

    #[test]
    fn generate_signals_is_per_row() {
        let t = Thresholds::default();
        let frames = vec![
            frame(None, None),
            frame(Some(45.0), Some(-10.0)),
            frame(Some(50.0), Some(-30.0)),
        ];
        let signals = generate_signals(&frames, &t);
        assert_eq!(
            signals,
            vec![
                Signal::default(),
                Signal {
                    buy: true,
                    sell: false
                },
                Signal {
                    buy: false,
                    sell: true
                },
            ]
        );
    }
}
