//! Core domain types and logic.

pub mod ohlcv;
pub mod aggregate;
pub mod indicator;
pub mod signal;
pub mod position;
pub mod ledger;
pub mod backtest;
pub mod metrics;
pub mod config;
pub mod config_validation;
pub mod analysis;
pub mod error;
