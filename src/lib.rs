//! Quantlab: rule-based daily trading signals from OHLCV history.
//!
//! The core is an EMA(12/26) crossover gated by an ATR(14) volatility
//! regime, returning a decision with an auditable reasons trail. Around it
//! live the collaborators: market-data fetch, the versioned JSON report
//! contract, stats/backtest helpers and the ML feature/label hooks.

pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod ml;
pub mod models;
pub mod report;
pub mod signals;
pub mod stats;
