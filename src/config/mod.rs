//! Rule-engine parameters and environment lookup.

use std::env;

/// Tunable policy for the signal rule engine.
///
/// `min_bars` is a warm-up safety margin (~2x the longest lookback) chosen
/// empirically, not a mathematically derived bound.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum bars required before any evaluation.
    pub min_bars: usize,
    /// Fast EMA span.
    pub fast_span: usize,
    /// Slow EMA span.
    pub slow_span: usize,
    /// ATR rolling-mean period.
    pub atr_period: usize,
    /// Trailing window used for the ATR median threshold.
    pub atr_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_bars: 120,
            fast_span: 12,
            slow_span: 26,
            atr_period: 14,
            atr_window: 60,
        }
    }
}

/// Deployment environment, used to pick the log formatter.
pub fn get_environment() -> String {
    env::var("QUANTLAB_ENV").unwrap_or_else(|_| "sandbox".to_string())
}
