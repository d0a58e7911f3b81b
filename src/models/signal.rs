use serde::{Deserialize, Serialize};

/// Discrete trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "HOLD")]
    Hold,
}

/// Supplemental metrics used for explainability and downstream automation.
///
/// `reasons` on [`SignalDecision`] is trimmed for UI readability; this record
/// always keeps the full numeric detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub atr: f64,
    pub atr_thresh: f64,
    pub ema_diff: f64,
}

/// Output of one rule-engine evaluation.
///
/// Created once per call and immutable afterwards; the report contract layer
/// wraps it for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub last_close: f64,
    pub prev_close: f64,
    pub pct_change_1d: f64,
    pub active: bool,
    pub signal: Signal,
    pub reasons: Vec<String>,
    pub metrics: Metrics,
}
