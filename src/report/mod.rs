//! Versioned JSON report contract.
//!
//! Compatibility design: old consumers expect one-symbol flat keys at the
//! document root (symbol, signal, reasons...), new consumers can additionally
//! rely on `generated_at`/`engine_version`/`as_of` and the nested `metrics`
//! object. Both shapes live in one document, which is why `SymbolSignal` is
//! flattened into `SignalReport` on serialization.

use chrono::{FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Metrics, Signal, SignalDecision};

pub const ENGINE_VERSION: &str = "v0";

/// A single symbol's signal payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSignal {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    pub last_close: f64,
    pub prev_close: f64,
    pub pct_change_1d: f64,
    pub active: bool,
    pub signal: Signal,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub metrics: Metrics,
}

impl SymbolSignal {
    /// Wrap an engine decision with the request context it was produced for.
    pub fn from_decision(
        symbol: &str,
        period: &str,
        interval: &str,
        decision: SignalDecision,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
            last_close: decision.last_close,
            prev_close: decision.prev_close,
            pct_change_1d: decision.pct_change_1d,
            active: decision.active,
            signal: decision.signal,
            reasons: decision.reasons,
            metrics: decision.metrics,
        }
    }
}

/// Root contract for `outputs/signals.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub generated_at: String,
    #[serde(default = "default_engine_version")]
    pub engine_version: String,
    #[serde(default)]
    pub as_of: String,
    #[serde(flatten)]
    pub signal: SymbolSignal,
}

fn default_engine_version() -> String {
    ENGINE_VERSION.to_string()
}

/// Current time at the fixed UTC+9 reporting offset, ISO-8601 to seconds.
pub fn jst_now_iso() -> String {
    let jst = FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset");
    Utc::now()
        .with_timezone(&jst)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Serialize the contract, keeping legacy flat keys at the root.
pub fn to_json(report: &SignalReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Deserialize the compatibility flat shape emitted by [`to_json`].
///
/// Legacy documents may omit `engine_version` (defaults to "v0"), `as_of`
/// (falls back to `generated_at`), `reasons` and `metrics`.
pub fn from_json(raw: &str) -> Result<SignalReport, serde_json::Error> {
    let mut report: SignalReport = serde_json::from_str(raw)?;
    if report.as_of.is_empty() {
        report.as_of = report.generated_at.clone();
    }
    Ok(report)
}
