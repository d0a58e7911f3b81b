//! Signal rule engine: ATR activity gate + EMA crossover decision.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::SignalError;
use crate::indicators::{atr, ema};
use crate::models::{Bar, Metrics, Signal, SignalDecision};

/// Outcome of comparing the EMA spread across two consecutive bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cross {
    Up,
    Down,
    None,
}

/// Detect an EMA cross between the prior and latest spread values.
///
/// A spread that is exactly zero on both bars takes the `None` branch: the
/// up/down arms require strict inequality on the latest value.
pub fn detect_cross(diff_prev: f64, diff_last: f64) -> Cross {
    if diff_prev <= 0.0 && diff_last > 0.0 {
        Cross::Up
    } else if diff_prev >= 0.0 && diff_last < 0.0 {
        Cross::Down
    } else {
        Cross::None
    }
}

/// Stateless rule engine; each evaluation is a pure function of its input.
pub struct SignalEngine {
    config: EngineConfig,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate one bar series into a decision with an auditable rationale.
    ///
    /// Rule summary:
    /// - Active regime: latest ATR above the median of ATR over the trailing
    ///   window (fallback: median over the whole series).
    /// - Trigger: fast/slow EMA cross on the latest bar, only when active.
    /// - `reasons` is trimmed to the top 3 for UI readability; `metrics`
    ///   keeps the full numeric detail.
    pub fn evaluate(&self, bars: &[Bar]) -> Result<SignalDecision, SignalError> {
        let cfg = &self.config;

        if bars.len() < cfg.min_bars {
            return Err(SignalError::InsufficientHistory {
                got: bars.len(),
                need: cfg.min_bars,
            });
        }
        if let Some(pos) = bars.iter().position(|b| !b.has_finite_prices()) {
            return Err(SignalError::MalformedSeries(format!(
                "non-finite High/Low/Close at index {pos}"
            )));
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let ema_fast = ema(&closes, cfg.fast_span);
        let ema_slow = ema(&closes, cfg.slow_span);
        let atr_series = atr(bars, cfg.atr_period);

        let last = bars.len() - 1;
        let atr_last = atr_series[last].ok_or(SignalError::InsufficientHistory {
            got: bars.len(),
            need: cfg.atr_period,
        })?;

        // Self-relative rolling median rather than a fixed absolute cutoff:
        // an absolute threshold does not generalize across symbols and price
        // levels, the median adapts per instrument and per regime.
        let window_start = bars.len().saturating_sub(cfg.atr_window);
        let recent: Vec<f64> = atr_series[window_start..].iter().flatten().copied().collect();
        let atr_thresh = match median(&recent) {
            Some(m) => m,
            None => {
                let all: Vec<f64> = atr_series.iter().flatten().copied().collect();
                median(&all).ok_or(SignalError::InsufficientHistory {
                    got: bars.len(),
                    need: cfg.atr_period,
                })?
            }
        };

        let active = atr_last > atr_thresh;

        let ema_diff_last = ema_fast[last] - ema_slow[last];
        let ema_diff_prev = ema_fast[last - 1] - ema_slow[last - 1];

        let mut signal = Signal::Hold;
        let mut reasons = vec![
            format!(
                "ATR({})={:.4} vs thresh(median{})={:.4}",
                cfg.atr_period, atr_last, cfg.atr_window, atr_thresh
            ),
            format!(
                "EMA{}-EMA{}={:.4} (prev {:.4})",
                cfg.fast_span, cfg.slow_span, ema_diff_last, ema_diff_prev
            ),
        ];

        if !active {
            // Inactive regime overrides any cross geometry.
            reasons.insert(
                0,
                format!("ATR({}) below threshold → Inactive", cfg.atr_period),
            );
            reasons.push("No trade: inactive regime".to_string());
        } else {
            reasons.insert(
                0,
                format!("ATR({}) above threshold → Active", cfg.atr_period),
            );
            match detect_cross(ema_diff_prev, ema_diff_last) {
                Cross::Up => {
                    signal = Signal::Buy;
                    reasons.push(format!(
                        "EMA({}) crossed above EMA({})",
                        cfg.fast_span, cfg.slow_span
                    ));
                }
                Cross::Down => {
                    signal = Signal::Sell;
                    reasons.push(format!(
                        "EMA({}) crossed below EMA({})",
                        cfg.fast_span, cfg.slow_span
                    ));
                }
                Cross::None => reasons.push("No EMA cross".to_string()),
            }
        }

        let last_close = closes[last];
        let prev_close = closes[last - 1];
        if prev_close == 0.0 {
            return Err(SignalError::DegenerateInput(
                "previous close is zero, pct_change_1d is undefined".to_string(),
            ));
        }
        let pct_change_1d = (last_close / prev_close - 1.0) * 100.0;

        reasons.truncate(3);

        debug!(
            ?signal,
            active,
            atr = atr_last,
            atr_thresh,
            ema_diff = ema_diff_last,
            "signal evaluated"
        );

        Ok(SignalDecision {
            last_close,
            prev_close,
            pct_change_1d,
            active,
            signal,
            reasons,
            metrics: Metrics {
                atr: atr_last,
                atr_thresh,
                ema_diff: ema_diff_last,
            },
        })
    }
}

/// Generate a signal with the default rule parameters.
pub fn make_signal(bars: &[Bar]) -> Result<SignalDecision, SignalError> {
    SignalEngine::new(EngineConfig::default()).evaluate(bars)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
