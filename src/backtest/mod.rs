//! Minimal backtesting helpers for research runs.
//!
//! Intentionally small: position mapping, next-day realized returns and a
//! deterministic performance summary for side-by-side parameter comparisons.

use serde::Serialize;

use crate::models::Signal;

/// Generate a continuous exposure series from discrete decisions.
///
/// BUY maps to 1.0, SELL to -1.0, HOLD keeps the previous exposure (not
/// necessarily flat). Before the first explicit signal the position is flat.
pub fn positions_from_signals(signals: &[Signal]) -> Vec<f64> {
    let mut position = 0.0;
    signals
        .iter()
        .map(|s| {
            match s {
                Signal::Buy => position = 1.0,
                Signal::Sell => position = -1.0,
                Signal::Hold => {}
            }
            position
        })
        .collect()
}

/// Next-day realized strategy returns from positions.
///
/// To avoid future leakage the position at t is decided with information up
/// to t and the realized return runs close(t) -> close(t+1). The final entry
/// has no next close and is `None`, as is any entry whose close is zero (no
/// defined return rather than a propagated infinity).
pub fn strategy_returns(closes: &[f64], positions: &[f64]) -> Vec<Option<f64>> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            if i + 1 >= closes.len() || close == 0.0 {
                return None;
            }
            let position = positions.get(i).copied().unwrap_or(0.0);
            Some(position * (closes[i + 1] / close - 1.0))
        })
        .collect()
}

/// Key performance metrics for one return stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub n: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub hit_rate: Option<f64>,
    pub avg_win: Option<f64>,
    pub avg_loss: Option<f64>,
    pub expectancy: Option<f64>,
    /// Annualized mean/std ratio (sqrt(252)); undefined for zero variance.
    pub sharpe_like: Option<f64>,
    pub cum_return: Option<f64>,
    pub max_drawdown: Option<f64>,
}

/// Summarize a return stream, skipping undefined entries.
pub fn summarize_performance(returns: &[Option<f64>]) -> PerformanceSummary {
    let clean: Vec<f64> = returns.iter().flatten().copied().collect();
    if clean.is_empty() {
        return PerformanceSummary {
            n: 0,
            mean: None,
            std: None,
            hit_rate: None,
            avg_win: None,
            avg_loss: None,
            expectancy: None,
            sharpe_like: None,
            cum_return: None,
            max_drawdown: None,
        };
    }

    let n = clean.len();
    let mean = clean.iter().sum::<f64>() / n as f64;
    let var = clean.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n as f64;
    let std = var.sqrt();

    let wins: Vec<f64> = clean.iter().copied().filter(|r| *r > 0.0).collect();
    let losses: Vec<f64> = clean.iter().copied().filter(|r| *r < 0.0).collect();
    let p_win = wins.len() as f64 / n as f64;
    let p_loss = losses.len() as f64 / n as f64;
    let avg_win = if wins.is_empty() {
        0.0
    } else {
        wins.iter().sum::<f64>() / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        losses.iter().sum::<f64>() / losses.len() as f64
    };
    let expectancy = p_win * avg_win + p_loss * avg_loss;

    let sharpe_like = if std > 0.0 {
        Some(mean / std * 252.0_f64.sqrt())
    } else {
        None
    };

    let mut equity = 1.0;
    let mut peak = 1.0_f64;
    let mut max_drawdown = 0.0_f64;
    for r in &clean {
        equity *= 1.0 + r;
        peak = peak.max(equity);
        max_drawdown = max_drawdown.min(equity / peak - 1.0);
    }

    PerformanceSummary {
        n,
        mean: Some(mean),
        std: Some(std),
        hit_rate: Some(p_win),
        avg_win: Some(avg_win),
        avg_loss: Some(avg_loss),
        expectancy: Some(expectancy),
        sharpe_like,
        cum_return: Some(equity - 1.0),
        max_drawdown: Some(max_drawdown),
    }
}
