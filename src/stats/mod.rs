//! Lightweight statistical helpers for financial time series.

use crate::error::StatsError;

/// Log returns `r_t = ln(P_t / P_{t-1})`.
///
/// The first entry has no predecessor and is `None`.
pub fn log_returns(prices: &[f64]) -> Vec<Option<f64>> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if i == 0 {
                None
            } else {
                Some((p / prices[i - 1]).ln())
            }
        })
        .collect()
}

/// Rolling volatility (population standard deviation) of a return series.
///
/// An output entry is defined only once the trailing window holds `window`
/// defined inputs; any undefined input inside the window yields `None`.
pub fn rolling_volatility(
    returns: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, StatsError> {
    if window == 0 {
        return Err(StatsError::InvalidWindow);
    }

    let out = returns
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let slice = &returns[i + 1 - window..=i];
            let mut values = Vec::with_capacity(window);
            for v in slice {
                values.push((*v)?);
            }
            let mean = values.iter().sum::<f64>() / window as f64;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window as f64;
            Some(var.sqrt())
        })
        .collect();

    Ok(out)
}

/// Sample autocorrelation function for lags `1..=max_lag`.
///
/// Undefined inputs are dropped before centering. A zero-variance series has
/// no defined autocorrelation at any lag.
pub fn autocorr(
    values: &[Option<f64>],
    max_lag: usize,
) -> Result<Vec<Option<f64>>, StatsError> {
    if max_lag < 1 {
        return Err(StatsError::InvalidLag);
    }

    let clean: Vec<f64> = values.iter().flatten().copied().collect();
    if clean.is_empty() {
        return Ok(Vec::new());
    }

    let mean = clean.iter().sum::<f64>() / clean.len() as f64;
    let centered: Vec<f64> = clean.iter().map(|v| v - mean).collect();
    let denom: f64 = centered.iter().map(|c| c * c).sum();
    if denom == 0.0 {
        return Ok(vec![None; max_lag]);
    }

    let mut out = Vec::with_capacity(max_lag);
    for lag in 1..=max_lag {
        if lag >= centered.len() {
            out.push(None);
            continue;
        }
        let numer: f64 = centered[lag..]
            .iter()
            .zip(&centered[..centered.len() - lag])
            .map(|(a, b)| a * b)
            .sum();
        out.push(Some(numer / denom));
    }

    Ok(out)
}
