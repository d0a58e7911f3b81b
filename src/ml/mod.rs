//! Feature/label utilities for turning OHLCV history into ML inputs.
//!
//! Future hooks only: feature engineering, explicit label construction and
//! leakage-safe walk-forward splits live here. No model training or
//! inference does.

use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;

use crate::indicators::{atr, ema};
use crate::models::Bar;

/// Label construction method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelMethod {
    /// 1.0 when the next-day return is positive.
    NextDayDirection,
    /// 1.0 when the next-day return exceeds the threshold.
    ReturnThreshold(f64),
    /// 1.0 when the next-day return exceeds its own quantile.
    ReturnQuantile(f64),
}

/// One row of features aligned to a bar timestamp.
///
/// Every transform only uses information available up to its row; no future
/// values are referenced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub ret_1d: Option<f64>,
    pub ret_5d: Option<f64>,
    pub roll_mean_5: Option<f64>,
    pub roll_std_5: Option<f64>,
    pub roll_std_20: Option<f64>,
    pub ema_diff: f64,
    pub atr_14: Option<f64>,
    pub range_close: Option<f64>,
    pub volume_change_1d: Option<f64>,
    pub ema_diff_over_atr: Option<f64>,
}

impl FeatureRow {
    /// True when every optional feature is defined.
    pub fn is_complete(&self) -> bool {
        self.ret_1d.is_some()
            && self.ret_5d.is_some()
            && self.roll_mean_5.is_some()
            && self.roll_std_5.is_some()
            && self.roll_std_20.is_some()
            && self.atr_14.is_some()
            && self.range_close.is_some()
            && self.volume_change_1d.is_some()
            && self.ema_diff_over_atr.is_some()
    }
}

/// One complete feature + label row, ready for a learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MlRow {
    pub timestamp: DateTime<Utc>,
    pub features: FeatureRow,
    pub label: f64,
}

/// Describes one walk-forward train/test slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkForwardWindow {
    pub train_start: DateTime<Utc>,
    pub train_end: DateTime<Utc>,
    pub test_start: DateTime<Utc>,
    pub test_end: DateTime<Utc>,
}

/// Build the feature series from OHLCV bars, aligned index-for-index.
pub fn build_feature_frame(bars: &[Bar]) -> Vec<FeatureRow> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let ret_1d = pct_change(&closes, 1);
    let ret_5d = pct_change(&closes, 5);
    let roll_mean_5 = rolling_mean(&ret_1d, 5);
    let roll_std_5 = rolling_std(&ret_1d, 5);
    let roll_std_20 = rolling_std(&ret_1d, 20);

    let ema_fast = ema(&closes, 12);
    let ema_slow = ema(&closes, 26);
    let atr_14 = atr(bars, 14);
    let volume_change_1d = pct_change(&volumes, 1);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let ema_diff = ema_fast[i] - ema_slow[i];
            let range_close = if bar.close == 0.0 {
                None
            } else {
                Some((bar.high - bar.low) / bar.close)
            };
            let ema_diff_over_atr = match atr_14[i] {
                Some(a) if a != 0.0 => Some(ema_diff / a),
                _ => None,
            };

            FeatureRow {
                ret_1d: ret_1d[i],
                ret_5d: ret_5d[i],
                roll_mean_5: roll_mean_5[i],
                roll_std_5: roll_std_5[i],
                roll_std_20: roll_std_20[i],
                ema_diff,
                atr_14: atr_14[i],
                range_close,
                volume_change_1d: volume_change_1d[i],
                ema_diff_over_atr,
            }
        })
        .collect()
}

/// Build a supervised label series from close prices.
///
/// Labels are aligned to timestamp t and use the return from t -> t+1; the
/// last timestamp has no next-day return and stays `None`.
pub fn build_labels(bars: &[Bar], method: LabelMethod) -> Vec<Option<f64>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let next_ret: Vec<Option<f64>> = (0..closes.len())
        .map(|i| {
            if i + 1 < closes.len() && closes[i] != 0.0 {
                Some(closes[i + 1] / closes[i] - 1.0)
            } else {
                None
            }
        })
        .collect();

    let cutoff = match method {
        LabelMethod::NextDayDirection => 0.0,
        LabelMethod::ReturnThreshold(threshold) => threshold,
        LabelMethod::ReturnQuantile(q) => {
            let defined: Vec<f64> = next_ret.iter().flatten().copied().collect();
            match quantile(&defined, q) {
                Some(v) => v,
                None => return vec![None; closes.len()],
            }
        }
    };

    next_ret
        .iter()
        .map(|r| r.map(|ret| if ret > cutoff { 1.0 } else { 0.0 }))
        .collect()
}

/// One table of complete feature + label rows.
pub fn ml_table(bars: &[Bar], method: LabelMethod) -> Vec<MlRow> {
    let features = build_feature_frame(bars);
    let labels = build_labels(bars, method);

    bars.iter()
        .zip(features)
        .zip(labels)
        .filter_map(|((bar, row), label)| {
            let label = label?;
            if row.is_complete() {
                Some(MlRow {
                    timestamp: bar.timestamp,
                    features: row,
                    label,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Rolling walk-forward windows over a sorted timestamp index.
///
/// Each window is `train_months` followed by `test_months`, then rolled
/// forward by `test_months`. Train and test never overlap.
pub fn walk_forward_windows(
    timestamps: &[DateTime<Utc>],
    train_months: u32,
    test_months: u32,
) -> Vec<WalkForwardWindow> {
    let mut dates = timestamps.to_vec();
    dates.sort();

    let (Some(&start), Some(&end)) = (dates.first(), dates.last()) else {
        return Vec::new();
    };

    let mut windows = Vec::new();
    let mut cursor = start;

    loop {
        let train_end = cursor + Months::new(train_months) - Duration::days(1);
        let test_end = train_end + Months::new(test_months);
        if test_end > end {
            break;
        }

        let train: Vec<_> = dates
            .iter()
            .filter(|t| **t >= cursor && **t <= train_end)
            .collect();
        let test: Vec<_> = dates
            .iter()
            .filter(|t| **t > train_end && **t <= test_end)
            .collect();

        if let (Some(&&ts), Some(&&te), Some(&&vs), Some(&&ve)) =
            (train.first(), train.last(), test.first(), test.last())
        {
            windows.push(WalkForwardWindow {
                train_start: ts,
                train_end: te,
                test_start: vs,
                test_end: ve,
            });
        }

        cursor = cursor + Months::new(test_months);
    }

    windows
}

fn pct_change(values: &[f64], lag: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if i < lag || values[i - lag] == 0.0 {
                None
            } else {
                Some(v / values[i - lag] - 1.0)
            }
        })
        .collect()
}

fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        slice.iter().sum::<f64>() / slice.len() as f64
    })
}

fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        let mean = slice.iter().sum::<f64>() / slice.len() as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / slice.len() as f64;
        var.sqrt()
    })
}

fn rolling<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let mut slice = Vec::with_capacity(window);
            for v in &values[i + 1 - window..=i] {
                slice.push((*v)?);
            }
            Some(f(&slice))
        })
        .collect()
}

/// Linear-interpolation quantile of a value slice.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = pos - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}
