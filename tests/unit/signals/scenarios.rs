//! Market-scenario tests for the rule engine

use chrono::{Duration, TimeZone, Utc};
use quantlab::models::{Bar, Signal};
use quantlab::signals::make_signal;

/// Bars with a fixed +-1.0 range; optionally the last bar's range is widened
/// by 15.0 so the ATR regime becomes active.
fn synthetic_bars(closes: &[f64], spike_last: bool) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut bars: Vec<Bar> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000.0,
                start + Duration::days(i as i64),
            )
        })
        .collect();

    if spike_last {
        if let Some(last) = bars.last_mut() {
            last.high = last.close + 15.0;
            last.low = last.close - 15.0;
        }
    }
    bars
}

fn linspace(from: f64, to: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| from + (to - from) * i as f64 / (n - 1) as f64)
        .collect()
}

#[test]
fn test_flat_then_spike_series_buys() {
    // Gentle downtrend for 126 bars, then a sharp jump with an inflated
    // last-bar range: the gate opens and EMA12 crosses above EMA26.
    let mut closes = linspace(100.0, 90.0, 126);
    closes.extend([90.0, 90.0, 90.0, 150.0]);
    let bars = synthetic_bars(&closes, true);

    let decision = make_signal(&bars).unwrap();
    assert!(decision.active);
    assert_eq!(decision.signal, Signal::Buy);
    assert_eq!(decision.reasons.len(), 3);
}

#[test]
fn test_flat_then_crash_series_sells() {
    let mut closes = linspace(90.0, 100.0, 126);
    closes.extend([100.0, 100.0, 100.0, 40.0]);
    let bars = synthetic_bars(&closes, true);

    let decision = make_signal(&bars).unwrap();
    assert!(decision.active);
    assert_eq!(decision.signal, Signal::Sell);
    assert_eq!(decision.reasons.len(), 3);
}

#[test]
fn test_monotonic_series_with_normal_range_holds() {
    // Steady climb with an ordinary daily range: ATR hugs its own rolling
    // median, the regime stays inactive and the engine holds.
    let closes: Vec<f64> = (0..130).map(|i| 100.0 + i as f64 * 0.5).collect();
    let bars = synthetic_bars(&closes, false);

    let decision = make_signal(&bars).unwrap();
    assert!(!decision.active);
    assert_eq!(decision.signal, Signal::Hold);
}

#[test]
fn test_percent_change_reflects_last_two_closes() {
    let mut closes = linspace(100.0, 90.0, 126);
    closes.extend([90.0, 90.0, 90.0, 150.0]);
    let bars = synthetic_bars(&closes, true);

    let decision = make_signal(&bars).unwrap();
    assert_eq!(decision.last_close, 150.0);
    assert_eq!(decision.prev_close, 90.0);
    assert!((decision.pct_change_1d - (150.0 / 90.0 - 1.0) * 100.0).abs() < 1e-9);
}
