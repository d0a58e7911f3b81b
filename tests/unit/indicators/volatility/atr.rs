//! Unit tests for the ATR indicator

use chrono::{Duration, TimeZone, Utc};
use quantlab::indicators::{atr, true_range};
use quantlab::models::Bar;

fn make_bars(closes: &[f64], half_range: f64) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::new(
                close,
                close + half_range,
                close - half_range,
                close,
                1_000.0,
                start + Duration::days(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_atr_warmup_region_is_undefined() {
    let closes: Vec<f64> = (0..130).map(|i| 100.0 + i as f64 * 0.1).collect();
    let bars = make_bars(&closes, 1.0);
    let out = atr(&bars, 14);

    assert_eq!(out.len(), bars.len());
    assert!(out[..13].iter().all(|v| v.is_none()));
    assert!(out[13..].iter().all(|v| v.is_some()));
}

#[test]
fn test_atr_is_non_negative_where_defined() {
    let closes: Vec<f64> = (0..130).map(|i| 100.0 + i as f64 * 0.15).collect();
    let bars = make_bars(&closes, 1.0);
    let out = atr(&bars, 14);
    assert!(out.iter().flatten().all(|&v| v >= 0.0));
}

#[test]
fn test_first_bar_true_range_reduces_to_high_low() {
    let bars = make_bars(&[100.0], 2.5);
    let out = atr(&bars, 1);
    assert_eq!(out[0], Some(5.0));
}

#[test]
fn test_true_range_uses_gap_from_previous_close() {
    // A gap up: |high - prev_close| dominates high - low.
    let tr = true_range(120.0, 118.0, Some(100.0));
    assert_eq!(tr, 20.0);

    // A gap down: |low - prev_close| dominates.
    let tr = true_range(82.0, 80.0, Some(100.0));
    assert_eq!(tr, 20.0);

    // No previous close: plain bar range.
    let tr = true_range(105.0, 95.0, None);
    assert_eq!(tr, 10.0);
}

#[test]
fn test_atr_constant_range_series() {
    // Small steps keep the bar range as the max term, so ATR is exactly 2.0.
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
    let bars = make_bars(&closes, 1.0);
    let out = atr(&bars, 14);
    assert!(out.iter().flatten().all(|&v| (v - 2.0).abs() < 1e-9));
}
