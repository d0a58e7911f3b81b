//! Unit tests for the ML feature/label hooks

use chrono::{DateTime, Duration, TimeZone, Utc};
use quantlab::ml::{
    build_feature_frame, build_labels, ml_table, walk_forward_windows, LabelMethod,
};
use quantlab::models::Bar;

fn daily_bars(closes: &[f64]) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                1_000.0 + i as f64,
                start + Duration::days(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_feature_frame_is_aligned_and_leakage_safe() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
    let bars = daily_bars(&closes);
    let features = build_feature_frame(&bars);

    assert_eq!(features.len(), bars.len());
    // Nothing at index 0 can reference a predecessor.
    assert!(features[0].ret_1d.is_none());
    assert!(features[0].volume_change_1d.is_none());
    // EMA spread is defined from the first element.
    assert!(features.iter().all(|f| f.ema_diff.is_finite()));
    // ATR warm-up region stays undefined.
    assert!(features[..13].iter().all(|f| f.atr_14.is_none()));
    assert!(features[13..].iter().all(|f| f.atr_14.is_some()));
}

#[test]
fn test_next_day_direction_labels() {
    let bars = daily_bars(&[1.0, 2.0, 1.0]);
    let labels = build_labels(&bars, LabelMethod::NextDayDirection);

    assert_eq!(labels[0], Some(1.0));
    assert_eq!(labels[1], Some(0.0));
    // Last timestamp has no next-day return.
    assert_eq!(labels[2], None);
}

#[test]
fn test_threshold_labels() {
    let bars = daily_bars(&[100.0, 101.0, 110.0, 110.0]);
    let labels = build_labels(&bars, LabelMethod::ReturnThreshold(0.05));

    assert_eq!(labels[0], Some(0.0)); // +1% below threshold
    assert_eq!(labels[1], Some(1.0)); // +8.9% above threshold
    assert_eq!(labels[2], Some(0.0)); // flat
    assert_eq!(labels[3], None);
}

#[test]
fn test_ml_table_keeps_only_complete_rows() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.4).cos()).collect();
    let bars = daily_bars(&closes);

    let table = ml_table(&bars, LabelMethod::NextDayDirection);
    assert!(!table.is_empty());
    assert!(table.len() < bars.len());
    assert!(table.iter().all(|row| row.features.is_complete()));
    assert!(table
        .iter()
        .all(|row| row.label == 0.0 || row.label == 1.0));
    // The final bar can never appear: it has no label.
    let last_ts = bars.last().unwrap().timestamp;
    assert!(table.iter().all(|row| row.timestamp != last_ts));
}

#[test]
fn test_walk_forward_windows_roll_without_overlap() {
    let timestamps: Vec<DateTime<Utc>> = (0..400)
        .map(|i| {
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i)
        })
        .collect();

    let windows = walk_forward_windows(&timestamps, 6, 1);
    assert!(windows.len() >= 4);

    for w in &windows {
        assert!(w.train_start <= w.train_end);
        assert!(w.train_end < w.test_start);
        assert!(w.test_start <= w.test_end);
    }
    for pair in windows.windows(2) {
        // Each window rolls forward by the test span.
        assert!(pair[1].train_start > pair[0].train_start);
        assert!(pair[1].test_start > pair[0].test_start);
    }
}

#[test]
fn test_walk_forward_empty_index() {
    assert!(walk_forward_windows(&[], 6, 1).is_empty());
}
