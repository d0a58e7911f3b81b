//! ATR (Average True Range) indicator

use crate::models::Bar;

/// True range of one bar given the previous close.
///
/// Max of high-low, |high-prev_close| and |low-prev_close|. The very first
/// bar has no previous close, so its true range reduces to high-low.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let mut tr = high - low;
    if let Some(pc) = prev_close {
        tr = tr.max((high - pc).abs()).max((low - pc).abs());
    }
    tr
}

/// Calculate the ATR series for a bar series.
///
/// ATR is the simple rolling mean of true range over `period` bars. The
/// first `period - 1` entries are `None` (insufficient window). Output is
/// aligned index-for-index with the input; O(n) via a sliding-window sum.
pub fn atr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(bars.len());
    let mut window_sum = 0.0;
    let mut trs = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let prev_close = if i == 0 { None } else { Some(bars[i - 1].close) };
        let tr = true_range(bar.high, bar.low, prev_close);
        trs.push(tr);

        window_sum += tr;
        if i >= period {
            window_sum -= trs[i - period];
        }

        if i + 1 >= period {
            out.push(Some(window_sum / period as f64));
        } else {
            out.push(None);
        }
    }

    out
}

/// ATR with the conventional default period (14).
pub fn atr_default(bars: &[Bar]) -> Vec<Option<f64>> {
    atr(bars, 14)
}
