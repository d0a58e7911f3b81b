//! EMA (Exponential Moving Average) indicator

/// Calculate the EMA series for a value series.
///
/// Uses the recursive trading-style form (not SMA-seeded):
/// `ema[0] = values[0]`, `ema[t] = alpha * values[t] + (1 - alpha) * ema[t-1]`
/// with `alpha = 2 / (span + 1)`.
///
/// The output has the same length as the input and is defined from the first
/// element, so there is no warm-up gap. Single forward pass, O(1) extra state.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(prev);

    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }

    out
}
