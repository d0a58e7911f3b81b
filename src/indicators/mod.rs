//! Pure mathematical transforms over a price series, no decision logic.
//!
//! Every function here returns a series aligned index-for-index with its
//! input. Warm-up entries with no defined value are modeled as `None`, never
//! as NaN sentinels.

pub mod trend;
pub mod volatility;

pub use trend::ema;
pub use volatility::{atr, true_range};
