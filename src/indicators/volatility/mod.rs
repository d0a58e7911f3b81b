pub mod atr;

pub use atr::{atr, atr_default, true_range};
