pub mod ema;

pub use ema::ema;
