//! Shared data models spanning the engine layers.

pub mod bars;
pub mod signal;

pub use bars::Bar;
pub use signal::{Metrics, Signal, SignalDecision};
