//! Signal evaluation interfaces.

pub mod engine;

pub use engine::{detect_cross, make_signal, Cross, SignalEngine};
