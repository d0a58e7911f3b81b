//! Typed error taxonomy for the signal core and its collaborators.

use thiserror::Error;

/// Failures raised by the signal rule engine.
///
/// The engine never recovers from these locally; each invocation either
/// returns a fully populated decision or a typed error, never a sentinel.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Fewer bars than the warm-up policy requires.
    #[error("not enough data: got {got} bars, need at least {need}")]
    InsufficientHistory { got: usize, need: usize },

    /// Contract violation by the data collaborator, e.g. non-finite prices.
    #[error("malformed price series: {0}")]
    MalformedSeries(String),

    /// Input that would force a non-finite result, e.g. a zero previous close.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Failures raised by market-data providers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch data for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("no usable rows returned for {0}")]
    Empty(String),

    #[error("missing required price columns for {symbol}: {missing}")]
    MissingColumns { symbol: String, missing: String },
}

/// Failures raised by the statistics helpers.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("window must be a positive integer")]
    InvalidWindow,

    #[error("max_lag must be >= 1")]
    InvalidLag,
}
