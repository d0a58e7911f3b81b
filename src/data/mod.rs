//! Market data collaborator: fetch and normalize OHLCV history.
//!
//! Fetching, non-emptiness validation, field normalization and dropping of
//! incomplete rows all happen here, before a series is handed to the core.
//! Retries and timeouts belong here too, never inside the rule engine.

pub mod yahoo;

use async_trait::async_trait;

use crate::error::DataError;
use crate::models::Bar;

pub use yahoo::YahooProvider;

#[async_trait]
pub trait MarketDataProvider {
    /// Fetch cleaned daily bars for a symbol, ordered by time.
    async fn fetch_ohlc(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, DataError>;
}
