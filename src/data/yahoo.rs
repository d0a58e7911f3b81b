//! Yahoo Finance chart-API market data provider.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::DataError;
use crate::models::Bar;

use super::MarketDataProvider;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Base URL is injectable so tests can point the provider at a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("quantlab/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, base_url }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_ohlc(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", period),
                ("interval", interval),
                ("includePrePost", "false"),
                ("events", "div,splits"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChartResponse = response.json().await?;
        let bars = normalize(symbol, parsed)?;
        debug!(symbol, bars = bars.len(), "normalized chart response");
        Ok(bars)
    }
}

/// Flatten the chart response into cleaned bars.
///
/// Mirrors the normalization contract the core relies on: High/Low/Close are
/// required, rows with any missing field are dropped, and an empty result is
/// an error rather than an empty series.
fn normalize(symbol: &str, response: ChartResponse) -> Result<Vec<Bar>, DataError> {
    if let Some(err) = response.chart.error {
        return Err(DataError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("{}: {}", err.code, err.description),
        });
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| DataError::Empty(symbol.to_string()))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Empty(symbol.to_string()))?;

    let mut missing = Vec::new();
    if quote.high.is_none() {
        missing.push("High");
    }
    if quote.low.is_none() {
        missing.push("Low");
    }
    if quote.close.is_none() {
        missing.push("Close");
    }
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            symbol: symbol.to_string(),
            missing: missing.join(", "),
        });
    }

    let high = quote.high.unwrap_or_default();
    let low = quote.low.unwrap_or_default();
    let close = quote.close.unwrap_or_default();
    let open_col = quote.open;
    let volume_col = quote.volume;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        // Drop rows with any missing field so downstream indicators stay
        // deterministic. A column the response omits entirely is not a row
        // gap: open falls back to close, volume to zero.
        let (h, l, c) = match (value_at(&high, i), value_at(&low, i), value_at(&close, i)) {
            (Some(h), Some(l), Some(c)) => (h, l, c),
            _ => continue,
        };
        let open = match &open_col {
            Some(col) => match value_at(col, i) {
                Some(v) => v,
                None => continue,
            },
            None => c,
        };
        let volume = match &volume_col {
            Some(col) => match value_at(col, i) {
                Some(v) => v,
                None => continue,
            },
            None => 0.0,
        };
        let timestamp = match Utc.timestamp_opt(ts, 0).single() {
            Some(t) => t,
            None => continue,
        };

        bars.push(Bar::new(open, h, l, c, volume, timestamp));
    }

    if bars.is_empty() {
        return Err(DataError::Empty(symbol.to_string()));
    }
    Ok(bars)
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}
