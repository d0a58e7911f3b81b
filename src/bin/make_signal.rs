//! Generate an EMA/ATR signal JSON report for one symbol.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use quantlab::data::{MarketDataProvider, YahooProvider};
use quantlab::logging;
use quantlab::report::{self, SignalReport, SymbolSignal};
use quantlab::signals::make_signal;

#[derive(Parser, Debug)]
#[command(name = "make-signal", about = "Generate EMA/ATR signal JSON for one symbol")]
struct Args {
    /// Ticker symbol (e.g., 1306.T, QQQ)
    #[arg(long)]
    symbol: String,

    /// Data range to fetch
    #[arg(long, default_value = "2y")]
    period: String,

    /// Bar interval
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Output JSON path
    #[arg(long, default_value = "outputs/signals.json")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    logging::init_logging();

    let args = Args::parse();

    let provider = YahooProvider::new();
    let bars = provider
        .fetch_ohlc(&args.symbol, &args.period, &args.interval)
        .await?;
    info!(symbol = %args.symbol, bars = bars.len(), "fetched OHLCV history");

    let decision = make_signal(&bars)?;
    let as_of = bars
        .last()
        .map(|b| b.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    // Contract object is explicit so fields can evolve safely without ad-hoc
    // key edits downstream.
    let signal = SymbolSignal::from_decision(&args.symbol, &args.period, &args.interval, decision);
    let report = SignalReport {
        generated_at: report::jst_now_iso(),
        engine_version: report::ENGINE_VERSION.to_string(),
        as_of,
        signal,
    };

    if let Some(parent) = args.out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, report::to_json(&report)?)?;

    info!(path = %args.out.display(), "wrote signal report");
    Ok(())
}
