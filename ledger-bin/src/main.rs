mod args;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use ledger_core::{
    config::LedgerConfig,
    models::{decode_feed_str, TimeWindow},
    pipeline::{TimelineRequest, WalletTimeline},
    portfolio::{summarize, TokenHolding},
    symbols::KnownTokens,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Deserialize)]
struct HoldingsFile {
    #[serde(default)]
    tokens: Vec<TokenHolding>,
    #[serde(default)]
    prices: HashMap<String, f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::load_args();

    // stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = LedgerConfig::from_env()?;
    tracing::info!("Starting ledger with config: {:?}", config.runtime);

    let (events, holdings) = tokio::try_join!(
        read_events(&args.events),
        read_holdings(args.holdings.as_deref()),
    )?;

    let window = args
        .window
        .unwrap_or_else(|| TimeWindow::from_days_or_default(config.chart.default_window_days));
    let mut request = TimelineRequest::new(&args.address, &events)
        .current_balance(args.balance)
        .sol_price(args.sol_price)
        .window(window);
    if let Some(fetched) = args.fetched {
        request = request.fetched_window(fetched);
    }

    let timeline = WalletTimeline::build_with(request, &KnownTokens, &config, chrono::Utc::now())?;
    let activity = timeline.report();
    let wallet = summarize(
        activity.sol_balance,
        args.sol_price,
        &holdings.tokens,
        &holdings.prices,
        &KnownTokens,
    );

    if activity.clamped_points > 0 {
        tracing::warn!(
            clamped = activity.clamped_points,
            "balance history was clamped at zero; fetched events may be incomplete"
        );
    }

    let output = serde_json::json!({ "wallet": wallet, "activity": activity });
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}

async fn read_events(path: &Path) -> Result<Vec<ledger_core::models::RawTransactionEvent>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    let events = decode_feed_str(&text)
        .with_context(|| format!("{} is not a JSON array of events", path.display()))?;
    tracing::debug!(count = events.len(), "decoded events");
    Ok(events)
}

async fn read_holdings(path: Option<&Path>) -> Result<HoldingsFile> {
    let Some(path) = path else {
        return Ok(HoldingsFile::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read holdings from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid holdings file {}", path.display()))
}
