use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use ledger_core::models::TimeWindow;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rebuild a wallet's SOL balance history from enhanced transactions", long_about = None)]
pub struct Args {
    /// Wallet address whose activity is being narrated
    #[arg(short, long, env = "WALLET_ADDRESS")]
    pub address: String,

    /// JSON array of enhanced transaction events, newest first
    #[arg(short, long, env = "EVENTS_PATH")]
    pub events: PathBuf,

    /// Current SOL balance of the wallet
    #[arg(short, long, env = "SOL_BALANCE")]
    pub balance: Option<f64>,

    /// SOL price in USD
    #[arg(long, env = "SOL_PRICE")]
    pub sol_price: Option<f64>,

    /// JSON file with `tokens` and `prices` for the holdings summary
    #[arg(long, env = "HOLDINGS_PATH")]
    pub holdings: Option<PathBuf>,

    /// Chart window: 1, 3, 5, 10 or 30 days ("all")
    #[arg(short, long)]
    pub window: Option<TimeWindow>,

    /// History depth the events file covers. Defaults to the chart window
    #[arg(long)]
    pub fetched: Option<TimeWindow>,

    #[arg(long)]
    pub pretty: bool,
}

pub fn load_args() -> Args {
    dotenv().ok();
    Args::parse()
}
