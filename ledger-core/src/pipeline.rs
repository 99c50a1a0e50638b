// Wallet timeline facade: normalize, reconstruct, join and chart in one call.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::prepare_with;
use crate::config::LedgerConfig;
use crate::error::PipelineError;
use crate::history::reconstruct_with;
use crate::models::{BalancePoint, CanonicalTransaction, RawTransactionEvent, TimeWindow};
use crate::normalizer::normalize_with;
use crate::symbols::SymbolResolver;

/// Inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct TimelineRequest<'a> {
    pub address: &'a str,
    pub events: &'a [RawTransactionEvent],
    pub current_balance: Option<f64>,
    pub sol_price: Option<f64>,
    pub window: TimeWindow,
    /// History depth the events were fetched for. Defaults to `window`.
    pub fetched_window: Option<TimeWindow>,
}

impl<'a> TimelineRequest<'a> {
    pub fn new(address: &'a str, events: &'a [RawTransactionEvent]) -> Self {
        Self {
            address,
            events,
            current_balance: None,
            sol_price: None,
            window: TimeWindow::default(),
            fetched_window: None,
        }
    }

    pub fn current_balance(mut self, balance: Option<f64>) -> Self {
        self.current_balance = balance;
        self
    }

    pub fn sol_price(mut self, price: Option<f64>) -> Self {
        self.sol_price = price;
        self
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn fetched_window(mut self, window: TimeWindow) -> Self {
        self.fetched_window = Some(window);
        self
    }
}

/// Outcome of [`WalletTimeline::select_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    Unchanged,
    /// Chart recomputed from the already reconstructed history.
    Reprepared,
    /// The window needs older events than were fetched. Nothing changed;
    /// the caller re-fetches and builds a new timeline.
    RefetchRequired,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub address: String,
    pub window: TimeWindow,
    pub sol_balance: f64,
    pub sol_usd_value: Option<f64>,
    pub transactions: Vec<CanonicalTransaction>,
    pub balance_history: Vec<BalancePoint>,
    pub chart: Vec<BalancePoint>,
    pub clamped_points: usize,
}

#[derive(Debug, Clone)]
pub struct WalletTimeline {
    address: String,
    current_balance: f64,
    sol_price: Option<f64>,
    transactions: Vec<CanonicalTransaction>,
    history: Vec<BalancePoint>,
    chart: Vec<BalancePoint>,
    window: TimeWindow,
    fetched_window: TimeWindow,
    interpolation_gap_ms: i64,
}

impl WalletTimeline {
    pub fn build(
        request: TimelineRequest<'_>,
        resolver: &dyn SymbolResolver,
    ) -> Result<Self, PipelineError> {
        Self::build_with(request, resolver, &LedgerConfig::default(), Utc::now())
    }

    pub fn build_with(
        request: TimelineRequest<'_>,
        resolver: &dyn SymbolResolver,
        config: &LedgerConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, PipelineError> {
        let current_balance = match request.current_balance {
            None if request.events.is_empty() => return Err(PipelineError::MissingInput),
            None => {
                warn!(address = request.address, "no current balance supplied, assuming 0 SOL");
                0.0
            }
            Some(b) if !b.is_finite() || b < 0.0 => return Err(PipelineError::InvalidBalance(b)),
            Some(b) => b,
        };

        let events = unique_events(request.events);
        if events.len() < request.events.len() {
            debug!(
                dropped = request.events.len() - events.len(),
                "dropped duplicate signatures"
            );
        }

        let mut transactions: Vec<CanonicalTransaction> = events
            .iter()
            .filter_map(|event| normalize_with(event, request.address, resolver, &config.thresholds))
            .collect();
        transactions.sort_by(|a, b| {
            b.block_time
                .cmp(&a.block_time)
                .then_with(|| a.signature.cmp(&b.signature))
        });

        let history: Vec<BalancePoint> = reconstruct_with(
            &events,
            current_balance,
            request.address,
            now,
            &config.thresholds,
        )
        .into_iter()
        .map(|p| p.priced(request.sol_price))
        .collect();

        join_running_balances(&mut transactions, &history);

        let chart = prepare_with(&history, request.window, now, config.chart.interpolation_gap_ms);

        info!(
            address = request.address,
            transactions = transactions.len(),
            history_points = history.len(),
            chart_points = chart.len(),
            window = %request.window,
            "built wallet timeline"
        );

        Ok(Self {
            address: request.address.to_string(),
            current_balance,
            sol_price: request.sol_price,
            transactions,
            history,
            chart,
            window: request.window,
            fetched_window: request.fetched_window.unwrap_or(request.window),
            interpolation_gap_ms: config.chart.interpolation_gap_ms,
        })
    }

    pub fn transactions(&self) -> &[CanonicalTransaction] {
        &self.transactions
    }

    pub fn history(&self) -> &[BalancePoint] {
        &self.history
    }

    pub fn chart(&self) -> &[BalancePoint] {
        &self.chart
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn fetched_window(&self) -> TimeWindow {
        self.fetched_window
    }

    pub fn select_window(&mut self, window: TimeWindow) -> WindowChange {
        self.select_window_at(window, Utc::now())
    }

    pub fn select_window_at(&mut self, window: TimeWindow, now: DateTime<Utc>) -> WindowChange {
        if window == self.window {
            return WindowChange::Unchanged;
        }
        if !self.fetched_window.covers(window) {
            debug!(
                requested = %window,
                fetched = %self.fetched_window,
                "window needs older history than was fetched"
            );
            return WindowChange::RefetchRequired;
        }

        self.window = window;
        self.chart = prepare_with(&self.history, window, now, self.interpolation_gap_ms);
        WindowChange::Reprepared
    }

    pub fn report(&self) -> ActivityReport {
        ActivityReport {
            address: self.address.clone(),
            window: self.window,
            sol_balance: self.current_balance,
            sol_usd_value: self.sol_price.map(|price| self.current_balance * price),
            transactions: self.transactions.clone(),
            balance_history: self.history.clone(),
            chart: self.chart.clone(),
            clamped_points: self.history.iter().filter(|p| p.clamped).count(),
        }
    }
}

/// Events ordered newest first, keeping the newest copy of each signature.
fn unique_events(events: &[RawTransactionEvent]) -> Vec<RawTransactionEvent> {
    let mut ordered: Vec<&RawTransactionEvent> = events.iter().collect();
    ordered.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.signature.cmp(&b.signature))
    });

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|event| seen.insert(event.signature.as_str()))
        .cloned()
        .collect()
}

/// Attach the balance right after each transaction.
///
/// A transaction that produced a history point takes the value of the point
/// just newer than it, which is the balance the walk held before undoing it.
/// Other transactions take the nearest strictly newer point.
fn join_running_balances(transactions: &mut [CanonicalTransaction], history: &[BalancePoint]) {
    let by_signature: HashMap<&str, usize> = history
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.signature.as_deref().map(|sig| (sig, i)))
        .collect();

    for tx in transactions.iter_mut() {
        tx.running_balance = match by_signature.get(tx.signature.as_str()) {
            Some(&i) => history.get(i + 1).map(|p| p.sol_value),
            None => {
                let date = tx.block_time * 1000;
                history.iter().find(|p| p.date > date).map(|p| p.sol_value)
            }
        };
    }
}
