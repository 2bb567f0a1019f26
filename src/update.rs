//! Daily update orchestration
//!
//! One run walks a fixed sequence: business-day check, already-recorded
//! check, quote fetch, yield resolution, metrics, persist. Each check can
//! end the run early; none of them is an error. The run owns the loaded
//! history exclusively from load to save.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{error, info, warn};

use crate::bond_yield::{YieldSource, resolve_yield};
use crate::history::HistoryEntry;
use crate::metrics::{self, ValuationConstants};
use crate::quote::QuoteProvider;
use crate::store::JsonFileStore;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// A new snapshot was appended and persisted.
    Updated(HistoryEntry),
    NonBusinessDay,
    AlreadyRecorded,
    QuoteUnavailable,
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Runs one daily update for `today`. Collaborator failures never escape:
/// a quote failure ends the run as [`UpdateOutcome::QuoteUnavailable`], the
/// yield chain always resolves, and a persist failure is logged while the
/// stored document keeps its prior contents.
pub async fn run_once(
    today: NaiveDate,
    quotes: &dyn QuoteProvider,
    yield_sources: &[Box<dyn YieldSource>],
    store: &JsonFileStore,
    ticker: &str,
    constants: &ValuationConstants,
) -> Result<UpdateOutcome> {
    if !is_business_day(today) {
        info!(%today, "Not a business day, skipping");
        return Ok(UpdateOutcome::NonBusinessDay);
    }

    let mut history = store.load();
    if history.contains(today) {
        info!(%today, "Snapshot already recorded");
        return Ok(UpdateOutcome::AlreadyRecorded);
    }

    let quote = match quotes.fetch_latest(ticker).await {
        Ok(quote) => quote,
        Err(e) => {
            warn!(error = %e, "Quote fetch failed, no update today");
            return Ok(UpdateOutcome::QuoteUnavailable);
        }
    };
    info!(price = quote.price, volume = quote.volume, "Fetched quote");

    let bond_yield = resolve_yield(yield_sources).await;
    info!(bond_yield, "Resolved bond yield");

    let metrics = metrics::compute(quote.price, constants);
    let change = match history.latest_price() {
        Some(previous) => metrics::round2(quote.price - previous),
        None => 0.0,
    };

    let entry = HistoryEntry {
        date: today,
        price: quote.price,
        volume: quote.volume,
        bond_yield,
        per: metrics.per,
        pbr: metrics.pbr,
        eps: metrics.eps,
        bps: metrics.bps,
        yield_rate: metrics.yield_rate,
        dividend_yield: metrics.dividend_yield,
        change,
    };

    history.prepend(entry.clone());
    if let Err(e) = store.save(&history) {
        error!(error = %e, "Failed to persist history, update lost");
    }

    Ok(UpdateOutcome::Updated(entry))
}
