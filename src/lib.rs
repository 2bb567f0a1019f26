pub mod bond_yield;
pub mod config;
pub mod history;
pub mod log;
pub mod metrics;
pub mod providers;
pub mod quote;
pub mod show;
pub mod store;
pub mod update;

use anyhow::Result;
use chrono::Local;
use console::style;
use tracing::{debug, info};

use crate::bond_yield::YieldSource;
use crate::providers::investing::InvestingYieldSource;
use crate::providers::tradingview::TradingViewYieldSource;
use crate::providers::yahoo_finance::YahooQuoteProvider;
use crate::store::JsonFileStore;
use crate::update::UpdateOutcome;

/// Runs the daily update against the live calendar and prints the outcome.
pub async fn run_update(config_path: Option<&str>) -> Result<()> {
    info!("Nikkei tracker starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let yahoo_base_url = config
        .providers
        .yahoo
        .as_ref()
        .map_or("https://query1.finance.yahoo.com", |p| &p.base_url);
    let quote_provider = YahooQuoteProvider::new(yahoo_base_url);

    let investing_base_url = config
        .providers
        .investing
        .as_ref()
        .map_or("https://www.investing.com", |p| &p.base_url);
    let yield_sources: Vec<Box<dyn YieldSource>> = vec![
        Box::new(InvestingYieldSource::new(investing_base_url)),
        Box::new(TradingViewYieldSource),
        Box::new(bond_yield::StaticYieldSource::new(1.485)),
    ];

    let store = JsonFileStore::new(&config.data_file);
    let today = Local::now().date_naive();

    println!("Updating Nikkei 225 snapshot for {today}...");
    let outcome = update::run_once(
        today,
        &quote_provider,
        &yield_sources,
        &store,
        &config.ticker,
        &config.valuation,
    )
    .await?;

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::NonBusinessDay => {
            println!("{}", style("Not a business day, nothing to do.").dim());
        }
        UpdateOutcome::AlreadyRecorded => {
            println!("{}", style("Today's snapshot is already recorded.").dim());
        }
        UpdateOutcome::QuoteUnavailable => {
            println!(
                "{}",
                style("Quote unavailable, no update performed.").red()
            );
        }
        UpdateOutcome::Updated(entry) => {
            let change = if entry.change >= 0.0 {
                style(format!("{:+.2}", entry.change)).green()
            } else {
                style(format!("{:+.2}", entry.change)).red()
            };
            println!("{}", style("Snapshot recorded.").green().bold());
            println!("  Nikkei 225: {:.2} ({change})", entry.price);
            println!("  PER: {:.2}  PBR: {:.2}", entry.per, entry.pbr);
        }
    }
}
