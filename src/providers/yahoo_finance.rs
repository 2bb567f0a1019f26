use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::metrics::round2;
use crate::quote::{DailyQuote, QuoteProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the latest daily bar from the Yahoo Finance v8 chart API. The
/// request asks for a short trailing window so the most recent session is
/// present even across weekends and holidays.
pub struct YahooQuoteProvider {
    base_url: String,
}

impl YahooQuoteProvider {
    pub fn new(base_url: &str) -> Self {
        YahooQuoteProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Vec<ChartItem>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<i64>>>,
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    #[instrument(
        name = "YahooQuoteFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_latest(&self, symbol: &str) -> Result<DailyQuote> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=5d",
            self.base_url, symbol
        );
        debug!("Requesting chart data from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("nkt/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {} URL: {}", e, symbol, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for symbol: {}",
                response.status(),
                symbol
            ));
        }

        let data = response.json::<YahooChartResponse>().await?;
        let item = data
            .chart
            .result
            .first()
            .ok_or_else(|| anyhow!("No chart data found for symbol: {}", symbol))?;

        let timestamps = item
            .timestamp
            .as_ref()
            .ok_or_else(|| anyhow!("No daily bars found for symbol: {}", symbol))?;
        let quote = item
            .indicators
            .as_ref()
            .and_then(|inds| inds.quote.first())
            .ok_or_else(|| anyhow!("No quote indicators found for symbol: {}", symbol))?;
        let closes = quote
            .close
            .as_ref()
            .ok_or_else(|| anyhow!("No close series found for symbol: {}", symbol))?;

        // Last bar with a close value; trailing nulls appear while a session
        // is still open.
        let (index, close) = closes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, close)| close.map(|c| (i, c)))
            .ok_or_else(|| anyhow!("No closing price found for symbol: {}", symbol))?;

        let timestamp = *timestamps
            .get(index)
            .ok_or_else(|| anyhow!("Bar timestamp missing for symbol: {}", symbol))?;
        let date = Utc
            .timestamp_opt(timestamp, 0)
            .single()
            .ok_or_else(|| anyhow!("Invalid bar timestamp for symbol: {}", symbol))?
            .date_naive();

        let volume = quote
            .volume
            .as_ref()
            .and_then(|volumes| volumes.get(index).copied().flatten())
            .unwrap_or(0);

        Ok(DailyQuote {
            price: round2(close),
            volume: volume / 1_000_000,
            date,
        })
    }
}
