use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Latest daily bar for the tracked index. `price` is the close rounded to
/// two decimals; `volume` is in millions of shares.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyQuote {
    pub price: f64,
    pub volume: i64,
    pub date: NaiveDate,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_latest(&self, symbol: &str) -> Result<DailyQuote>;
}
