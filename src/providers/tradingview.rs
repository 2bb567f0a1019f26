use anyhow::Result;
use async_trait::async_trait;

use crate::bond_yield::YieldSource;

/// TradingView JP-10Y source. Scraping is not implemented; the source always
/// declines so the chain moves on.
pub struct TradingViewYieldSource;

#[async_trait]
impl YieldSource for TradingViewYieldSource {
    fn name(&self) -> &'static str {
        "tradingview"
    }

    async fn fetch(&self) -> Result<Option<f64>> {
        Ok(None)
    }
}
