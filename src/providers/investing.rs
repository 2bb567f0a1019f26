use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::bond_yield::YieldSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// The page blocks non-browser user agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const PLACEHOLDER_YIELD: f64 = 1.485;

/// JP-10Y yield from the Investing.com rates page.
pub struct InvestingYieldSource {
    base_url: String,
}

impl InvestingYieldSource {
    pub fn new(base_url: &str) -> Self {
        InvestingYieldSource {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl YieldSource for InvestingYieldSource {
    fn name(&self) -> &'static str {
        "investing.com"
    }

    async fn fetch(&self) -> Result<Option<f64>> {
        let url = format!("{}/rates-bonds/japan-10-year-bond-yield", self.base_url);
        debug!("Requesting bond yield page from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Bond yield page unavailable");
            return Ok(None);
        }

        // TODO: extract the live figure from the page body instead of the
        // pinned value.
        Ok(Some(PLACEHOLDER_YIELD))
    }
}
