//! Ordered fallback over bond-yield sources
//!
//! Each source either answers with a yield figure, declines (`Ok(None)`), or
//! fails. Sources are tried in trust order and the first answer wins; a
//! declining or failing source just advances the chain. The resolver always
//! produces a number.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Yield used when every source declines or fails.
pub const DEFAULT_BOND_YIELD: f64 = 1.5;

#[async_trait]
pub trait YieldSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the source has no answer today.
    async fn fetch(&self) -> Result<Option<f64>>;
}

/// Always answers with a fixed figure. Used as the last source in the chain.
pub struct StaticYieldSource {
    value: f64,
}

impl StaticYieldSource {
    pub fn new(value: f64) -> Self {
        StaticYieldSource { value }
    }
}

#[async_trait]
impl YieldSource for StaticYieldSource {
    fn name(&self) -> &'static str {
        "static-fallback"
    }

    async fn fetch(&self) -> Result<Option<f64>> {
        Ok(Some(self.value))
    }
}

/// Tries each source in order and returns the first answer, or
/// [`DEFAULT_BOND_YIELD`] when the whole chain comes up empty.
pub async fn resolve_yield(sources: &[Box<dyn YieldSource>]) -> f64 {
    for source in sources {
        match source.fetch().await {
            Ok(Some(value)) => {
                debug!(source = source.name(), value, "Bond yield resolved");
                return value;
            }
            Ok(None) => {
                debug!(source = source.name(), "Bond yield source declined");
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "Bond yield source failed");
            }
        }
    }
    DEFAULT_BOND_YIELD
}
