//! Valuation metrics derived from the index close and per-share constants

use serde::{Deserialize, Serialize};

/// Per-share figures for the index basket. These are fixed configuration,
/// not fetched; the same constants apply to every snapshot.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct ValuationConstants {
    #[serde(default = "default_eps")]
    pub eps: f64,
    #[serde(default = "default_bps")]
    pub bps: f64,
    #[serde(default = "default_dividend")]
    pub dividend: f64,
}

fn default_eps() -> f64 {
    2500.0
}

fn default_bps() -> f64 {
    27500.0
}

fn default_dividend() -> f64 {
    900.0
}

impl Default for ValuationConstants {
    fn default() -> Self {
        ValuationConstants {
            eps: default_eps(),
            bps: default_bps(),
            dividend: default_dividend(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationMetrics {
    pub per: f64,
    pub pbr: f64,
    pub eps: f64,
    pub bps: f64,
    pub yield_rate: f64,
    pub dividend_yield: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes PER, PBR, earnings yield and dividend yield for a closing price.
/// Precondition: `price` and `constants.eps` are non-zero.
pub fn compute(price: f64, constants: &ValuationConstants) -> ValuationMetrics {
    ValuationMetrics {
        per: round2(price / constants.eps),
        pbr: round2(price / constants.bps),
        eps: constants.eps,
        bps: constants.bps,
        yield_rate: round2(100.0 / (price / constants.eps)),
        dividend_yield: round2((constants.dividend / price) * 100.0),
    }
}
