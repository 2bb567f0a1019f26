//! Bounded, newest-first sequence of daily valuation snapshots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of daily snapshots kept in the store.
pub const RETENTION_DAYS: usize = 60;

/// One business day's snapshot as persisted in the history document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: i64,
    pub bond_yield: f64,
    pub per: f64,
    pub pbr: f64,
    pub eps: f64,
    pub bps: f64,
    pub yield_rate: f64,
    pub dividend_yield: f64,
    pub change: f64,
}

/// Snapshot history, newest entry first. Holds at most [`RETENTION_DAYS`]
/// entries and never two entries for the same date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        History { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|entry| entry.date == date)
    }

    /// Closing price of the newest snapshot, if any.
    pub fn latest_price(&self) -> Option<f64> {
        self.entries.first().map(|entry| entry.price)
    }

    /// Inserts a new snapshot at the front and drops the oldest entries
    /// beyond the retention bound.
    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(RETENTION_DAYS);
    }
}
