//! JSON document store for the snapshot history

use crate::history::{History, HistoryEntry};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists the full history as a single JSON array, newest entry first.
/// The document is rewritten in full on every save; there is no atomic
/// rename, the last writer wins.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored history. A missing, unreadable or malformed document
    /// yields an empty history; the run then starts from scratch.
    pub fn load(&self) -> History {
        if !self.path.exists() {
            debug!("No history document at {}", self.path.display());
            return History::default();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read history document, starting empty");
                return History::default();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
            Ok(entries) => {
                debug!("Loaded {} history entries", entries.len());
                History::new(entries)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse history document, starting empty");
                History::default()
            }
        }
    }

    /// Overwrites the document with the full history.
    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(history.entries())
            .context("Failed to serialize history")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history document: {}", self.path.display()))?;

        debug!(
            "Saved {} history entries to {}",
            history.len(),
            self.path.display()
        );
        Ok(())
    }
}
