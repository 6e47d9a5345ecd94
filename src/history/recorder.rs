//! Records every dispatch to the line log and the tabular store.
//!
//! [`HistoryRecorder::record`] never fails: problems are logged and the
//! command still runs. The previous-start instant belongs to the recorder, so
//! the REPL's repeated dispatches measure from the last recorded command.

use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::error::{HistoryError, HistoryResult};
use super::record::{Elapsed, InvocationRecord};
use super::store::{HistoryStore, RetryPolicy};
use crate::config::HistoryConfig;

#[derive(Debug)]
pub struct HistoryRecorder {
    log_path: Option<PathBuf>,
    store: Option<HistoryStore>,
    enabled: bool,
    last_start: Option<Instant>,
}

impl HistoryRecorder {
    pub fn new(log_path: impl Into<PathBuf>, store: HistoryStore) -> Self {
        Self {
            log_path: Some(log_path.into()),
            store: Some(store),
            enabled: true,
            last_start: None,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            log_path: config.log_path(),
            store: config
                .store_path()
                .map(|path| HistoryStore::new(path, RetryPolicy::from_config(config))),
            enabled: config.enabled,
            last_start: None,
        }
    }

    /// Recorder that writes nothing.
    pub fn disabled() -> Self {
        Self {
            log_path: None,
            store: None,
            enabled: false,
            last_start: None,
        }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn store(&self) -> Option<&HistoryStore> {
        self.store.as_ref()
    }

    /// Record one invocation. Returns the record when history is enabled.
    pub fn record(&mut self, args: &[String]) -> Option<InvocationRecord> {
        if !self.enabled {
            return None;
        }

        let record = InvocationRecord::new(Utc::now(), args);
        if let Err(e) = self.append_log(&record) {
            tracing::warn!("Could not append to command history: {e}");
        }

        let duration = match self.last_start {
            Some(previous) => Elapsed::Seconds(previous.elapsed().as_secs_f64()),
            None => Elapsed::NotAvailable,
        };
        let row = record.to_row(duration);

        let stored = match &self.store {
            Some(store) => store.append(&row),
            None => Err(HistoryError::NoHomeDirectory),
        };
        if let Err(e) = stored {
            tracing::warn!("Error writing command history table: {e}");
        } else {
            crate::debug_event!("history", "recorded", "{} ({})", row.command_name, row.duration);
        }

        // Next duration is measured from this attempt, successful or not.
        self.last_start = Some(Instant::now());
        Some(record)
    }

    fn append_log(&self, record: &InvocationRecord) -> HistoryResult<()> {
        let path = self.log_path.as_ref().ok_or(HistoryError::NoHomeDirectory)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| HistoryError::io(path, e))?;
        file.write_all(record.log_line().as_bytes())
            .map_err(|e| HistoryError::io(path, e))
    }
}

/// Full contents of the line log.
pub fn read_log(path: &Path) -> HistoryResult<String> {
    fs::read_to_string(path).map_err(|e| HistoryError::io(path, e))
}
