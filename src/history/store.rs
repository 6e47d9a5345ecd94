//! Tabular history store.
//!
//! The table is a JSON document replaced atomically on every write. Writers
//! serialise through a `<store>.lock` file created with `create_new`; a writer
//! that finds the lock held backs off exponentially and gives up after
//! `max_attempts`. Lock files older than `stale_after` belong to a crashed
//! writer and are removed.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;

use super::error::{HistoryError, HistoryResult};
use super::record::HistoryRow;
use crate::config::HistoryConfig;

pub const SHEET_NAME: &str = "CommandHistory";
const MAX_BACKOFF: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    pub sheet: String,
    pub columns: Vec<String>,
    pub rows: Vec<HistoryRow>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self {
            sheet: SHEET_NAME.to_string(),
            columns: vec![
                "CommandName".to_string(),
                "CommandTime".to_string(),
                "Duration".to_string(),
            ],
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub stale_after: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            max_attempts: config.max_write_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_ms),
            stale_after: Duration::from_secs(config.stale_lock_secs),
        }
    }

    /// Delay before retry number `retry` (0-based), capped at two seconds.
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    policy: RetryPolicy,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, policy: RetryPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Strict read: a missing store is empty, a corrupt one is an error.
    pub fn read(&self) -> HistoryResult<HistoryTable> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HistoryTable::default()),
            Err(e) => Err(HistoryError::io(&self.path, e)),
        }
    }

    /// Lenient read used before appending: anything unreadable starts a fresh table.
    pub fn load(&self) -> HistoryTable {
        self.read().unwrap_or_else(|e| {
            tracing::warn!("Starting a new history table: {e}");
            HistoryTable::default()
        })
    }

    /// Append one row, retrying while another process holds the store.
    pub fn append(&self, row: &HistoryRow) -> HistoryResult<()> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_append(row) {
                Err(HistoryError::Busy { .. }) if attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay(attempt - 1);
                    crate::debug_event!(
                        "history",
                        "store busy",
                        "attempt {attempt}, retrying in {delay:?}"
                    );
                    thread::sleep(delay);
                }
                Err(HistoryError::Busy { .. }) => {
                    return Err(HistoryError::Busy {
                        path: self.path.clone(),
                        attempts: attempt,
                    });
                }
                other => return other,
            }
        }
    }

    fn try_append(&self, row: &HistoryRow) -> HistoryResult<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(&parent).map_err(|e| HistoryError::io(&parent, e))?;

        let _lock = StoreLock::acquire(self.lock_path(), self.policy.stale_after)?;
        let mut table = self.load();
        table.rows.push(row.clone());
        self.write(&table, &parent)
    }

    fn write(&self, table: &HistoryTable, parent: &Path) -> HistoryResult<()> {
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| HistoryError::io(parent, e))?;
        serde_json::to_writer_pretty(&mut tmp, table)?;
        tmp.write_all(b"\n")
            .map_err(|e| HistoryError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| classify(&self.path, e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Held for the duration of one read-modify-write; removed on drop.
struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    fn acquire(path: PathBuf, stale_after: Duration) -> HistoryResult<Self> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // Owner pid is informational only.
                let _ = writeln!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if is_stale(&path, stale_after) {
                    tracing::warn!("Removing stale history lock {}", path.display());
                    let _ = fs::remove_file(&path);
                }
                Err(HistoryError::Busy { path, attempts: 1 })
            }
            Err(e) => Err(classify(&path, e)),
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn is_stale(path: &Path, stale_after: Duration) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > stale_after)
}

fn classify(path: &Path, err: io::Error) -> HistoryError {
    if is_busy(&err) {
        HistoryError::Busy {
            path: path.to_path_buf(),
            attempts: 1,
        }
    } else {
        HistoryError::io(path, err)
    }
}

fn is_busy(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::ResourceBusy {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::record::Elapsed;
    use tempfile::TempDir;

    fn row(name: &str) -> HistoryRow {
        HistoryRow {
            command_name: name.to_string(),
            command_time: "1/1/2024".to_string(),
            duration: Elapsed::NotAvailable,
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            stale_after: Duration::from_secs(3600),
        }
    }

    #[test]
    fn test_append_creates_and_extends_table() {
        let temp_dir = TempDir::new().unwrap();
        let store = HistoryStore::new(temp_dir.path().join("history.json"), fast_policy(3));

        store.append(&row("create")).unwrap();
        store.append(&row("tree")).unwrap();

        let table = store.read().unwrap();
        assert_eq!(table.sheet, "CommandHistory");
        let names: Vec<_> = table.rows.iter().map(|r| r.command_name.as_str()).collect();
        assert_eq!(names, vec!["create", "tree"]);
        assert!(!store.lock_path().exists(), "lock must be released");
    }

    #[test]
    fn test_corrupt_store_restarts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "this is not json").unwrap();
        let store = HistoryStore::new(&path, fast_policy(3));

        assert!(store.read().is_err());
        assert!(store.load().rows.is_empty());

        store.append(&row("generate")).unwrap();
        assert_eq!(store.read().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_held_lock_gives_up_after_max_attempts() {
        let temp_dir = TempDir::new().unwrap();
        let store = HistoryStore::new(temp_dir.path().join("history.json"), fast_policy(3));
        fs::write(store.lock_path(), "12345\n").unwrap();

        let err = store.append(&row("create")).unwrap_err();
        match err {
            HistoryError::Busy { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected busy error, got {other:?}"),
        }
        assert!(!store.path().exists());
        assert!(store.lock_path().exists(), "foreign lock must not be removed");
    }

    #[test]
    fn test_stale_lock_is_reclaimed() {
        let temp_dir = TempDir::new().unwrap();
        let mut policy = fast_policy(3);
        policy.stale_after = Duration::ZERO;
        let store = HistoryStore::new(temp_dir.path().join("history.json"), policy);
        fs::write(store.lock_path(), "12345\n").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        store.append(&row("create")).unwrap();
        assert_eq!(store.read().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = fast_policy(10);
        assert_eq!(policy.delay(0), Duration::from_millis(1));
        assert_eq!(policy.delay(3), Duration::from_millis(8));
        assert_eq!(policy.delay(40), MAX_BACKOFF);
    }
}
