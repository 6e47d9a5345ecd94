//! Error types for the command history.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History file error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History store {} is locked by another process ({attempts} attempts)", path.display())]
    Busy { path: PathBuf, attempts: u32 },

    #[error("No home directory found for the command history")]
    NoHomeDirectory,
}

impl HistoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HistoryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type HistoryResult<T> = Result<T, HistoryError>;
