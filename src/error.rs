//! Error types for dispatch and command handlers.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::vocabulary::CommandSpec;
use crate::history::HistoryError;
use crate::io::ExitCode;

/// Why a dispatch did not reach a successful handler.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Usage: {}", spec.usage)]
    Usage { spec: &'static CommandSpec },

    #[error("Unknown command '{token}'")]
    UnknownCommand {
        token: String,
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl CommandError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }
}

/// A collaborator (filesystem, network, spawned process, template) failed.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{context} '{}': {source}", path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    ProcessFailed { program: String, status: String },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No release asset matches '{key}' (available: {})", available.join(", "))]
    NoMatchingAsset { key: String, available: Vec<String> },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl HandlerError {
    pub fn fs(context: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        HandlerError::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
