//! Configuration module for the EASIER CLI.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`~/.easier/settings.toml` or `--config <path>`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `EASIER_` and use double underscores
//! to separate nested levels:
//! - `EASIER_HISTORY__LOG_FILE=/tmp/history.eas` sets `history.log_file`
//! - `EASIER_HISTORY__ENABLED=false` sets `history.enabled`
//! - `EASIER_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding `settings.toml`.
pub const CONFIG_DIR_NAME: &str = ".easier";
pub const LOG_FILE_NAME: &str = "command_history.eas";
pub const STORE_FILE_NAME: &str = "command_history.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Command history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Template sources and external commands
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Record invocations at all. `false` opts out of recording every
    /// dispatch: neither the line log nor the store is touched.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Line log; defaults to `~/command_history.eas`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Tabular store; defaults to `~/command_history.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,

    /// Attempts made while the store is locked by another process
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,

    /// First backoff delay; doubles on every retry
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,

    /// Lock files older than this are considered abandoned
    #[serde(default = "default_stale_lock_secs")]
    pub stale_lock_secs: u64,

    /// Rows shown by `context-memory`
    #[serde(default = "default_context_memory_limit")]
    pub context_memory_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TemplateConfig {
    #[serde(default = "default_react_native_repo")]
    pub react_native_repo: String,

    #[serde(default = "default_language_repo")]
    pub language_repo: String,

    /// Owner of the repository whose releases `download-artifacts` reads
    #[serde(default = "default_artifact_owner")]
    pub artifact_owner: String,

    #[serde(default = "default_artifact_repo")]
    pub artifact_repo: String,

    /// GitHub REST API base URL
    #[serde(default = "default_github_api")]
    pub github_api: String,

    /// File looked up by `check-file`
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Program and arguments run by `--remove`
    #[serde(default = "default_uninstall_command")]
    pub uninstall_command: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for every target
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `"easier::history" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_max_write_attempts() -> u32 {
    5
}
fn default_retry_base_ms() -> u64 {
    20
}
fn default_stale_lock_secs() -> u64 {
    30
}
fn default_context_memory_limit() -> usize {
    20
}
fn default_react_native_repo() -> String {
    "https://github.com/HAFDIAHMED/react-native-firebase".to_string()
}
fn default_language_repo() -> String {
    "https://github.com/Daftyon/Easier-language".to_string()
}
fn default_artifact_owner() -> String {
    "Daftyon".to_string()
}
fn default_artifact_repo() -> String {
    "Easier-language".to_string()
}
fn default_github_api() -> String {
    "https://api.github.com".to_string()
}
fn default_marker_file() -> String {
    "easier.eas".to_string()
}
fn default_uninstall_command() -> Vec<String> {
    vec![
        "cargo".to_string(),
        "uninstall".to_string(),
        "easier".to_string(),
    ]
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            history: HistoryConfig::default(),
            templates: TemplateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: None,
            store_file: None,
            max_write_attempts: default_max_write_attempts(),
            retry_base_ms: default_retry_base_ms(),
            stale_lock_secs: default_stale_lock_secs(),
            context_memory_limit: default_context_memory_limit(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            react_native_repo: default_react_native_repo(),
            language_repo: default_language_repo(),
            artifact_owner: default_artifact_owner(),
            artifact_repo: default_artifact_repo(),
            github_api: default_github_api(),
            marker_file: default_marker_file(),
            uninstall_command: default_uninstall_command(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl HistoryConfig {
    /// Resolved line-log path, `None` when no home directory is known.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(LOG_FILE_NAME)))
    }

    /// Resolved tabular-store path, `None` when no home directory is known.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(STORE_FILE_NAME)))
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// `custom` replaces the per-user settings file when given.
    pub fn load(custom: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let config_path = custom
            .map(Path::to_path_buf)
            .or_else(Self::user_config_path);

        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            // Double underscore separates nested levels, single underscore stays in field names
            .merge(Env::prefixed("EASIER_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Load configuration from a specific file plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::load(Some(path.as_ref()))
    }

    /// `~/.easier/settings.toml` if it exists.
    pub fn user_config_path() -> Option<PathBuf> {
        let path = dirs::home_dir()?.join(CONFIG_DIR_NAME).join("settings.toml");
        path.is_file().then_some(path)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
