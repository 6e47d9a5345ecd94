pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod io;
pub mod logging;
pub mod platform;
pub mod utils;

pub use cli::{Action, Cli, CommandHandler, Router, Toolbox, Vocabulary};
pub use config::Settings;
pub use error::{CommandError, HandlerError, HandlerResult};
pub use history::{HistoryRecorder, HistoryStore};
pub use io::{Console, ExitCode};
pub use platform::OsInfo;
