//! Command-line surface: argument parsing, the command vocabulary, the router
//! and the handlers behind it.

pub mod args;
pub mod commands;
pub mod handler;
pub mod interactive;
pub mod router;
pub mod suggest;
pub mod vocabulary;

pub use args::Cli;
pub use commands::Toolbox;
pub use handler::CommandHandler;
pub use router::Router;
pub use vocabulary::{Action, CommandSpec, Vocabulary};
