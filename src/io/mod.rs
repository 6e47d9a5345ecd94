//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Exit codes shared by every command
//! - A console abstraction so dispatch and the REPL can run against scripted input

pub mod console;
pub mod exit_code;

pub use console::{Console, Tone, Transcript};
pub use exit_code::ExitCode;
