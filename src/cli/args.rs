//! CLI argument parsing using clap.
//!
//! clap only handles process-level flags. Everything after them is passed
//! through untouched to the command router, which owns the vocabulary.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser, Debug)]
#[command(
    name = "easier",
    about = "Scaffold projects, templates and downloads from one command",
    styles = clap_cargo_style(),
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(long, env = "EASIER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command and operands, e.g. `create my-project`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub args: Vec<String>,
}
