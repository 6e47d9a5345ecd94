//! Colour policy for terminal output.

use std::io;

pub struct Theme;

impl Theme {
    /// Colours are off when `NO_COLOR` is set, `TERM=dumb`, or stdout is not a terminal.
    pub fn should_disable_colors() -> bool {
        if std::env::var_os("NO_COLOR").is_some() {
            return true;
        }
        if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
            return true;
        }
        !is_terminal::is_terminal(io::stdout())
    }
}
