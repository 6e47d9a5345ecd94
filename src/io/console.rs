//! Terminal input and output shared by the router, the REPL and the handlers.
//!
//! A [`Console`] owns one input stream and two output streams. The process uses
//! [`Console::stdio`]; tests build one with [`Console::scripted`], which feeds
//! canned input and captures everything written into a [`Transcript`].

use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Cursor, Write};
use std::sync::Arc;

use console::{StyledObject, style};
use parking_lot::Mutex;

use crate::display::theme::Theme;

/// Semantic colour of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Accent,
}

pub struct Console {
    input: Box<dyn BufRead>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    color: bool,
    terminal: bool,
}

impl Console {
    /// Console bound to the process stdin/stdout/stderr.
    pub fn stdio() -> Self {
        let terminal = is_terminal::is_terminal(io::stdout());
        Self {
            input: Box::new(BufReader::new(io::stdin())),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            color: terminal && !Theme::should_disable_colors(),
            terminal,
        }
    }

    /// Console reading `input` and capturing stdout and stderr into one transcript.
    pub fn scripted(input: impl Into<String>) -> (Self, Transcript) {
        let transcript = Transcript::default();
        let console = Self {
            input: Box::new(Cursor::new(input.into().into_bytes())),
            out: Box::new(transcript.clone()),
            err: Box::new(transcript.clone()),
            color: false,
            terminal: false,
        };
        (console, transcript)
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    pub fn err(&mut self) -> &mut dyn Write {
        self.err.as_mut()
    }

    pub fn paint<D: Display>(&self, value: D, tone: Tone) -> StyledObject<D> {
        let styled = style(value).force_styling(self.color);
        match tone {
            Tone::Info => styled.cyan(),
            Tone::Success => styled.green(),
            Tone::Warning => styled.yellow(),
            Tone::Error => styled.red(),
            Tone::Accent => styled.green().bold(),
        }
    }

    /// Read one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Write `question` without a newline and wait for the answer.
    pub fn prompt(&mut self, question: impl Display) -> io::Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        self.read_line()
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.terminal {
            console::Term::stdout().clear_screen()
        } else {
            write!(self.out, "\x1b[2J\x1b[H")?;
            self.out.flush()
        }
    }
}

/// Shared capture buffer behind a scripted console.
#[derive(Clone, Default)]
pub struct Transcript(Arc<Mutex<Vec<u8>>>);

impl Transcript {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
