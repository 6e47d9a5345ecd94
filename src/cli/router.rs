//! Command router.
//!
//! `dispatch` records the invocation, then resolves `args[0]` against the
//! vocabulary, checks arity, asks for confirmation where the command requires
//! it, and finally hands `args[1..]` to the [`CommandHandler`].

use std::io;

use crate::cli::handler::CommandHandler;
use crate::cli::interactive;
use crate::cli::suggest::suggest;
use crate::cli::vocabulary::{Action, Confirmation, Vocabulary};
use crate::display;
use crate::error::{CommandError, HandlerError, HandlerResult};
use crate::history::{HistoryRecorder, PROGRAM_NAME};
use crate::io::{Console, ExitCode, Tone};
use crate::platform::{self, OsInfo};

pub struct Router<H> {
    vocabulary: Vocabulary,
    handler: H,
    recorder: HistoryRecorder,
    console: Console,
    os: Option<OsInfo>,
    in_session: bool,
}

impl<H: CommandHandler> Router<H> {
    pub fn new(handler: H, recorder: HistoryRecorder, console: Console) -> Self {
        Self {
            vocabulary: Vocabulary::builtin(),
            handler,
            recorder,
            console,
            os: None,
            in_session: false,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub(crate) fn in_session(&self) -> bool {
        self.in_session
    }

    pub(crate) fn set_in_session(&mut self, active: bool) {
        self.in_session = active;
    }

    /// Dispatch one argument vector.
    ///
    /// Usage errors and unknown commands are reported here and yield
    /// [`ExitCode::Failure`]; handler errors are returned to the caller.
    pub fn dispatch(&mut self, args: &[String]) -> HandlerResult<ExitCode> {
        self.recorder.record(args);
        crate::debug_event!("router", "dispatch", "{args:?}");

        if is_welcome(args) {
            self.print_welcome()?;
            display::print_help(&mut self.console, &self.vocabulary)?;
            return Ok(ExitCode::Success);
        }

        match self.route(args) {
            Ok(code) => Ok(code),
            Err(CommandError::Handler(e)) => Err(e),
            Err(err) => {
                self.report(&err)?;
                Ok(err.exit_code())
            }
        }
    }

    /// Banner with the detected system, detected once per router.
    pub fn print_welcome(&mut self) -> io::Result<()> {
        let os = self.os.get_or_insert_with(platform::detect);
        display::print_welcome(&mut self.console, os)
    }

    fn route(&mut self, args: &[String]) -> Result<ExitCode, CommandError> {
        let token = &args[0];
        let Some(spec) = self.vocabulary.find(token) else {
            return Err(CommandError::UnknownCommand {
                token: token.clone(),
                suggestions: suggest(token, self.vocabulary.names()),
            });
        };

        if !spec.arity.accepts(args.len()) {
            return Err(CommandError::Usage { spec });
        }

        if let Some(confirmation) = spec.confirm {
            if !self.confirm(confirmation).map_err(HandlerError::Terminal)? {
                let notice = self
                    .console
                    .paint(format!("✅ {}", confirmation.cancelled), Tone::Success);
                writeln!(self.console.out(), "{notice}").map_err(HandlerError::Terminal)?;
                return Ok(ExitCode::Success);
            }
        }

        let code = match spec.action {
            Action::Interactive => interactive::run(self)?,
            action => self.handler.handle(action, &args[1..], &mut self.console)?,
        };
        Ok(code)
    }

    fn confirm(&mut self, confirmation: Confirmation) -> io::Result<bool> {
        let question = self.console.paint(confirmation.question, Tone::Warning);
        let answer = self.console.prompt(question)?.unwrap_or_default();
        let answer = answer.trim().to_lowercase();
        Ok(answer == "yes" || answer == "y")
    }

    fn report(&mut self, err: &CommandError) -> io::Result<()> {
        let console = &mut self.console;
        match err {
            CommandError::Usage { spec } => {
                let usage = console.paint(err.to_string(), Tone::Error);
                let example = console.paint(format!("Example: {}", spec.example), Tone::Warning);
                writeln!(console.err(), "{usage}")?;
                writeln!(console.out(), "{example}")?;
                if let Some(hint) = spec.hint {
                    let hint = console.paint(format!("💡 {hint}"), Tone::Info);
                    writeln!(console.out(), "{hint}")?;
                }
            }
            CommandError::UnknownCommand { suggestions, .. } => {
                let headline = console.paint(format!("❌ Error: {err}"), Tone::Error);
                let help = console.paint("💡 Run 'easier --help' to see available commands.", Tone::Info);
                let repl = console.paint("🎮 Try 'easier interactive' for interactive mode.", Tone::Info);
                writeln!(console.err(), "{headline}")?;
                writeln!(console.out(), "{help}")?;
                writeln!(console.out(), "{repl}")?;
                if !suggestions.is_empty() {
                    let heading = console.paint("🔍 Did you mean one of these?", Tone::Warning);
                    writeln!(console.out(), "{heading}")?;
                    for suggestion in suggestions {
                        let suggestion = console.paint(suggestion, Tone::Info);
                        writeln!(console.out(), "  {suggestion}")?;
                    }
                }
            }
            CommandError::Handler(e) => {
                let message = console.paint(format!("❌ {e}"), Tone::Error);
                writeln!(console.err(), "{message}")?;
            }
        }
        Ok(())
    }
}

/// No arguments, or only the program's own name.
fn is_welcome(args: &[String]) -> bool {
    match args {
        [] => true,
        [only] => only == PROGRAM_NAME,
        _ => false,
    }
}
