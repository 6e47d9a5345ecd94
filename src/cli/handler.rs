//! The seam between the router and the command implementations.

use crate::cli::vocabulary::Action;
use crate::error::HandlerResult;
use crate::io::{Console, ExitCode};

/// Runs the collaborator behind an [`Action`].
///
/// `args` excludes the command token: `create demo` arrives as `["demo"]`.
/// Expected failures may be reported by the handler itself and returned as
/// [`ExitCode::Failure`]; anything else is returned as an error.
pub trait CommandHandler {
    fn handle(
        &mut self,
        action: Action,
        args: &[String],
        console: &mut Console,
    ) -> HandlerResult<ExitCode>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Write;
    use std::path::Path;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::cli::router::Router;
    use crate::error::HandlerError;
    use crate::history::{HistoryRecorder, HistoryStore, RetryPolicy, read_log};
    use crate::io::Transcript;

    /// Records every call; optionally fails every call.
    #[derive(Default)]
    pub struct SpyHandler {
        pub calls: Vec<(Action, Vec<String>)>,
        pub fail: bool,
    }

    impl CommandHandler for SpyHandler {
        fn handle(
            &mut self,
            action: Action,
            args: &[String],
            console: &mut Console,
        ) -> HandlerResult<ExitCode> {
            self.calls.push((action, args.to_vec()));
            if self.fail {
                return Err(HandlerError::Template(format!("{action:?} exploded")));
            }
            writeln!(console.out(), "handled {action:?}")?;
            Ok(ExitCode::Success)
        }
    }

    pub struct Harness {
        pub router: Router<SpyHandler>,
        pub transcript: Transcript,
        pub dir: TempDir,
    }

    impl Harness {
        pub fn new(input: &str) -> Self {
            Self::with_handler(input, SpyHandler::default())
        }

        pub fn with_handler(input: &str, handler: SpyHandler) -> Self {
            let dir = TempDir::new().unwrap();
            let (console, transcript) = Console::scripted(input);
            let router = Router::new(handler, recorder_in(dir.path()), console);
            Self {
                router,
                transcript,
                dir,
            }
        }

        pub fn dispatch(&mut self, args: &[&str]) -> HandlerResult<ExitCode> {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            self.router.dispatch(&args)
        }

        pub fn calls(&self) -> &[(Action, Vec<String>)] {
            &self.router.handler().calls
        }

        pub fn log_lines(&self) -> usize {
            read_log(&self.dir.path().join("command_history.eas"))
                .map(|log| log.lines().count())
                .unwrap_or(0)
        }

        pub fn output(&self) -> String {
            self.transcript.contents()
        }
    }

    pub fn recorder_in(dir: &Path) -> HistoryRecorder {
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            stale_after: Duration::from_secs(3600),
        };
        HistoryRecorder::new(
            dir.join("command_history.eas"),
            HistoryStore::new(dir.join("command_history.json"), policy),
        )
    }
}
