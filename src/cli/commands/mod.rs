//! Command implementations behind the router.
//!
//! Each command lives in its own module; [`Toolbox`] maps an [`Action`] to it.

pub mod artifacts;
pub mod check_file;
pub mod clone;
pub mod history;
pub mod info;
pub mod process;
pub mod remove;
pub mod scaffold;
pub mod spring_batch;
pub mod tree;

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::runtime::Handle;

use crate::cli::handler::CommandHandler;
use crate::cli::vocabulary::Action;
use crate::config::Settings;
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode};
use crate::platform;

/// Production [`CommandHandler`]: settings, a working directory that relative
/// operands resolve against, and an optional runtime for network commands.
pub struct Toolbox {
    settings: Settings,
    workdir: PathBuf,
    runtime: Option<Handle>,
}

impl Toolbox {
    pub fn new(settings: Settings, workdir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            workdir: workdir.into(),
            runtime: None,
        }
    }

    /// Drive async work on an existing runtime instead of building one per call.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Operand path relative to the working directory. Absolute paths pass through.
    pub fn resolve(&self, operand: &str) -> PathBuf {
        self.workdir.join(operand)
    }

    /// Block the calling thread on `future`.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> HandlerResult<F::Output> {
        match &self.runtime {
            Some(handle) => Ok(handle.block_on(future)),
            None => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(HandlerError::Terminal)?;
                Ok(runtime.block_on(future))
            }
        }
    }
}

impl CommandHandler for Toolbox {
    fn handle(
        &mut self,
        action: Action,
        args: &[String],
        console: &mut Console,
    ) -> HandlerResult<ExitCode> {
        crate::debug_event!("toolbox", "handle", "{action:?} {args:?}");
        match action {
            Action::Version => info::version(console),
            Action::Help => info::help(console),
            Action::Info => info::about(console),
            Action::SystemInfo => info::system_info(console, &platform::detect()),
            Action::DisplayHistory => history::display_log(self, console),
            Action::ContextMemory => history::context_memory(self, console),
            Action::Remove => remove::run(self, console),
            Action::Generate => scaffold::generate_html(self, &args[0], console),
            Action::Create => scaffold::create_folder(self, &args[0], console),
            Action::CreateFile => scaffold::create_file(self, &args[0], &args[1], console),
            Action::Tree => tree::run(self, &args[0], console),
            Action::GenerateReactNative => clone::react_native(self, &args[0], console),
            Action::DownloadLanguage => clone::language(self, &args[0], console),
            Action::DownloadArtifacts => {
                artifacts::run(self, &args[0], args.get(1).map(String::as_str), console)
            }
            Action::CheckFile => check_file::run(self, console),
            Action::GenerateSpringBatch => spring_batch::run(self, &args[0], &args[1], console),
            // Sessions are driven by the router itself.
            Action::Interactive => Ok(ExitCode::Success),
        }
    }
}
