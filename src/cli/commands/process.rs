//! External program execution with inherited stdio.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::error::{HandlerError, HandlerResult};

/// Run `program` in `cwd` and wait for it. A non-zero exit is an error.
pub fn run<I, S>(program: &str, args: I, cwd: &Path) -> HandlerResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    crate::debug_event!("process", "spawn", "{program} in {}", cwd.display());
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|source| HandlerError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(HandlerError::ProcessFailed {
            program: program.to_string(),
            status: status.to_string(),
        })
    }
}
