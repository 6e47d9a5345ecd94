//! Process exit codes.
//!
//! Success covers cancelled confirmations too; every failure class maps to 1.

/// Exit status of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed, or the user declined a confirmation.
    Success,
    /// Usage error, unknown command, handler failure or fatal error.
    Failure,
}

impl ExitCode {
    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => 0,
            ExitCode::Failure => 1,
        }
    }
}

impl From<bool> for ExitCode {
    fn from(ok: bool) -> Self {
        if ok {
            ExitCode::Success
        } else {
            ExitCode::Failure
        }
    }
}
