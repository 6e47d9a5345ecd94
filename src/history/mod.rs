//! Command history: the per-user line log and the `CommandHistory` table.

pub mod error;
pub mod record;
pub mod recorder;
pub mod store;

pub use error::{HistoryError, HistoryResult};
pub use record::{Elapsed, HistoryRow, InvocationRecord, PROGRAM_NAME};
pub use recorder::{HistoryRecorder, read_log};
pub use store::{HistoryStore, HistoryTable, RetryPolicy};
