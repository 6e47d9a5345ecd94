//! History records: the log line written per invocation and the derived table row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::utils::{iso8601, local_date};

/// Name recorded for an invocation without arguments.
pub const PROGRAM_NAME: &str = "easier";

/// One invocation as received by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub timestamp: DateTime<Utc>,
    pub args: Vec<String>,
}

impl InvocationRecord {
    pub fn new(timestamp: DateTime<Utc>, args: &[String]) -> Self {
        Self {
            timestamp,
            args: args.to_vec(),
        }
    }

    /// `"<timestamp> - <args joined by single space>\n"`
    pub fn log_line(&self) -> String {
        format!("{} - {}\n", iso8601(self.timestamp), self.args.join(" "))
    }

    pub fn command_name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or(PROGRAM_NAME)
    }

    pub fn to_row(&self, duration: Elapsed) -> HistoryRow {
        HistoryRow {
            command_name: self.command_name().to_string(),
            command_time: local_date(self.timestamp),
            duration,
        }
    }
}

/// Seconds since the previous recorded command, or `N/A` for the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elapsed {
    Seconds(f64),
    NotAvailable,
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::Seconds(secs) => write!(f, "{secs:.3}s"),
            Elapsed::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Elapsed::Seconds(secs) => serializer.serialize_f64(*secs),
            Elapsed::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Elapsed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(f64),
            Label(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Elapsed::Seconds(secs),
            Raw::Label(_) => Elapsed::NotAvailable,
        })
    }
}

/// Row of the `CommandHistory` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "CommandName")]
    pub command_name: String,
    #[serde(rename = "CommandTime")]
    pub command_time: String,
    #[serde(rename = "Duration")]
    pub duration: Elapsed,
}
