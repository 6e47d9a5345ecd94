//! `--display-history` and `context-memory`.

use std::collections::HashMap;

use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

use super::Toolbox;
use crate::error::HandlerResult;
use crate::history::{HistoryError, HistoryRow, HistoryStore, RetryPolicy, read_log};
use crate::io::{Console, ExitCode, Tone};

/// Print the raw line log.
pub fn display_log(toolbox: &Toolbox, console: &mut Console) -> HandlerResult<ExitCode> {
    let path = toolbox
        .settings()
        .history
        .log_path()
        .ok_or(HistoryError::NoHomeDirectory)?;
    let log = read_log(&path)?;
    writeln!(console.out(), "Command History:\n{log}")?;
    Ok(ExitCode::Success)
}

/// Render the most recent rows of the history table with totals.
pub fn context_memory(toolbox: &Toolbox, console: &mut Console) -> HandlerResult<ExitCode> {
    let config = &toolbox.settings().history;
    let path = config.store_path().ok_or(HistoryError::NoHomeDirectory)?;
    let table = HistoryStore::new(path, RetryPolicy::from_config(config)).read()?;

    if table.rows.is_empty() {
        let notice = console.paint("No command history recorded yet.", Tone::Warning);
        writeln!(console.out(), "{notice}")?;
        return Ok(ExitCode::Success);
    }

    let total = table.rows.len();
    let shown = config.context_memory_limit.clamp(1, total);
    let recent = &table.rows[total - shown..];

    let heading = console.paint(
        format!("🧠 Context Memory (last {shown} of {total} commands)"),
        Tone::Info,
    );
    writeln!(console.out(), "{heading}")?;
    writeln!(console.out(), "{}", render(recent, total - shown))?;

    writeln!(console.out(), "Total commands: {total}")?;
    if let Some((command, count)) = most_frequent(&table.rows) {
        writeln!(console.out(), "Most frequent: {command} ({count})")?;
    }
    Ok(ExitCode::Success)
}

fn render(rows: &[HistoryRow], offset: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#"),
            Cell::new("Command"),
            Cell::new("Date"),
            Cell::new("Duration"),
        ]);

    for (index, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + index + 1).set_alignment(CellAlignment::Right),
            Cell::new(&row.command_name),
            Cell::new(&row.command_time),
            Cell::new(row.duration).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Most used command name; ties go to the one seen first.
fn most_frequent(rows: &[HistoryRow]) -> Option<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for row in rows {
        let count = counts.entry(row.command_name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(row.command_name.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for name in order {
        let count = counts[name];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;
    use crate::history::HistoryRecorder;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_log_prints_recorded_lines() {
        let (toolbox, _dir) = toolbox();
        let mut recorder = HistoryRecorder::from_config(&toolbox.settings().history);
        recorder.record(&args(&["create", "demo"]));
        recorder.record(&args(&["tree", "."]));

        let (mut console, transcript) = console("");
        display_log(&toolbox, &mut console).unwrap();

        let output = transcript.contents();
        assert!(output.starts_with("Command History:\n"));
        assert!(output.contains(" - create demo\n"));
        assert!(output.contains(" - tree .\n"));
    }

    #[test]
    fn test_display_log_without_history_is_an_error() {
        let (toolbox, _dir) = toolbox();
        let (mut console, _) = console("");
        assert!(display_log(&toolbox, &mut console).is_err());
    }

    #[test]
    fn test_context_memory_limits_rows_and_reports_totals() {
        let (mut toolbox, _dir) = toolbox();
        toolbox.settings.history.context_memory_limit = 2;
        let mut recorder = HistoryRecorder::from_config(&toolbox.settings().history);
        for command in ["create", "tree", "create", "generate"] {
            recorder.record(&args(&[command, "x"]));
        }

        let (mut console, transcript) = console("");
        context_memory(&toolbox, &mut console).unwrap();

        let output = transcript.contents();
        assert!(output.contains("last 2 of 4 commands"));
        assert!(output.contains("generate"));
        assert!(!output.contains("tree"));
        assert!(output.contains("Total commands: 4"));
        assert!(output.contains("Most frequent: create (2)"));
    }

    #[test]
    fn test_context_memory_on_empty_store() {
        let (toolbox, _dir) = toolbox();
        let (mut console, transcript) = console("");
        assert_eq!(
            context_memory(&toolbox, &mut console).unwrap(),
            ExitCode::Success
        );
        assert!(transcript.contents().contains("No command history recorded yet."));
    }

    #[test]
    fn test_most_frequent_prefers_first_seen_on_tie() {
        let rows: Vec<HistoryRow> = ["tree", "create", "create", "tree"]
            .iter()
            .map(|name| HistoryRow {
                command_name: name.to_string(),
                command_time: "1/1/2025".to_string(),
                duration: crate::history::Elapsed::NotAvailable,
            })
            .collect();
        assert_eq!(most_frequent(&rows), Some(("tree", 2)));
        assert_eq!(most_frequent(&[]), None);
    }
}
