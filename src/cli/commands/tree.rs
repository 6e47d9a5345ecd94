//! `tree <path>`: export an indented listing to `directory_tree.txt`.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::Toolbox;
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode};

pub const EXPORT_FILE: &str = "directory_tree.txt";

/// Header line plus one line per entry, two spaces per level, directories
/// suffixed with `/`. Siblings are sorted by name.
pub fn render(root: &Path, label: &str) -> HandlerResult<String> {
    let mut lines = vec![format!("Directory tree for: {label}")];
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let indent = "  ".repeat(entry.depth() - 1);
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            lines.push(format!("{indent}{name}/"));
        } else {
            lines.push(format!("{indent}{name}"));
        }
    }
    Ok(lines.join("\n"))
}

pub fn run(toolbox: &Toolbox, path: &str, console: &mut Console) -> HandlerResult<ExitCode> {
    let root = toolbox.resolve(path);
    let listing = render(&root, path)?;

    let export = toolbox.resolve(EXPORT_FILE);
    fs::write(&export, listing).map_err(|e| HandlerError::fs("Error writing", &export, e))?;
    writeln!(console.out(), "Directory tree has been exported to {EXPORT_FILE}")?;
    Ok(ExitCode::Success)
}
