//! `check-file`: report whether the project marker file is present.

use super::Toolbox;
use crate::error::HandlerResult;
use crate::io::{Console, ExitCode, Tone};

/// Presence is informational; both outcomes exit successfully.
pub fn run(toolbox: &Toolbox, console: &mut Console) -> HandlerResult<ExitCode> {
    let marker = &toolbox.settings().templates.marker_file;
    let checking = console.paint(format!("🔍 Checking for {marker} file..."), Tone::Info);
    writeln!(console.out(), "{checking}")?;

    let message = if toolbox.resolve(marker).is_file() {
        console.paint(format!("The file '{marker}' exists in the project."), Tone::Success)
    } else {
        console.paint(
            format!("The file '{marker}' does not exist in the project."),
            Tone::Error,
        )
    };
    writeln!(console.out(), "{message}")?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;

    #[test]
    fn test_reports_absence_and_presence() {
        let (toolbox, dir) = toolbox();

        let (mut console, transcript) = console("");
        assert_eq!(run(&toolbox, &mut console).unwrap(), ExitCode::Success);
        assert!(transcript.contents().contains("'easier.eas' does not exist"));

        std::fs::write(dir.path().join("easier.eas"), "").unwrap();
        transcript.clear();
        assert_eq!(run(&toolbox, &mut console).unwrap(), ExitCode::Success);
        assert!(transcript.contents().contains("'easier.eas' exists in the project."));
    }
}
