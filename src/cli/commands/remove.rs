//! `--remove`: uninstall the tool. Confirmation happens in the router.

use super::{Toolbox, process};
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode, Tone};

pub fn run(toolbox: &Toolbox, console: &mut Console) -> HandlerResult<ExitCode> {
    let Some((program, args)) = toolbox.settings().templates.uninstall_command.split_first() else {
        return Err(HandlerError::Template(
            "uninstall command is empty".to_string(),
        ));
    };

    process::run(program, args, toolbox.workdir())?;
    let done = console.paint("EASIER has been removed successfully.", Tone::Success);
    writeln!(console.out(), "{done}")?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        let (mut toolbox, _dir) = toolbox();
        toolbox.settings.templates.uninstall_command.clear();
        let (mut console, _) = console("");
        assert!(matches!(
            run(&toolbox, &mut console),
            Err(HandlerError::Template(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_configured_command() {
        let (mut toolbox, dir) = toolbox();
        toolbox.settings.templates.uninstall_command =
            vec!["sh".to_string(), "-c".to_string(), "touch removed".to_string()];
        let (mut console, transcript) = console("");
        assert_eq!(run(&toolbox, &mut console).unwrap(), ExitCode::Success);
        assert!(dir.path().join("removed").exists());
        assert!(transcript.contents().contains("EASIER has been removed successfully."));
    }
}
