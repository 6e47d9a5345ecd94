//! `easier interactive`: a read-dispatch loop over the router.

use crate::cli::handler::CommandHandler;
use crate::cli::router::Router;
use crate::display;
use crate::error::HandlerResult;
use crate::io::{ExitCode, Tone};

pub const PROMPT: &str = "easier> ";

/// Run the session until `exit`, `quit` or end of input.
pub fn run<H: CommandHandler>(router: &mut Router<H>) -> HandlerResult<ExitCode> {
    if router.in_session() {
        let console = router.console_mut();
        let notice = console.paint("Already in interactive mode.", Tone::Warning);
        writeln!(console.out(), "{notice}")?;
        return Ok(ExitCode::Success);
    }

    router.set_in_session(true);
    let result = session(router);
    router.set_in_session(false);
    result
}

fn session<H: CommandHandler>(router: &mut Router<H>) -> HandlerResult<ExitCode> {
    {
        let console = router.console_mut();
        let intro = console.paint("🎮 Entering Interactive Mode...", Tone::Accent);
        let tip = console.paint("💡 Type 'help' for available commands, 'exit' to quit", Tone::Info);
        writeln!(console.out(), "{intro}")?;
        writeln!(console.out(), "{tip}")?;
    }

    loop {
        let console = router.console_mut();
        let prompt = console.paint(PROMPT, Tone::Info);
        let Some(line) = console.prompt(prompt)? else {
            writeln!(console.out())?;
            writeln!(console.out(), "Interactive mode ended.")?;
            return Ok(ExitCode::Success);
        };

        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => {
                let bye = console.paint("👋 Goodbye!", Tone::Success);
                writeln!(console.out(), "{bye}")?;
                return Ok(ExitCode::Success);
            }
            "help" => {
                display::print_interactive_help(console)?;
                continue;
            }
            "clear" => {
                console.clear_screen()?;
                router.print_welcome()?;
                continue;
            }
            _ => {}
        }

        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if let Err(e) = router.dispatch(&args) {
            tracing::debug!("interactive command {args:?} failed: {e}");
            let console = router.console_mut();
            let message = console.paint(format!("❌ Error executing command: {e}"), Tone::Error);
            writeln!(console.err(), "{message}")?;
        }
    }
}
