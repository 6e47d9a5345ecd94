//! Welcome banner, help screen and tool description.

use std::io;

use crate::cli::vocabulary::{CommandSpec, Vocabulary};
use crate::io::{Console, Tone};
use crate::platform::OsInfo;

pub const CONTACT: &str = "easier@gmail.com";

const NAME: &str = "Easier";
const DESCRIPTION: &str = "A versatile CLI tool designed to simplify development and templating \
processes for various frameworks like React Native, React.js, Angular, and more. Make development \
and project setup easier!";

const FRAME_WIDTH: usize = 58;

fn framed(console: &mut Console, lines: &[(&str, Tone)]) -> io::Result<()> {
    let border = "*".repeat(FRAME_WIDTH + 2);
    let blank = format!("*{}*", " ".repeat(FRAME_WIDTH));
    writeln!(console.out())?;
    writeln!(console.out(), "  {border}")?;
    writeln!(console.out(), "  {blank}")?;
    for (text, tone) in lines {
        let centered = format!("{text:^FRAME_WIDTH$}");
        let painted = console.paint(centered, *tone);
        writeln!(console.out(), "  *{painted}*")?;
    }
    writeln!(console.out(), "  {blank}")?;
    writeln!(console.out(), "  {border}")?;
    writeln!(console.out())
}

/// Banner plus detected system, shown for a bare `easier` and on `clear`.
pub fn print_welcome(console: &mut Console, os: &OsInfo) -> io::Result<()> {
    framed(
        console,
        &[
            ("EASIER CLI Tool", Tone::Accent),
            ("Enhanced Version", Tone::Info),
            ("Artifact Download Ready", Tone::Info),
        ],
    )?;
    let system = console.paint(format!("🖥️  Detected System: {}", os.display_name), Tone::Info);
    let arch = console.paint(format!("🏗️  Architecture: {}", os.arch), Tone::Info);
    let ready = console.paint("📦 Ready for artifact downloads!", Tone::Info);
    writeln!(console.out(), "{system}")?;
    writeln!(console.out(), "{arch}")?;
    writeln!(console.out(), "{ready}\n")
}

fn help_label(spec: &CommandSpec) -> String {
    let operands = spec.usage.strip_prefix(spec.name).unwrap_or_default();
    format!("{}{operands}", spec.label())
}

pub fn print_help(console: &mut Console, vocabulary: &Vocabulary) -> io::Result<()> {
    writeln!(console.out(), "\nUsage: easier [command] [options]\n")?;

    let (options, commands): (Vec<&CommandSpec>, Vec<&CommandSpec>) =
        vocabulary.iter().partition(|spec| spec.is_option());

    writeln!(console.out(), "Commands:\n")?;
    let bare = console.paint(format!("{:<56}", "easier"), Tone::Info);
    writeln!(console.out(), "  {bare}Display information about easier.")?;
    for spec in commands {
        let label = console.paint(format!("{:<56}", help_label(spec)), Tone::Info);
        writeln!(console.out(), "  {label}{}.", spec.summary)?;
    }

    writeln!(console.out(), "\nOptions:\n")?;
    for spec in options {
        let label = console.paint(format!("{:<56}", help_label(spec)), Tone::Info);
        writeln!(console.out(), "  {label}{}", spec.summary)?;
    }
    Ok(())
}

pub fn print_info(console: &mut Console) -> io::Result<()> {
    framed(console, &[("EASIER CLI Tool", Tone::Accent)])?;
    let name = console.paint(NAME, Tone::Success);
    writeln!(console.out(), "{name}")?;
    writeln!(console.out(), "{DESCRIPTION}")?;
    writeln!(console.out(), "Contact us at {CONTACT}")
}

pub fn print_version(console: &mut Console) -> io::Result<()> {
    writeln!(console.out(), "Version: {}", env!("CARGO_PKG_VERSION"))
}

/// Commands understood only inside `easier interactive`.
pub fn print_interactive_help(console: &mut Console) -> io::Result<()> {
    let heading = console.paint("Available commands in interactive mode:", Tone::Info);
    writeln!(console.out(), "{heading}")?;
    writeln!(console.out(), "  help - Show this help")?;
    writeln!(console.out(), "  system-info - Show system information")?;
    writeln!(console.out(), "  context-memory - Show operation history")?;
    writeln!(console.out(), "  clear - Clear screen")?;
    writeln!(console.out(), "  exit/quit - Exit interactive mode")?;
    writeln!(console.out(), "  Any regular easier command (without 'easier' prefix)")
}

/// Line printed when a termination signal ends the process.
pub fn shutdown_notice(signal: &str) -> String {
    format!("\n👋 Received {signal}. Gracefully shutting down...")
}
