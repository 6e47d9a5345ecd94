//! Version, help, about and system-info commands.

use crate::cli::vocabulary::Vocabulary;
use crate::display;
use crate::error::HandlerResult;
use crate::io::{Console, ExitCode, Tone};
use crate::platform::OsInfo;

pub fn version(console: &mut Console) -> HandlerResult<ExitCode> {
    display::print_version(console)?;
    Ok(ExitCode::Success)
}

pub fn help(console: &mut Console) -> HandlerResult<ExitCode> {
    display::print_help(console, &Vocabulary::builtin())?;
    Ok(ExitCode::Success)
}

pub fn about(console: &mut Console) -> HandlerResult<ExitCode> {
    display::print_info(console)?;
    Ok(ExitCode::Success)
}

/// Detected platform plus the build's own target.
pub fn system_info(console: &mut Console, os: &OsInfo) -> HandlerResult<ExitCode> {
    let heading = console.paint("🖥️  System Information:", Tone::Info);
    writeln!(console.out(), "{heading}")?;

    let rows = [
        ("Platform", os.display_name.clone()),
        ("Architecture", os.arch.to_string()),
        ("Release", os.release.clone()),
        ("Download Key", os.download_key.clone()),
        ("Tool Version", env!("CARGO_PKG_VERSION").to_string()),
        ("Target OS", std::env::consts::OS.to_string()),
        ("CPU Architecture", std::env::consts::ARCH.to_string()),
    ];
    for (label, value) in rows {
        let label = console.paint(format!("{label}:"), Tone::Warning);
        writeln!(console.out(), "{label} {value}")?;
    }
    Ok(ExitCode::Success)
}
