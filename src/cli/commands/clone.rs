//! Repository-backed generators: `generate-react-native` and `download-language`.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::{Toolbox, process};
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode, Tone};

/// Copy the contents of `from` into `to`, creating directories as needed.
/// `.git` metadata is not copied.
pub fn copy_tree(from: &Path, to: &Path) -> HandlerResult<usize> {
    let mut copied = 0;
    let walker = WalkDir::new(from)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| HandlerError::Template(e.to_string()))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| HandlerError::fs("Error creating folder", &target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| HandlerError::fs("Error creating folder", parent, e))?;
            }
            fs::copy(entry.path(), &target)
                .map_err(|e| HandlerError::fs("Error copying", entry.path(), e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn banner(console: &mut Console, action: &str) -> std::io::Result<()> {
    let border = "*".repeat(60);
    let blank = format!("*{}*", " ".repeat(58));
    writeln!(console.out(), "{border}\n{blank}")?;
    for (text, tone) in [
        ("EASIER CLI Tool", Tone::Accent),
        (action, Tone::Info),
        ("Please wait...", Tone::Warning),
    ] {
        let line = console.paint(format!("{text:^58}"), tone);
        writeln!(console.out(), "*{line}*")?;
    }
    writeln!(console.out(), "{blank}\n{border}")
}

/// Clone the React Native template into a scratch directory, copy it into
/// `<app>`, then install node modules there.
pub fn react_native(toolbox: &Toolbox, app: &str, console: &mut Console) -> HandlerResult<ExitCode> {
    banner(console, "Generating your React Native app...")?;

    let scratch = tempfile::Builder::new()
        .prefix("temp_")
        .tempdir_in(toolbox.workdir())
        .map_err(|e| HandlerError::fs("Error creating", toolbox.workdir(), e))?;
    let checkout = scratch.path().join("template");
    let repo = &toolbox.settings().templates.react_native_repo;
    process::run(
        "git",
        [OsStr::new("clone"), OsStr::new(repo), checkout.as_os_str()],
        toolbox.workdir(),
    )?;

    let app_dir = toolbox.resolve(app);
    fs::create_dir_all(&app_dir)
        .map_err(|e| HandlerError::fs("Error creating folder", &app_dir, e))?;
    copy_tree(&checkout, &app_dir)?;
    scratch
        .close()
        .map_err(|e| HandlerError::fs("Error removing", toolbox.workdir(), e))?;

    writeln!(
        console.out(),
        "React Native app '{app}' generated from the GitHub template."
    )?;

    process::run("yarn", ["install"], &app_dir)?;
    writeln!(console.out(), "Node.js modules installed successfully.")?;
    Ok(ExitCode::Success)
}

/// Clone the language repository into `<project>` and prepare it.
pub fn language(toolbox: &Toolbox, project: &str, console: &mut Console) -> HandlerResult<ExitCode> {
    banner(console, "Downloading Easier Programming Language...")?;

    let repo = &toolbox.settings().templates.language_repo;
    let cloning = console.paint("Cloning Easier language repository...", Tone::Info);
    writeln!(console.out(), "{cloning}")?;

    if let Err(e) = process::run("git", ["clone", repo.as_str(), project], toolbox.workdir()) {
        let tips = console.paint("💡 Troubleshooting tips:", Tone::Warning);
        writeln!(console.out(), "{tips}")?;
        writeln!(console.out(), "   - Make sure you have Git installed")?;
        writeln!(console.out(), "   - Check your internet connection")?;
        writeln!(console.out(), "   - Verify the repository URL: {repo}")?;
        return Err(e);
    }

    let done = console.paint(
        format!("✓ Easier language downloaded successfully to '{project}' directory."),
        Tone::Success,
    );
    writeln!(console.out(), "{done}")?;

    finish_language_setup(&toolbox.resolve(project), project, console)?;
    Ok(ExitCode::Success)
}

/// Post-clone steps: optional `npm install`, documentation check, next steps.
pub fn finish_language_setup(dir: &Path, project: &str, console: &mut Console) -> HandlerResult<()> {
    if dir.join("package.json").is_file() {
        let installing = console.paint("Installing language dependencies...", Tone::Info);
        writeln!(console.out(), "{installing}")?;
        match process::run("npm", ["install"], dir) {
            Ok(()) => {
                let ok = console.paint("✓ Dependencies installed successfully.", Tone::Success);
                writeln!(console.out(), "{ok}")?;
            }
            Err(e) => {
                tracing::warn!("npm install failed in {}: {e}", dir.display());
                let warn = console.paint(
                    "⚠ Could not install dependencies automatically. You may need to run 'npm install' manually.",
                    Tone::Warning,
                );
                writeln!(console.out(), "{warn}")?;
            }
        }
    }

    if dir.join("README.md").is_file() {
        let docs = console.paint("📚 Documentation found: README.md", Tone::Info);
        writeln!(console.out(), "{docs}")?;
    }

    let complete = console.paint("🎉 Easier Language Setup Complete!", Tone::Success);
    let next = console.paint("Next steps:", Tone::Info);
    writeln!(console.out(), "\n{complete}\n")?;
    writeln!(console.out(), "{next}")?;
    writeln!(console.out(), "1. Navigate to your project: cd {project}")?;
    writeln!(console.out(), "2. Read the documentation: cat README.md")?;
    writeln!(console.out(), "3. Explore the language examples and start coding!")?;
    writeln!(console.out(), "\nHappy coding with Easier Language! 🚀")?;
    Ok(())
}
