//! File and folder generators: `generate`, `create`, `create-file`.

use std::fs;

use super::Toolbox;
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode, Tone};

/// Minimal HTML page greeting `name`.
pub fn html_page(name: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
  <title>{name}'s HTML Page</title>
</head>
<body>
  <h1>Hello, {name}!</h1>
</body>
</html>"
    )
}

/// Write `<name lower-cased>.html` into the working directory.
pub fn generate_html(toolbox: &Toolbox, name: &str, console: &mut Console) -> HandlerResult<ExitCode> {
    let file_name = format!("{}.html", name.to_lowercase());
    let path = toolbox.resolve(&file_name);
    fs::write(&path, html_page(name)).map_err(|e| HandlerError::fs("Error creating", &path, e))?;

    let done = console.paint(
        format!("HTML file {file_name} has been generated successfully."),
        Tone::Success,
    );
    writeln!(console.out(), "{done}")?;
    Ok(ExitCode::Success)
}

/// Create a single folder. An existing folder is an error.
pub fn create_folder(toolbox: &Toolbox, name: &str, console: &mut Console) -> HandlerResult<ExitCode> {
    let path = toolbox.resolve(name);
    fs::create_dir(&path).map_err(|e| HandlerError::fs("Error creating folder", &path, e))?;

    let done = console.paint(
        format!("Folder {name} has been created successfully."),
        Tone::Success,
    );
    writeln!(console.out(), "{done}")?;
    Ok(ExitCode::Success)
}

/// Create `subfolder` (with parents) and an empty `file_name` inside it.
pub fn create_file(
    toolbox: &Toolbox,
    subfolder: &str,
    file_name: &str,
    console: &mut Console,
) -> HandlerResult<ExitCode> {
    let dir = toolbox.resolve(subfolder);
    fs::create_dir_all(&dir).map_err(|e| HandlerError::fs("Error creating folder", &dir, e))?;

    let path = dir.join(file_name);
    fs::write(&path, "").map_err(|e| HandlerError::fs("Error creating", &path, e))?;

    let done = console.paint(
        format!("File {file_name} has been created in {subfolder} successfully."),
        Tone::Success,
    );
    writeln!(console.out(), "{done}")?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;

    #[test]
    fn test_generate_writes_lowercase_file_with_original_name() {
        let (toolbox, dir) = toolbox();
        let (mut console, transcript) = console("");
        generate_html(&toolbox, "MyPage", &mut console).unwrap();

        let html = fs::read_to_string(dir.path().join("mypage.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>MyPage's HTML Page</title>"));
        assert!(html.contains("<h1>Hello, MyPage!</h1>"));
        assert!(transcript.contents().contains("HTML file mypage.html has been generated"));
    }

    #[test]
    fn test_create_folder_then_again_fails() {
        let (toolbox, dir) = toolbox();
        let (mut console, _) = console("");
        create_folder(&toolbox, "demo", &mut console).unwrap();
        assert!(dir.path().join("demo").is_dir());

        let err = create_folder(&toolbox, "demo", &mut console).unwrap_err();
        assert!(err.to_string().starts_with("Error creating folder"));
    }

    #[test]
    fn test_create_file_makes_nested_parents() {
        let (toolbox, dir) = toolbox();
        let (mut console, transcript) = console("");
        create_file(&toolbox, "src/components", "App.js", &mut console).unwrap();

        let path = dir.path().join("src/components/App.js");
        assert!(path.is_file());
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
        assert!(
            transcript
                .contents()
                .contains("File App.js has been created in src/components successfully.")
        );
    }
}
