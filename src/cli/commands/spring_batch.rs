//! `generate-spring-batch <project> <template>`.
//!
//! Copies a template tree, asks for project details, then fills the
//! `${...easier}` placeholders in file contents and file names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{Toolbox, clone::copy_tree};
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode, Tone};

const PROJECT_TOKEN: &str = "${project.name.easier}";
const JOB_TOKEN: &str = "${JOB.NAME.easier}";
const PACKAGE_TOKEN: &str = "${package.name.easier}";
const COMMON_VERSION_TOKEN: &str = "${common.version.easier}";
const DESCRIPTION_HEADING: &str = "## Description";

/// Answers collected before the template is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub name: String,
    pub description: String,
    pub package: String,
    pub database: String,
    /// Stored upper-cased.
    pub job: String,
    pub common_version: String,
}

impl ProjectDetails {
    fn ask(name: &str, console: &mut Console) -> io::Result<Self> {
        let highlighted = console.paint(name, Tone::Warning).to_string();
        let mut answer = |heading: &str, question: String| -> io::Result<String> {
            writeln!(console.out(), "{heading} : \n")?;
            Ok(console.prompt(question)?.unwrap_or_default().trim().to_string())
        };

        let description = answer(
            "Description",
            format!("Enter the description of {highlighted}: "),
        )?;
        let package = answer("Package", "Enter the package name: ".to_string())?;
        let database = answer("Data Base", "Enter the database name: ".to_string())?;
        let job = answer("Job Name", "Enter the Job name: ".to_string())?;
        let common_version = answer(
            "common Version",
            "Enter the abb flux common version: ".to_string(),
        )?;

        Ok(Self {
            name: name.to_string(),
            description,
            package,
            database,
            job: job.to_uppercase(),
            common_version,
        })
    }

    fn fill(&self, content: &str) -> String {
        content
            .replace(PROJECT_TOKEN, &self.name)
            .replace(JOB_TOKEN, &self.job)
            .replace(PACKAGE_TOKEN, &self.package)
    }

    fn rename(&self, file_name: &str) -> String {
        file_name
            .replace(JOB_TOKEN, &self.job)
            .replace(COMMON_VERSION_TOKEN, &self.common_version)
    }
}

pub fn run(
    toolbox: &Toolbox,
    project: &str,
    template: &str,
    console: &mut Console,
) -> HandlerResult<ExitCode> {
    let start = console.paint("🚀 Generating Spring Batch project...", Tone::Info);
    writeln!(console.out(), "{start}")?;

    let project_dir = toolbox.resolve(project);
    let template_dir = toolbox.resolve(template);
    if !template_dir.is_dir() {
        return Err(HandlerError::Template(format!(
            "template directory '{}' not found",
            template_dir.display()
        )));
    }
    fs::create_dir(&project_dir)
        .map_err(|e| HandlerError::fs("Error creating folder", &project_dir, e))?;
    copy_tree(&template_dir, &project_dir)?;

    let details = ProjectDetails::ask(project, console)?;
    for (path, renamed) in apply(&project_dir, &details)? {
        let relative = path.strip_prefix(toolbox.workdir()).unwrap_or(&path);
        match renamed {
            Some(new_name) => {
                let note = console.paint(format!("renamed to '{new_name}'"), Tone::Warning);
                writeln!(console.out(), "File '{}' {note}", relative.display())?;
            }
            None => {
                let note = console.paint("updated successfully.", Tone::Success);
                writeln!(console.out(), "File '{}' {note}", relative.display())?;
            }
        }
    }

    let readme = project_dir.join("README.md");
    let current = match fs::read_to_string(&readme) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(HandlerError::fs("Error reading", &readme, e)),
    };
    fs::write(&readme, with_description(&current, &details.description))
        .map_err(|e| HandlerError::fs("Error writing", &readme, e))?;

    crate::debug_event!("spring_batch", "generated", "{details:?}");
    writeln!(
        console.out(),
        "Spring Batch project '{project}' generated from the template (database: {}).",
        details.database
    )?;
    Ok(ExitCode::Success)
}

/// Fill placeholders below `root`. Returns every touched file, with its new
/// name when it was renamed.
pub fn apply(root: &Path, details: &ProjectDetails) -> HandlerResult<Vec<(PathBuf, Option<String>)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let mut touched = Vec::new();
    for path in files {
        let bytes = fs::read(&path).map_err(|e| HandlerError::fs("Error reading", &path, e))?;
        // Binary files keep their contents; only their names are rewritten.
        if let Ok(text) = String::from_utf8(bytes) {
            let filled = details.fill(&text);
            if filled != text {
                fs::write(&path, filled).map_err(|e| HandlerError::fs("Error writing", &path, e))?;
                touched.push((path.clone(), None));
            }
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let new_name = details.rename(file_name);
        if new_name != file_name {
            let target = path.with_file_name(&new_name);
            fs::rename(&path, &target).map_err(|e| HandlerError::fs("Error renaming", &path, e))?;
            touched.push((path, Some(new_name)));
        }
    }
    Ok(touched)
}

/// Replace the `## Description` section (up to the next `##` heading), or
/// append one when the README has none.
pub fn with_description(readme: &str, description: &str) -> String {
    match readme.find(DESCRIPTION_HEADING) {
        Some(start) => {
            let body = start + DESCRIPTION_HEADING.len();
            let end = readme[body..]
                .find("##")
                .map_or(readme.len(), |offset| body + offset);
            format!(
                "{}{DESCRIPTION_HEADING}\n\n{description}\n\n{}",
                &readme[..start],
                &readme[end..]
            )
        }
        None => format!("{readme}\n\n{DESCRIPTION_HEADING}\n\n{description}\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;

    const ANSWERS: &str = "Nightly settlement batch\ncom.acme.batch\npostgres\nsettle\n2.3.1\n";

    fn write_template(root: &Path) {
        fs::create_dir_all(root.join("src/main/java")).unwrap();
        fs::write(
            root.join("src/main/java/${JOB.NAME.easier}Config.java"),
            "package ${package.name.easier};\n// ${project.name.easier} runs ${JOB.NAME.easier}\n",
        )
        .unwrap();
        fs::write(root.join("lib-${common.version.easier}.jar"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(
            root.join("README.md"),
            "# ${project.name.easier}\n\n## Description\nplaceholder\n\n## Usage\nrun it\n",
        )
        .unwrap();
    }

    #[test]
    fn test_generates_project_from_template() {
        let (toolbox, dir) = toolbox();
        write_template(&dir.path().join("template"));
        let (mut console, transcript) = console(ANSWERS);

        let code = run(&toolbox, "billing", "template", &mut console).unwrap();
        assert_eq!(code, ExitCode::Success);

        let project = dir.path().join("billing");
        let java = fs::read_to_string(project.join("src/main/java/SETTLEConfig.java")).unwrap();
        assert_eq!(java, "package com.acme.batch;\n// billing runs SETTLE\n");
        assert_eq!(
            fs::read(project.join("lib-2.3.1.jar")).unwrap(),
            vec![0xff, 0xfe, 0x00]
        );

        let readme = fs::read_to_string(project.join("README.md")).unwrap();
        assert_eq!(
            readme,
            "# billing\n\n## Description\n\nNightly settlement batch\n\n## Usage\nrun it\n"
        );

        let output = transcript.contents();
        assert!(output.contains("Enter the description of billing: "));
        assert!(output.contains("Spring Batch project 'billing' generated from the template"));
        // template is left untouched
        assert!(
            dir.path()
                .join("template/src/main/java/${JOB.NAME.easier}Config.java")
                .exists()
        );
    }

    #[test]
    fn test_missing_template_creates_nothing() {
        let (toolbox, dir) = toolbox();
        let (mut console, _) = console(ANSWERS);
        assert!(run(&toolbox, "billing", "missing", &mut console).is_err());
        assert!(!dir.path().join("billing").exists());
    }

    #[test]
    fn test_description_is_appended_when_absent() {
        assert_eq!(
            with_description("# Title\n", "About"),
            "# Title\n\n\n## Description\n\nAbout\n\n"
        );
    }

    #[test]
    fn test_description_section_at_end_is_replaced() {
        assert_eq!(
            with_description("# T\n## Description\nold text", "new"),
            "# T\n## Description\n\nnew\n\n"
        );
    }

    #[test]
    fn test_unreadable_tree_is_walk_error() {
        let (_toolbox, dir) = toolbox();
        let (mut console, _) = Console::scripted(ANSWERS);
        let details = ProjectDetails::ask("billing", &mut console).unwrap();

        let err = apply(&dir.path().join("missing"), &details).unwrap_err();
        assert!(matches!(err, HandlerError::Walk(_)));
    }

    #[test]
    fn test_end_of_input_leaves_answers_empty() {
        let (mut console, _) = Console::scripted("");
        let details = ProjectDetails::ask("p", &mut console).unwrap();
        assert!(details.description.is_empty());
        assert!(details.job.is_empty());
    }
}
