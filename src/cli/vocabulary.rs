//! The command vocabulary.
//!
//! Every command the router understands is one [`CommandSpec`] row in a single
//! static table. Arity counts include the command token itself, so `create demo`
//! has an argument count of 2.

use std::fmt;

/// Operation a command resolves to. Handlers switch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Version,
    Help,
    Info,
    DisplayHistory,
    ContextMemory,
    Remove,
    Generate,
    Create,
    CreateFile,
    Tree,
    GenerateReactNative,
    DownloadLanguage,
    DownloadArtifacts,
    CheckFile,
    GenerateSpringBatch,
    SystemInfo,
    Interactive,
}

/// Accepted argument counts, command token included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Prompt shown before a destructive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub question: &'static str,
    /// Printed when the answer is anything but yes/y.
    pub cancelled: &'static str,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub arity: Arity,
    /// Expected form, printed after `Usage:`.
    pub usage: &'static str,
    pub example: &'static str,
    /// Extra line shown under a usage error.
    pub hint: Option<&'static str>,
    /// One-line description for the help screen.
    pub summary: &'static str,
    /// Yes/no question asked before the handler runs.
    pub confirm: Option<Confirmation>,
    pub action: Action,
}

impl CommandSpec {
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.alias == Some(token)
    }

    /// `--version, -v` style label used by the help screen.
    pub fn label(&self) -> String {
        match self.alias {
            Some(alias) => format!("{}, {alias}", self.name),
            None => self.name.to_string(),
        }
    }

    pub fn is_option(&self) -> bool {
        self.name.starts_with("--")
    }
}

static COMMANDS: [CommandSpec; 17] = [
    CommandSpec {
        name: "--version",
        alias: Some("-v"),
        arity: Arity::Exactly(1),
        usage: "--version",
        example: "easier --version",
        hint: None,
        summary: "Display the version of the CLI tool",
        confirm: None,
        action: Action::Version,
    },
    CommandSpec {
        name: "--help",
        alias: Some("-h"),
        arity: Arity::Exactly(1),
        usage: "--help",
        example: "easier --help",
        hint: None,
        summary: "Display this help message",
        confirm: None,
        action: Action::Help,
    },
    CommandSpec {
        name: "--info",
        alias: Some("-i"),
        arity: Arity::Exactly(1),
        usage: "--info",
        example: "easier --info",
        hint: None,
        summary: "Display additional information about EASIER",
        confirm: None,
        action: Action::Info,
    },
    CommandSpec {
        name: "--display-history",
        alias: Some("-dh"),
        arity: Arity::Exactly(1),
        usage: "--display-history",
        example: "easier --display-history",
        hint: None,
        summary: "Display the command history",
        confirm: None,
        action: Action::DisplayHistory,
    },
    CommandSpec {
        name: "context-memory",
        alias: Some("-cm"),
        arity: Arity::Exactly(1),
        usage: "context-memory",
        example: "easier context-memory",
        hint: None,
        summary: "Show recent commands with timing",
        confirm: None,
        action: Action::ContextMemory,
    },
    CommandSpec {
        name: "--remove",
        alias: Some("-r"),
        arity: Arity::Exactly(1),
        usage: "--remove",
        example: "easier --remove",
        hint: None,
        summary: "Remove the EASIER cli",
        confirm: Some(Confirmation {
            question: "Do you want to remove EASIER? (yes/no): ",
            cancelled: "Removal canceled.",
        }),
        action: Action::Remove,
    },
    CommandSpec {
        name: "generate",
        alias: Some("-g"),
        arity: Arity::Exactly(2),
        usage: "generate <name>",
        example: "easier generate mypage",
        hint: None,
        summary: "Generate an HTML file with the specified name",
        confirm: None,
        action: Action::Generate,
    },
    CommandSpec {
        name: "create",
        alias: Some("-c"),
        arity: Arity::Exactly(2),
        usage: "create <folderName>",
        example: "easier create my-project",
        hint: None,
        summary: "Create a new folder with the specified name",
        confirm: None,
        action: Action::Create,
    },
    CommandSpec {
        name: "create-file",
        alias: Some("-cf"),
        arity: Arity::Exactly(3),
        usage: "create-file <subfolderName> <file-name>",
        example: "easier create-file src index.js",
        hint: None,
        summary: "Create a new file in a subfolder",
        confirm: None,
        action: Action::CreateFile,
    },
    CommandSpec {
        name: "tree",
        alias: Some("-t"),
        arity: Arity::Exactly(2),
        usage: "tree <directory-path>",
        example: "easier tree ./src",
        hint: None,
        summary: "Export the directory tree of a specified path",
        confirm: None,
        action: Action::Tree,
    },
    CommandSpec {
        name: "generate-react-native",
        alias: None,
        arity: Arity::Exactly(2),
        usage: "generate-react-native <app-name>",
        example: "easier generate-react-native MyAwesomeApp",
        hint: None,
        summary: "Generate a React Native app from a EASIER template",
        confirm: None,
        action: Action::GenerateReactNative,
    },
    CommandSpec {
        name: "download-language",
        alias: Some("-dl"),
        arity: Arity::Exactly(2),
        usage: "download-language <project-name>",
        example: "easier download-language my-easier-project",
        hint: Some("This command clones the repository from GitHub"),
        summary: "Download and setup Easier programming language from GitHub",
        confirm: None,
        action: Action::DownloadLanguage,
    },
    CommandSpec {
        name: "download-artifacts",
        alias: Some("-da"),
        arity: Arity::AtLeast(2),
        usage: "download-artifacts <project-name> [repo-owner/repo-name]",
        example: "easier download-artifacts my-project custom-owner/custom-repo",
        hint: Some("This command downloads pre-built artifacts for your operating system"),
        summary: "Download pre-built artifacts for the detected OS",
        confirm: None,
        action: Action::DownloadArtifacts,
    },
    CommandSpec {
        name: "check-file",
        alias: Some("-chk"),
        arity: Arity::Exactly(1),
        usage: "check-file",
        example: "easier check-file",
        hint: None,
        summary: "Check whether easier.eas exists in the current project",
        confirm: None,
        action: Action::CheckFile,
    },
    CommandSpec {
        name: "generate-spring-batch",
        alias: Some("-gsb"),
        arity: Arity::AtLeast(3),
        usage: "generate-spring-batch <project-name> <template-path>",
        example: "easier generate-spring-batch my-batch-project ./templates/spring-batch",
        hint: None,
        summary: "Generate a Spring Batch project from a template",
        confirm: None,
        action: Action::GenerateSpringBatch,
    },
    CommandSpec {
        name: "system-info",
        alias: Some("-si"),
        arity: Arity::Exactly(1),
        usage: "system-info",
        example: "easier system-info",
        hint: None,
        summary: "Show operating system and architecture information",
        confirm: None,
        action: Action::SystemInfo,
    },
    CommandSpec {
        name: "interactive",
        alias: Some("-int"),
        arity: Arity::Exactly(1),
        usage: "interactive",
        example: "easier interactive",
        hint: None,
        summary: "Enter interactive mode",
        confirm: None,
        action: Action::Interactive,
    },
];

/// Immutable set of command specs consulted by the router.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    specs: &'static [CommandSpec],
}

impl Vocabulary {
    /// The vocabulary shipped with the binary.
    pub fn builtin() -> Self {
        Self { specs: &COMMANDS }
    }

    /// Exact, case-sensitive lookup by canonical name or alias.
    pub fn find(&self, token: &str) -> Option<&'static CommandSpec> {
        self.specs.iter().find(|spec| spec.matches(token))
    }

    pub fn iter(&self) -> std::slice::Iter<'static, CommandSpec> {
        self.specs.iter()
    }

    /// Canonical names in table order.
    pub fn names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.name).collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
