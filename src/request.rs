//! What the developer asked for.
//!
//! A [`BuildRequest`] is built once from the command line and only read after
//! that. Commands are a closed enum collected into an ordered set, so the
//! dispatch order comes from the enum itself rather than from argument order.

use anyhow::{Result, bail};
use clap::ValueEnum;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const DEFAULT_CLANG_TIDY_CHECKS: &str = "cppcoreguidelines-*";

/// A sub-command. Variant order is dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum CommandKind {
    /// Remove the build directory
    Clean,
    /// Configure with CMake and compile with Ninja
    Build,
    /// Run the executable on this host
    Run,
    /// Build the Doxygen documentation
    Doxygen,
    /// Run the executable under Valgrind
    Valgrind,
    /// Run clang-tidy over --path-to-analyze
    ClangTidy,
    /// Run cppcheck over --path-to-analyze
    Cppcheck,
    /// Build and test is handled elsewhere; suppresses `build`
    Test,
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Clean => "clean",
            CommandKind::Build => "build",
            CommandKind::Run => "run",
            CommandKind::Doxygen => "doxygen",
            CommandKind::Valgrind => "valgrind",
            CommandKind::ClangTidy => "clang-tidy",
            CommandKind::Cppcheck => "cppcheck",
            CommandKind::Test => "test",
        }
    }

    /// Whether this command reads `--path-to-analyze`.
    pub fn needs_analysis_path(&self) -> bool {
        matches!(self, CommandKind::ClangTidy | CommandKind::Cppcheck)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuildType {
    #[default]
    #[value(name = "Debug")]
    Debug,
    #[value(name = "Release")]
    Release,
    #[value(name = "Sanitize")]
    Sanitize,
}

impl BuildType {
    /// CMake define selecting this build type. Debug is CMake's default here.
    pub fn define(&self) -> Option<&'static str> {
        match self {
            BuildType::Debug => None,
            BuildType::Release => Some("-DRELEASE_BUILD=1"),
            BuildType::Sanitize => Some("-DSANITIZE_BUILD=1"),
        }
    }
}

/// Valgrind sub-tool passed as `--tool=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValgrindTool {
    #[default]
    Memcheck,
    Cachegrind,
    Callgrind,
    Helgrind,
    Drd,
    Massif,
    Dhat,
}

impl ValgrindTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValgrindTool::Memcheck => "memcheck",
            ValgrindTool::Cachegrind => "cachegrind",
            ValgrindTool::Callgrind => "callgrind",
            ValgrindTool::Helgrind => "helgrind",
            ValgrindTool::Drd => "drd",
            ValgrindTool::Massif => "massif",
            ValgrindTool::Dhat => "dhat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub commands: BTreeSet<CommandKind>,
    /// Directory holding the top-level CMakeLists.txt
    pub project_dir: PathBuf,
    pub build_type: BuildType,
    /// CMake toolchain file used instead of the host compilers
    pub toolchain_file: Option<PathBuf>,
    /// Cross-compilation target, also names the build directory
    pub target: Option<String>,
    pub valgrind_tool: ValgrindTool,
    /// clang-tidy `-checks=` value
    pub lint_checks: String,
    /// File or directory handed to clang-tidy and cppcheck
    pub analyze_path: Option<PathBuf>,
}

impl BuildRequest {
    pub fn new(commands: impl IntoIterator<Item = CommandKind>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            project_dir: PathBuf::from("."),
            build_type: BuildType::default(),
            toolchain_file: None,
            target: None,
            valgrind_tool: ValgrindTool::default(),
            lint_checks: DEFAULT_CLANG_TIDY_CHECKS.to_string(),
            analyze_path: None,
        }
    }

    pub fn wants(&self, command: CommandKind) -> bool {
        self.commands.contains(&command)
    }

    /// Commands to execute, in dispatch order.
    ///
    /// `test` never runs here, and it suppresses `build`.
    pub fn actions(&self) -> Vec<CommandKind> {
        let testing = self.wants(CommandKind::Test);
        self.commands
            .iter()
            .copied()
            .filter(|c| match c {
                CommandKind::Test => false,
                CommandKind::Build => !testing,
                _ => true,
            })
            .collect()
    }

    /// Reject requests that could only fail part-way through a run.
    pub fn validate(&self) -> Result<()> {
        if self.commands.is_empty() {
            bail!("No command given. Choose from: clean, build, run, doxygen, valgrind, clang-tidy, cppcheck");
        }

        if self.analyze_path.is_none()
            && let Some(cmd) = self.commands.iter().find(|c| c.needs_analysis_path())
        {
            bail!(
                "'{}' needs a file or directory to analyze. Pass it with --path-to-analyze <PATH>",
                cmd.name()
            );
        }

        if let Some(target) = &self.target
            && target.trim().is_empty()
        {
            bail!("--target must not be empty");
        }

        Ok(())
    }
}
