//! One-shot probe for the optional tools a run needs.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::checker;
use crate::host::Host;
use crate::request::CommandKind;

/// A tool that may be missing and can be installed on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Doxygen,
    Valgrind,
    ClangTidy,
    Cppcheck,
}

impl Tool {
    pub fn for_command(command: CommandKind) -> Option<Tool> {
        match command {
            CommandKind::Doxygen => Some(Tool::Doxygen),
            CommandKind::Valgrind => Some(Tool::Valgrind),
            CommandKind::ClangTidy => Some(Tool::ClangTidy),
            CommandKind::Cppcheck => Some(Tool::Cppcheck),
            CommandKind::Clean | CommandKind::Build | CommandKind::Run | CommandKind::Test => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Doxygen => "Doxygen",
            Tool::Valgrind => "Valgrind",
            Tool::ClangTidy => "Clang-tidy",
            Tool::Cppcheck => "Cppcheck",
        }
    }

    /// Logical name handed to the installer.
    pub fn package(&self) -> &'static str {
        match self {
            Tool::Doxygen => "doxygen",
            Tool::Valgrind => "valgrind",
            Tool::ClangTidy => "llvm",
            Tool::Cppcheck => "cppcheck",
        }
    }

    pub fn locate(&self, host: &mut dyn Host) -> Option<PathBuf> {
        match self {
            Tool::ClangTidy => checker::locate_clang_tidy(host),
            other => host.locate(other.package()),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where each needed tool was found. Built once, never updated.
#[derive(Debug, Default, Clone)]
pub struct Capabilities {
    found: HashMap<Tool, PathBuf>,
    probed: Vec<Tool>,
}

impl Capabilities {
    /// Locate the tools behind `commands`, once each.
    pub fn probe(host: &mut dyn Host, commands: &[CommandKind]) -> Self {
        let mut caps = Self::default();
        for tool in commands.iter().filter_map(|c| Tool::for_command(*c)) {
            if caps.probed.contains(&tool) {
                continue;
            }
            caps.probed.push(tool);
            if let Some(path) = tool.locate(host) {
                caps.found.insert(tool, path);
            }
        }
        caps
    }

    pub fn get(&self, tool: Tool) -> Option<&Path> {
        self.found.get(&tool).map(PathBuf::as_path)
    }

    pub fn was_probed(&self, tool: Tool) -> bool {
        self.probed.contains(&tool)
    }
}
