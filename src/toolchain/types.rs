use std::fmt;
use std::path::PathBuf;

/// Supported host operating systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    /// macOS, provisioned through Homebrew
    Darwin,
    /// Linux, provisioned through apt
    Linux,
}

impl OsKind {
    /// Map a Rust `target_os` (or `uname -s`) name onto a supported host.
    ///
    /// Anything that is not macOS gets the Linux profile.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "macos" | "darwin" | "Darwin" => OsKind::Darwin,
            _ => OsKind::Linux,
        }
    }

    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Name used for the default build directory (`Linux_build`, `Darwin_build`).
    pub fn name(&self) -> &'static str {
        match self {
            OsKind::Darwin => "Darwin",
            OsKind::Linux => "Linux",
        }
    }

    /// (C compiler, C++ compiler) looked up on the search path.
    pub fn compiler_names(&self) -> (&'static str, &'static str) {
        match self {
            OsKind::Darwin => ("clang", "clang++"),
            OsKind::Linux => ("gcc", "g++"),
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything downstream needs to know about the host, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    pub os_kind: OsKind,

    /// Absolute path to the C compiler, if one was found
    pub c_compiler: Option<PathBuf>,

    /// Absolute path to the C++ compiler, if one was found
    pub cxx_compiler: Option<PathBuf>,

    pub debugger: String,

    /// Appended to the executable name (`.elf`, `.Mach-O`)
    pub executable_suffix: String,

    /// Running the application needs root (realtime scheduling on Linux)
    pub privilege_required: bool,
}

impl PlatformProfile {
    /// Profile for `os_kind` with no compilers resolved yet.
    pub fn new(os_kind: OsKind) -> Self {
        let (debugger, suffix, privileged) = match os_kind {
            OsKind::Darwin => ("lldb", ".Mach-O", false),
            OsKind::Linux => ("gdb", ".elf", true),
        };

        Self {
            os_kind,
            c_compiler: None,
            cxx_compiler: None,
            debugger: debugger.to_string(),
            executable_suffix: suffix.to_string(),
            privilege_required: privileged,
        }
    }

    pub fn with_compilers(mut self, cc: Option<PathBuf>, cxx: Option<PathBuf>) -> Self {
        self.c_compiler = cc;
        self.cxx_compiler = cxx;
        self
    }
}
