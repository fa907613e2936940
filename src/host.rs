//! Host system access.
//!
//! Every external effect the dispatcher needs goes through the [`Host`] trait:
//! locating executables, running processes, checking the current user and
//! asking the developer a yes/no question. [`SystemHost`] talks to the real
//! machine; tests substitute a recording fake.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// A single external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory for the child; `None` inherits ours.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// File name of the program, used for messages and lookups.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or_else(|| OsStr::new(""))
            .to_string_lossy()
            .to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        if let Some(dir) = &self.cwd {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}

/// Result of a process whose stdout was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

pub trait Host {
    /// Find `program` on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion with inherited stdio, returning the exit code.
    fn run(&mut self, invocation: &Invocation) -> Result<i32>;

    /// Run to completion capturing stdout.
    fn capture(&mut self, invocation: &Invocation) -> Result<Captured>;

    /// Whether the current user is the superuser.
    fn is_privileged_user(&self) -> bool;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> bool;
}

/// The real machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        let status = invocation
            .command()
            .status()
            .with_context(|| format!("Failed to run {}", invocation.program.display()))?;
        // Killed by a signal: no code to mirror.
        Ok(status.code().unwrap_or(1))
    }

    fn capture(&mut self, invocation: &Invocation) -> Result<Captured> {
        let output = invocation
            .command()
            .output()
            .with_context(|| format!("Failed to run {}", invocation.program.display()))?;
        Ok(Captured {
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        })
    }

    #[cfg(unix)]
    fn is_privileged_user(&self) -> bool {
        use nix::unistd::{Uid, User};

        let uid = Uid::current();
        match User::from_uid(uid) {
            Ok(Some(user)) => user.name == "root",
            _ => uid.is_root(),
        }
    }

    #[cfg(not(unix))]
    fn is_privileged_user(&self) -> bool {
        false
    }

    fn confirm(&mut self, question: &str) -> bool {
        inquire::Confirm::new(question)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}
