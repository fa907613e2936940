//! Command dispatch.
//!
//! A run is one linear pass over the requested commands in fixed order:
//! clean, build, run, doxygen, valgrind, clang-tidy, cppcheck. Each action
//! checks its preconditions (root, tool presence) and then runs a single
//! external process to completion.
//!
//! - A missing precondition stops the run gracefully ([`Outcome::Stopped`]).
//! - A failing quality gate (Doxygen, clang-tidy, cppcheck) halts the run with
//!   the tool's own exit code ([`Outcome::Failed`]).
//! - Build, run and Valgrind failures are reported and the run continues.

mod capabilities;

pub use capabilities::{Capabilities, Tool};

use anyhow::{Context, Result};
use colored::*;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use crate::build::{self, BuildDirectory};
use crate::checker::{self, valgrind};
use crate::config::ProjectConfig;
use crate::doc;
use crate::host::{Host, Invocation};
use crate::request::{BuildRequest, CommandKind};
use crate::toolchain::{OsKind, PlatformProfile, install};

/// Why a run ended early without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    PrivilegeRequired(CommandKind),
    InstallDeclined(Tool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Stopped(StopReason),
    /// A quality gate failed with this exit code
    Failed(i32),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed | Outcome::Stopped(_) => 0,
            Outcome::Failed(code) => *code,
        }
    }
}

type Step = ControlFlow<Outcome>;

pub struct Dispatcher<'a> {
    host: &'a mut dyn Host,
    profile: &'a PlatformProfile,
    config: &'a ProjectConfig,
    verbose: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        host: &'a mut dyn Host,
        profile: &'a PlatformProfile,
        config: &'a ProjectConfig,
    ) -> Self {
        Self {
            host,
            profile,
            config,
            verbose: false,
        }
    }

    /// Echo every external command before running it.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn run(&mut self, request: &BuildRequest) -> Result<Outcome> {
        request.validate()?;

        let dir = BuildDirectory::resolve(
            &request.project_dir,
            request.target.as_deref(),
            self.profile.os_kind,
        );
        let actions = request.actions();
        let caps = Capabilities::probe(&mut *self.host, &actions);

        for action in actions {
            let step = match action {
                CommandKind::Clean => self.clean(&dir)?,
                CommandKind::Build => self.build(&dir, request)?,
                CommandKind::Run => self.run_executable(&dir)?,
                CommandKind::Doxygen => self.doxygen(&caps, request)?,
                CommandKind::Valgrind => self.valgrind(&caps, &dir, request)?,
                CommandKind::ClangTidy => self.clang_tidy(&caps, &dir, request)?,
                CommandKind::Cppcheck => self.cppcheck(&caps, request)?,
                CommandKind::Test => ControlFlow::Continue(()),
            };
            if let ControlFlow::Break(outcome) = step {
                return Ok(outcome);
            }
        }

        Ok(Outcome::Completed)
    }

    fn clean(&mut self, dir: &BuildDirectory) -> Result<Step> {
        if dir.clean()? {
            println!("{} Removed {}", "✓".green(), dir.name().cyan());
        } else {
            println!("{} Nothing to clean", "!".yellow());
        }
        Ok(ControlFlow::Continue(()))
    }

    fn build(&mut self, dir: &BuildDirectory, request: &BuildRequest) -> Result<Step> {
        println!(
            "{} Building {} ({:?})...",
            "🔨".blue(),
            dir.name().bold(),
            request.build_type
        );
        dir.ensure()?;

        let args = build::configure_args(self.profile, request)?;
        if let Some(target) = &request.target
            && let Some(tool) = self.config.board_tool(target)
        {
            install::ensure_installed(&mut *self.host, self.profile.os_kind, tool);
        }

        let code = self.exec(&build::configure_invocation(dir, args))?;
        self.report("cmake", code);

        let code = self.exec(&build::compile_invocation(dir))?;
        if code == 0 {
            println!("{} Build finished in {}", "✓".green(), dir.path().display());
        } else {
            self.report("ninja", code);
        }

        Ok(ControlFlow::Continue(()))
    }

    fn run_executable(&mut self, dir: &BuildDirectory) -> Result<Step> {
        if self.lacks_privilege() && self.profile.os_kind == OsKind::Linux {
            println!(
                "{} The operating system uses realtime scheduling which on this platform requires root permission.",
                "!".yellow()
            );
            println!(
                "   {}",
                "https://stackoverflow.com/questions/46874369/thread-explicit-scheduling-posix-api-gives-error"
                    .dimmed()
            );
            return Ok(stop(StopReason::PrivilegeRequired(CommandKind::Run)));
        }

        let exe = self.executable(dir);
        let code = self.exec(&Invocation::new(exe))?;
        self.report(&self.config.project.executable, code);
        Ok(ControlFlow::Continue(()))
    }

    fn doxygen(&mut self, caps: &Capabilities, request: &BuildRequest) -> Result<Step> {
        if let ControlFlow::Break(outcome) = self.require(caps, Tool::Doxygen)? {
            return Ok(ControlFlow::Break(outcome));
        }

        println!("{} Generating documentation...", "📚".magenta());
        let invocation = doc::doxygen_invocation(&request.project_dir, &self.config.doxygen.config);
        let code = self.exec(&invocation)?;
        if code != 0 {
            eprintln!(
                "{} Doxygen exited with failure. Please check the output for errors.",
                "x".red()
            );
            return Ok(ControlFlow::Break(Outcome::Failed(code)));
        }

        println!("{} Documentation generated", "✓".green());
        Ok(ControlFlow::Continue(()))
    }

    fn valgrind(
        &mut self,
        caps: &Capabilities,
        dir: &BuildDirectory,
        request: &BuildRequest,
    ) -> Result<Step> {
        if self.lacks_privilege() {
            println!("{} Re-run with sudo to do valgrind tests", "!".yellow());
            return Ok(stop(StopReason::PrivilegeRequired(CommandKind::Valgrind)));
        }
        if let ControlFlow::Break(outcome) = self.require(caps, Tool::Valgrind)? {
            return Ok(ControlFlow::Break(outcome));
        }

        let exe = self.executable(dir);
        let code = self.exec(&valgrind::valgrind_invocation(request.valgrind_tool, &exe))?;
        self.report("valgrind", code);
        Ok(ControlFlow::Continue(()))
    }

    fn clang_tidy(
        &mut self,
        caps: &Capabilities,
        dir: &BuildDirectory,
        request: &BuildRequest,
    ) -> Result<Step> {
        let clang_tidy = match self.require(caps, Tool::ClangTidy)? {
            ControlFlow::Continue(path) => path,
            ControlFlow::Break(outcome) => return Ok(ControlFlow::Break(outcome)),
        };

        println!("{} Checking code with clang-tidy...", "🔍".magenta());
        let invocation = checker::clang_tidy_invocation(
            &clang_tidy,
            dir,
            &request.lint_checks,
            analysis_path(request)?,
        );
        let code = self.exec(&invocation)?;
        if code != 0 {
            eprintln!("{} Clang-tidy found errors. Please review the output.", "x".red());
            return Ok(ControlFlow::Break(Outcome::Failed(code)));
        }

        println!("{} clang-tidy found no issues", "✓".green());
        Ok(ControlFlow::Continue(()))
    }

    fn cppcheck(&mut self, caps: &Capabilities, request: &BuildRequest) -> Result<Step> {
        if let ControlFlow::Break(outcome) = self.require(caps, Tool::Cppcheck)? {
            return Ok(ControlFlow::Break(outcome));
        }

        println!("{} Checking code with cppcheck...", "🔍".magenta());
        let code = self.exec(&checker::cppcheck_invocation(analysis_path(request)?))?;
        if code != 0 {
            eprintln!("{} Cppcheck found errors. Please review the output.", "x".red());
            return Ok(ControlFlow::Break(Outcome::Failed(code)));
        }

        println!("{} cppcheck found no issues", "✓".green());
        Ok(ControlFlow::Continue(()))
    }

    /// Path to `tool`, offering to install it when the probe did not find it.
    fn require(
        &mut self,
        caps: &Capabilities,
        tool: Tool,
    ) -> Result<ControlFlow<Outcome, PathBuf>> {
        if let Some(path) = caps.get(tool) {
            return Ok(ControlFlow::Continue(path.to_path_buf()));
        }

        println!("{} {} is not installed.", "!".yellow(), tool);
        if !self.host.confirm("Install it?") {
            println!("{} {} is required; stopping.", "→".dimmed(), tool);
            return Ok(stop(StopReason::InstallDeclined(tool)));
        }

        install::ensure_installed(&mut *self.host, self.profile.os_kind, tool.package());
        tool.locate(&mut *self.host)
            .map(ControlFlow::Continue)
            .with_context(|| {
                format!(
                    "{tool} is still not available after installing {}",
                    tool.package()
                )
            })
    }

    fn lacks_privilege(&self) -> bool {
        self.profile.privilege_required && !self.host.is_privileged_user()
    }

    fn executable(&self, dir: &BuildDirectory) -> PathBuf {
        dir.executable(&self.config.project.executable, &self.profile.executable_suffix)
    }

    fn exec(&mut self, invocation: &Invocation) -> Result<i32> {
        if self.verbose {
            println!("{} Running: {}", "→".dimmed(), invocation);
        }
        self.host.run(invocation)
    }

    fn report(&self, what: &str, code: i32) {
        if code != 0 {
            println!("{} {} exited with code {}", "!".yellow(), what, code);
        }
    }
}

fn stop<T>(reason: StopReason) -> ControlFlow<Outcome, T> {
    ControlFlow::Break(Outcome::Stopped(reason))
}

fn analysis_path(request: &BuildRequest) -> Result<&Path> {
    request
        .analyze_path
        .as_deref()
        .context("--path-to-analyze is required for static analysis")
}
