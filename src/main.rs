//! # buildscript CLI Entry Point
//!
//! Parses the command set and flags with clap, resolves the host profile and
//! hands everything to the dispatcher. The process exit code is the failing
//! quality gate's code, or 0.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use buildscript::config;
use buildscript::dispatch::Dispatcher;
use buildscript::host::SystemHost;
use buildscript::request::{
    BuildRequest, BuildType, CommandKind, DEFAULT_CLANG_TIDY_CHECKS, ValgrindTool,
};
use buildscript::toolchain::{self, OsKind};

#[derive(Parser)]
#[command(name = "bs")]
#[command(about = "Run CMake projects and C/C++ quality tools for various platforms", version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Run CMake projects and C/C++ quality tools for various platforms.\n\n\
    Commands always execute in this order, whatever order they are given in:\n\
    clean, build, run, doxygen, valgrind, clang-tidy, cppcheck."
)]
struct Cli {
    /// Commands to execute
    #[arg(value_enum, num_args = 1.., required_unless_present = "completions")]
    commands: Vec<CommandKind>,

    /// Directory containing the top-level CMakeLists.txt
    #[arg(short = 'd', long, default_value = ".")]
    project_dir: PathBuf,

    /// Build version to build
    #[arg(short = 'b', long, value_enum, ignore_case = true, default_value = "Debug")]
    build_type: BuildType,

    /// Use the specified CMake toolchain file instead of the system compilers
    #[arg(short = 'x', long)]
    toolchain: Option<PathBuf>,

    /// Compile for the given target (also names the build directory)
    #[arg(short = 't', long)]
    target: Option<String>,

    /// Valgrind tool to run
    #[arg(short = 'v', long, value_enum, default_value = "memcheck")]
    valgrind_check: ValgrindTool,

    /// Checks passed to clang-tidy
    #[arg(short = 'c', long, default_value = DEFAULT_CLANG_TIDY_CHECKS)]
    clang_tidy_check: String,

    /// File or directory analyzed by clang-tidy and cppcheck
    #[arg(short = 'f', long)]
    path_to_analyze: Option<PathBuf>,

    /// Print each external command before running it
    #[arg(long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn request(&self) -> BuildRequest {
        let mut request = BuildRequest::new(self.commands.iter().copied());
        request.project_dir = self.project_dir.clone();
        request.build_type = self.build_type;
        request.toolchain_file = self.toolchain.clone();
        request.target = self.target.clone();
        request.valgrind_tool = self.valgrind_check;
        request.lint_checks = self.clang_tidy_check.clone();
        request.analyze_path = self.path_to_analyze.clone();
        request
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let request = cli.request();
    request.validate()?;
    let config = config::load_config(&request.project_dir)?;

    let mut host = SystemHost;
    let profile = toolchain::resolve_profile(&mut host, OsKind::current());
    let outcome = Dispatcher::new(&mut host, &profile, &config)
        .verbose(cli.verbose)
        .run(&request)?;

    match outcome.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
