//! Host tool installation.
//!
//! Checks whether a tool is on the search path and, if it is not, asks the
//! platform package manager for it (`brew install` on macOS, `sudo apt install`
//! on Linux). Install failures are reported but never raised: whether a run can
//! go on without the tool is the caller's decision.

use colored::*;

use super::types::OsKind;
use crate::host::{Host, Invocation};

/// Convert the name a tool is searched by into the name it is installed as.
pub fn installation_name(program: &str) -> &str {
    match program {
        "ninja" => "ninja-build",
        other => other,
    }
}

/// Package-manager invocation that installs `program` on `os`.
pub fn install_command(os: OsKind, program: &str) -> Invocation {
    let package = installation_name(program);
    match os {
        OsKind::Darwin => Invocation::new("brew").args(["install", package]),
        OsKind::Linux => Invocation::new("sudo").args(["apt", "install", package]),
    }
}

/// Install `program` unless it is already present.
///
/// Returns whether the tool could be located afterwards.
pub fn ensure_installed(host: &mut dyn Host, os: OsKind, program: &str) -> bool {
    if host.locate(program).is_some() {
        return true;
    }

    println!("{} Installing: {}", "→".dimmed(), program.cyan());
    match host.run(&install_command(os, program)) {
        Ok(0) => {}
        Ok(code) => println!(
            "{} Installing {} exited with code {}",
            "!".yellow(),
            program,
            code
        ),
        Err(e) => println!("{} Could not install {}: {}", "!".yellow(), program, e),
    }

    host.locate(program).is_some()
}
