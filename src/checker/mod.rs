//! Code quality tools (clang-tidy, cppcheck, Valgrind).
//!
//! Each tool is located up front and invoked as an opaque process; only its
//! exit code matters to the caller.

pub mod valgrind;

use std::path::{Path, PathBuf};

use crate::build::BuildDirectory;
use crate::build::cmake::compile_database;
use crate::host::{Host, Invocation};

/// Locate clang-tidy.
///
/// Homebrew keeps LLVM keg-only, so the package-manager prefix is asked first;
/// a plain search-path lookup is the fallback.
pub fn locate_clang_tidy(host: &mut dyn Host) -> Option<PathBuf> {
    let query = Invocation::new("brew").args(["--prefix", "llvm"]);
    if let Ok(out) = host.capture(&query)
        && out.success()
        && !out.stdout.is_empty()
    {
        return Some(Path::new(&out.stdout).join("bin").join("clang-tidy"));
    }

    host.locate("clang-tidy")
}

pub fn clang_tidy_invocation(
    clang_tidy: &Path,
    dir: &BuildDirectory,
    checks: &str,
    target: &Path,
) -> Invocation {
    Invocation::new(clang_tidy)
        .arg("-p")
        .arg(compile_database(dir).display().to_string())
        .arg(format!("-checks={checks}"))
        .arg("-header-filter=.*")
        .arg("--warnings-as-errors=*")
        .arg(target.display().to_string())
}

pub fn cppcheck_invocation(target: &Path) -> Invocation {
    Invocation::new("cppcheck")
        .args([
            "--check-level=exhaustive",
            "--enable=all",
            "--disable=missingInclude",
            "--inconclusive",
            "--error-exitcode=1",
        ])
        .arg(target.display().to_string())
}
