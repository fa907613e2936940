use std::path::Path;

use crate::host::Invocation;
use crate::request::ValgrindTool;

pub fn valgrind_invocation(tool: ValgrindTool, executable: &Path) -> Invocation {
    Invocation::new("valgrind")
        .arg(format!("--tool={}", tool.as_str()))
        .args([
            "--track-origins=yes",
            "--leak-check=full",
            "--read-inline-info=yes",
            "-s",
        ])
        .arg(executable.display().to_string())
}
