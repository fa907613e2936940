//! Platform profile resolution
//!
//! Works out which compilers, debugger and executable suffix apply to the
//! current host, and makes sure the baseline build tools are installed.

pub mod install;
pub mod types;

pub use types::{OsKind, PlatformProfile};

use crate::host::Host;

/// Tools every run needs on the host, installed eagerly on each invocation.
pub const BASELINE_TOOLS: [&str; 5] = ["cmake", "ninja", "git", "openocd", "wget"];

/// Resolve the profile for `os_kind`.
///
/// Missing compilers are left as `None`: a toolchain file can stand in for them.
pub fn resolve_profile(host: &mut dyn Host, os_kind: OsKind) -> PlatformProfile {
    let (cc, cxx) = os_kind.compiler_names();
    let profile =
        PlatformProfile::new(os_kind).with_compilers(host.locate(cc), host.locate(cxx));

    for tool in BASELINE_TOOLS {
        install::ensure_installed(host, os_kind, tool);
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use std::path::PathBuf;

    #[test]
    fn test_privilege_required_only_on_linux() {
        for os in [OsKind::Darwin, OsKind::Linux] {
            let mut host = FakeHost::with_tools(&BASELINE_TOOLS);
            let profile = resolve_profile(&mut host, os);
            assert_eq!(profile.privilege_required, os == OsKind::Linux);
        }
    }

    #[test]
    fn test_darwin_profile() {
        let mut host = FakeHost::with_tools(&["clang", "clang++"]);
        let profile = resolve_profile(&mut host, OsKind::Darwin);
        assert_eq!(profile.debugger, "lldb");
        assert_eq!(profile.executable_suffix, ".Mach-O");
        assert_eq!(profile.c_compiler, Some(PathBuf::from("/usr/bin/clang")));
        assert_eq!(profile.cxx_compiler, Some(PathBuf::from("/usr/bin/clang++")));
    }

    #[test]
    fn test_linux_profile_without_compilers() {
        let mut host = FakeHost::with_tools(&BASELINE_TOOLS);
        let profile = resolve_profile(&mut host, OsKind::Linux);
        assert_eq!(profile.debugger, "gdb");
        assert_eq!(profile.executable_suffix, ".elf");
        assert!(profile.c_compiler.is_none());
        assert!(profile.cxx_compiler.is_none());
    }

    #[test]
    fn test_unknown_os_falls_back_to_linux() {
        assert_eq!(OsKind::from_os_name("freebsd"), OsKind::Linux);
        assert_eq!(OsKind::from_os_name("macos"), OsKind::Darwin);
    }

    #[test]
    fn test_baseline_pass_installs_every_missing_tool() {
        let mut host = FakeHost::with_tools(&["cmake", "git"]);
        resolve_profile(&mut host, OsKind::Linux);
        let installed: Vec<String> = host
            .calls_to("sudo")
            .iter()
            .filter_map(|c| c.args.last().cloned())
            .collect();
        assert_eq!(installed, vec!["ninja-build", "openocd", "wget"]);
    }
}
