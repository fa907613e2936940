//! CMake configure and Ninja compile invocations.
//!
//! The configure step always targets the Ninja generator, exports a compile
//! database (clang-tidy reads it) and points back at the project from inside
//! the build directory. Compilers come either from a toolchain file or from
//! the host profile, never both.

use anyhow::{Result, anyhow};
use std::path::Path;

use super::directory::BuildDirectory;
use crate::host::Invocation;
use crate::request::BuildRequest;
use crate::toolchain::PlatformProfile;

/// Arguments for `cmake`, run from inside the build directory.
pub fn configure_args(profile: &PlatformProfile, request: &BuildRequest) -> Result<Vec<String>> {
    let mut args = vec![
        "-G".to_string(),
        "Ninja".to_string(),
        "-DCMAKE_EXPORT_COMPILE_COMMANDS=1".to_string(),
        // The build directory sits directly inside the project.
        "-S..".to_string(),
    ];

    match &request.toolchain_file {
        Some(file) => args.push(format!("-DCMAKE_TOOLCHAIN_FILE={}", file.display())),
        None => {
            let (cc_name, cxx_name) = profile.os_kind.compiler_names();
            let cc = profile.c_compiler.as_deref().ok_or_else(|| missing(cc_name))?;
            let cxx = profile
                .cxx_compiler
                .as_deref()
                .ok_or_else(|| missing(cxx_name))?;
            args.push(format!("-DCMAKE_C_COMPILER={}", cc.display()));
            args.push(format!("-DCMAKE_CXX_COMPILER={}", cxx.display()));
        }
    }

    if let Some(target) = &request.target {
        args.push(format!("-D{target}=1"));
    }

    if let Some(define) = request.build_type.define() {
        args.push(define.to_string());
    }

    Ok(args)
}

fn missing(compiler: &str) -> anyhow::Error {
    anyhow!(
        "No {compiler} found on this host.\n\n\
        💡 Tip: install it, or pass a CMake toolchain file with --toolchain <FILE>."
    )
}

pub fn configure_invocation(dir: &BuildDirectory, args: Vec<String>) -> Invocation {
    Invocation::new("cmake").args(args).current_dir(dir.path())
}

pub fn compile_invocation(dir: &BuildDirectory) -> Invocation {
    Invocation::new("ninja").current_dir(dir.path())
}

/// `true` when `arg` binds a compiler path directly.
pub fn is_compiler_arg(arg: &str) -> bool {
    arg.starts_with("-DCMAKE_C_COMPILER=") || arg.starts_with("-DCMAKE_CXX_COMPILER=")
}

/// `true` when `arg` selects a toolchain file.
pub fn is_toolchain_arg(arg: &str) -> bool {
    arg.starts_with("-DCMAKE_TOOLCHAIN_FILE=")
}

/// Where the compile database lands after a configure.
pub fn compile_database(dir: &BuildDirectory) -> &Path {
    dir.path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{BuildType, CommandKind};
    use crate::toolchain::OsKind;
    use std::path::PathBuf;

    fn linux_profile() -> PlatformProfile {
        PlatformProfile::new(OsKind::Linux).with_compilers(
            Some(PathBuf::from("/usr/bin/gcc")),
            Some(PathBuf::from("/usr/bin/g++")),
        )
    }

    #[test]
    fn test_debug_host_build() {
        let req = BuildRequest::new([CommandKind::Build]);
        let args = configure_args(&linux_profile(), &req).unwrap();
        assert_eq!(
            args,
            vec![
                "-G",
                "Ninja",
                "-DCMAKE_EXPORT_COMPILE_COMMANDS=1",
                "-S..",
                "-DCMAKE_C_COMPILER=/usr/bin/gcc",
                "-DCMAKE_CXX_COMPILER=/usr/bin/g++",
            ]
        );
    }

    #[test]
    fn test_release_define_appears_once() {
        let mut req = BuildRequest::new([CommandKind::Build]);
        req.build_type = BuildType::Release;
        let args = configure_args(&linux_profile(), &req).unwrap();
        assert_eq!(args.iter().filter(|a| *a == "-DRELEASE_BUILD=1").count(), 1);
        assert!(!args.iter().any(|a| a == "-DSANITIZE_BUILD=1"));
    }

    #[test]
    fn test_toolchain_file_and_compilers_are_exclusive() {
        let profiles = [
            linux_profile(),
            PlatformProfile::new(OsKind::Darwin),
            PlatformProfile::new(OsKind::Linux),
        ];
        let toolchains = [None, Some(PathBuf::from("cmake/arm-none-eabi.cmake"))];
        let targets = [None, Some("Tm4c123".to_string())];

        for profile in &profiles {
            for toolchain in &toolchains {
                for target in &targets {
                    let mut req = BuildRequest::new([CommandKind::Build]);
                    req.toolchain_file = toolchain.clone();
                    req.target = target.clone();

                    let Ok(args) = configure_args(profile, &req) else {
                        // Only possible without compilers and without a toolchain file.
                        assert!(toolchain.is_none() && profile.c_compiler.is_none());
                        continue;
                    };
                    let has_toolchain = args.iter().any(|a| is_toolchain_arg(a));
                    let has_compilers = args.iter().any(|a| is_compiler_arg(a));
                    assert_ne!(has_toolchain, has_compilers, "args: {args:?}");
                    assert_eq!(has_toolchain, toolchain.is_some());
                }
            }
        }
    }

    #[test]
    fn test_cross_target_define() {
        let mut req = BuildRequest::new([CommandKind::Build]);
        req.target = Some("Tm4c123".into());
        req.toolchain_file = Some(PathBuf::from("tm4c.cmake"));
        req.build_type = BuildType::Sanitize;
        let args = configure_args(&PlatformProfile::new(OsKind::Linux), &req).unwrap();
        assert_eq!(
            &args[4..],
            &[
                "-DCMAKE_TOOLCHAIN_FILE=tm4c.cmake",
                "-DTm4c123=1",
                "-DSANITIZE_BUILD=1"
            ]
        );
    }

    #[test]
    fn test_missing_compiler_without_toolchain_is_error() {
        let req = BuildRequest::new([CommandKind::Build]);
        let err = configure_args(&PlatformProfile::new(OsKind::Darwin), &req).unwrap_err();
        assert!(err.to_string().contains("clang"));
    }

    #[test]
    fn test_invocations_run_inside_build_directory() {
        let dir = BuildDirectory::resolve(Path::new("proj"), None, OsKind::Linux);
        let configure = configure_invocation(&dir, vec!["-S..".into()]);
        let compile = compile_invocation(&dir);
        assert_eq!(configure.cwd.as_deref(), Some(dir.path()));
        assert_eq!(compile.cwd.as_deref(), Some(dir.path()));
        assert!(compile.args.is_empty());
    }
}
