//! Build directory naming and lifecycle.
//!
//! One directory per target (or per host platform when no target is given):
//! `<target>_build` or `<platform>_build`, directly under the project directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::toolchain::OsKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirectory {
    name: String,
    path: PathBuf,
}

impl BuildDirectory {
    /// Directory name for a target, falling back to the host platform.
    pub fn directory_name(target: Option<&str>, os: OsKind) -> String {
        format!("{}_build", target.unwrap_or(os.name()))
    }

    pub fn resolve(project_dir: &Path, target: Option<&str>, os: OsKind) -> Self {
        let name = Self::directory_name(target, os);
        let path = project_dir.join(&name);
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Remove the whole directory. Returns whether anything was removed.
    pub fn clean(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }

    /// Create the directory and any missing parents.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))
    }

    /// Path of the built executable inside this directory.
    pub fn executable(&self, name: &str, suffix: &str) -> PathBuf {
        self.path.join(format!("{name}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefers_target() {
        assert_eq!(
            BuildDirectory::directory_name(Some("Tm4c123"), OsKind::Linux),
            "Tm4c123_build"
        );
        assert_eq!(
            BuildDirectory::directory_name(None, OsKind::Darwin),
            "Darwin_build"
        );
        assert_eq!(
            BuildDirectory::directory_name(None, OsKind::Linux),
            "Linux_build"
        );
    }

    #[test]
    fn test_resolve_is_stable() {
        let a = BuildDirectory::resolve(Path::new("proj"), Some("Esp32"), OsKind::Darwin);
        let b = BuildDirectory::resolve(Path::new("proj"), Some("Esp32"), OsKind::Darwin);
        assert_eq!(a, b);
        assert_eq!(a.path(), Path::new("proj").join("Esp32_build"));
    }

    #[test]
    fn test_clean_missing_directory_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = BuildDirectory::resolve(tmp.path(), None, OsKind::Linux);
        assert!(!dir.clean().unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_clean_then_ensure_recreates() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = BuildDirectory::resolve(tmp.path(), None, OsKind::Linux);
        dir.ensure().unwrap();
        fs::write(dir.path().join("build.ninja"), "").unwrap();

        assert!(dir.clean().unwrap());
        assert!(!tmp.path().join("Linux_build").exists());

        dir.ensure().unwrap();
        dir.ensure().unwrap();
        assert!(dir.exists());
        assert!(!dir.path().join("build.ninja").exists());
    }

    #[test]
    fn test_executable_path() {
        let dir = BuildDirectory::resolve(Path::new("."), None, OsKind::Linux);
        assert_eq!(
            dir.executable("appName", ".elf"),
            Path::new(".").join("Linux_build").join("appName.elf")
        );
    }
}
