//! Optional per-project settings (`buildscript.toml`).
//!
//! ```toml
//! [project]
//! executable = "appName"
//!
//! [doxygen]
//! config = "Doxygen/Doxyfile"
//!
//! [boards]
//! Tm4c123 = "lm4flash"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "buildscript.toml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub doxygen: DoxygenSection,
    /// Target literal -> flashing tool installed when building for it
    #[serde(default = "default_boards")]
    pub boards: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectSection {
    /// Executable base name; the platform suffix is appended
    #[serde(default = "default_executable")]
    pub executable: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DoxygenSection {
    /// Doxyfile path, relative to the project directory
    #[serde(default = "default_doxyfile")]
    pub config: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: ProjectSection::default(),
            doxygen: DoxygenSection::default(),
            boards: default_boards(),
        }
    }
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

impl Default for DoxygenSection {
    fn default() -> Self {
        Self {
            config: default_doxyfile(),
        }
    }
}

impl ProjectConfig {
    /// Flashing tool for an embedded board target, if it has one.
    pub fn board_tool(&self, target: &str) -> Option<&str> {
        self.boards.get(target).map(String::as_str)
    }
}

fn default_executable() -> String {
    "appName".to_string()
}

fn default_doxyfile() -> String {
    "Doxygen/Doxyfile".to_string()
}

fn default_boards() -> BTreeMap<String, String> {
    BTreeMap::from([("Tm4c123".to_string(), "lm4flash".to_string())])
}

/// Load `buildscript.toml` from `project_dir`, or defaults when there is none.
///
/// Boards listed in the file are merged over the built-in ones.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_config(content: &str) -> Result<ProjectConfig> {
    let mut config: ProjectConfig = toml::from_str(content)?;
    let mut boards = default_boards();
    boards.append(&mut config.boards);
    config.boards = boards;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.project.executable, "appName");
        assert_eq!(config.doxygen.config, "Doxygen/Doxyfile");
        assert_eq!(config.board_tool("Tm4c123"), Some("lm4flash"));
    }

    #[test]
    fn test_boards_extend_defaults() {
        let config = parse_config(
            r#"
[project]
executable = "rtos"

[boards]
Stm32f4 = "stlink"
"#,
        )
        .unwrap();
        assert_eq!(config.project.executable, "rtos");
        assert_eq!(config.board_tool("Stm32f4"), Some("stlink"));
        assert_eq!(config.board_tool("Tm4c123"), Some("lm4flash"));
        assert_eq!(config.board_tool("Linux"), None);
    }

    #[test]
    fn test_board_override() {
        let config = parse_config("[boards]\nTm4c123 = \"openocd\"\n").unwrap();
        assert_eq!(config.board_tool("Tm4c123"), Some("openocd"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[project\nexecutable = 1").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }
}
