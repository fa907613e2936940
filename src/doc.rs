use std::path::Path;

use crate::host::Invocation;

/// Doxygen run from the project directory against its Doxyfile.
///
/// Set `WARN_AS_ERROR = FAIL_ON_WARNINGS` in the Doxyfile to make warnings fail the run.
pub fn doxygen_invocation(project_dir: &Path, doxyfile: &str) -> Invocation {
    Invocation::new("doxygen")
        .arg(doxyfile)
        .current_dir(project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doxygen_uses_configured_file() {
        let inv = doxygen_invocation(Path::new("proj"), "Doxygen/Doxyfile");
        assert_eq!(inv.args, vec!["Doxygen/Doxyfile"]);
        assert_eq!(inv.cwd.as_deref(), Some(Path::new("proj")));
    }
}
