use crate::error::{HarnessError, HarnessResult};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Locates `program` without running it.
///
/// Programs given with a directory component are checked as-is; bare names are looked up in
/// `PATH`, the same way the child process would be started.
///
/// # Errors
///
/// [`HarnessError::ToolNotFound`] if no executable file can be found.
pub fn check_tool_available(tool: &str, program: &Path) -> HarnessResult<PathBuf> {
    let not_found = |reason: &str| HarnessError::ToolNotFound {
        tool: tool.to_string(),
        source: io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} {reason}", program.display()),
        ),
    };

    if program.components().count() > 1 {
        return if is_executable(program) {
            Ok(program.to_path_buf())
        } else {
            Err(not_found("is not an executable file"))
        };
    }

    let search_path = env::var_os("PATH").unwrap_or_default();
    env::split_paths(&search_path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| not_found("was not found in PATH"))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn finds_program_in_path() {
        let found = check_tool_available("shell", Path::new("sh")).unwrap();
        assert!(found.ends_with("sh"));
    }

    #[test]
    fn missing_program_is_reported() {
        assert!(matches!(
            check_tool_available("emporda", Path::new("ccsds123-difftest-no-such-tool")),
            Err(HarnessError::ToolNotFound { tool, .. }) if tool == "emporda"
        ));
    }

    #[test]
    fn checks_explicit_paths() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("simulate.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        assert!(check_tool_available("simulation", &script).is_err());

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(check_tool_available("simulation", &script).unwrap(), script);
    }
}
