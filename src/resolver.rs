//! Executable lookup on the search path

use std::path::{Path, PathBuf};

/// Resolves command names to executable files
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    /// Parsed PATH directories
    path_dirs: Vec<PathBuf>,
}

impl ExecutableResolver {
    /// Create a resolver from a `PATH`-style string
    pub fn new(path_var: &str) -> Self {
        ExecutableResolver {
            path_dirs: std::env::split_paths(path_var).collect(),
        }
    }

    /// Create a resolver with explicit directories (for testing)
    #[cfg(test)]
    pub fn with_path(path_dirs: Vec<PathBuf>) -> Self {
        ExecutableResolver { path_dirs }
    }

    /// Find `name` on the search path
    ///
    /// Names containing `/` are checked directly instead of searched for.
    pub fn which(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if name.contains('/') {
            let path = Path::new(name);
            return is_executable_file(path).then(|| path.to_path_buf());
        }

        self.path_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| is_executable_file(path))
    }
}

/// Check if a path is an executable regular file
fn is_executable_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn finds_executable_in_path_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_executable(&first.path().join("tool"));
        make_executable(&second.path().join("tool"));

        let resolver = ExecutableResolver::with_path(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(resolver.which("tool"), Some(first.path().join("tool")));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes"), "text").unwrap();

        let resolver = ExecutableResolver::with_path(vec![dir.path().to_path_buf()]);
        assert_eq!(resolver.which("notes"), None);
    }

    #[cfg(unix)]
    #[test]
    fn explicit_paths_checked_directly() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.sh");
        make_executable(&script);

        let resolver = ExecutableResolver::with_path(vec![]);
        assert_eq!(resolver.which(script.to_str().unwrap()), Some(script.clone()));
        assert_eq!(resolver.which("/nonexistent/path"), None);
    }

    #[test]
    fn missing_command_not_found() {
        let resolver = ExecutableResolver::with_path(vec![]);
        assert_eq!(resolver.which("nonexistent_cmd_xyz"), None);
        assert_eq!(resolver.which(""), None);
    }

    #[cfg(unix)]
    #[test]
    fn parses_path_variable() {
        let resolver = ExecutableResolver::new("/bin:/usr/bin");
        assert!(resolver.which("sh").is_some());
    }
}
