use crate::error::{Result, SkillSyncError};
use std::path::{Path, PathBuf};

/// Nearest ancestor of `start` (inclusive) that holds a `.git` directory.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let start = std::path::absolute(start).map_err(|e| SkillSyncError::io("resolve", start, e))?;

    start
        .ancestors()
        .find(|dir| dir.join(".git").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| SkillSyncError::not_found("git repository", &start))
}

/// Project root for the current working directory, if inside a git repository.
pub fn current_project_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    match find_project_root(&cwd) {
        Ok(root) => Some(root),
        Err(e) => {
            tracing::debug!(error = %e, "Not inside a project");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_root_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), tmp.path());
        assert_eq!(find_project_root(tmp.path()).unwrap(), tmp.path());
    }

    #[test]
    fn git_file_does_not_count() {
        let tmp = TempDir::new().unwrap();
        let inner = tmp.path().join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join(".git"), "gitdir: elsewhere").unwrap();

        match find_project_root(&inner) {
            Ok(root) => assert!(!root.starts_with(&inner)),
            Err(e) => assert!(e.is_not_found()),
        }
    }
}
