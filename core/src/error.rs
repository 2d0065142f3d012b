use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SkillSyncError {
    #[error("unknown provider: {name}, valid providers are: {valid}")]
    UnknownProvider { name: String, valid: String },
    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },
    #[error("could not resolve the home directory")]
    HomeDirUnavailable,
    #[error("invalid skill name: {0:?}")]
    InvalidSkillName(String),
    #[error("failed to {context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot install {} into itself at {}", .from.display(), .to.display())]
    NestedDestination { from: PathBuf, to: PathBuf },
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl SkillSyncError {
    #[must_use]
    pub fn io(context: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn not_found(what: &'static str, path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            what,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Expected absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_counts_as_absence() {
        let err = SkillSyncError::io(
            "read directory",
            "/nowhere",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn unknown_provider_lists_valid_names() {
        let err = SkillSyncError::UnknownProvider {
            name: "bogus".into(),
            valid: "gemini, claude".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "unknown provider: bogus, valid providers are: gemini, claude"
        );
    }
}
