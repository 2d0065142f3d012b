use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A materialized source tree. Remote clones are deleted on drop.
pub struct Checkout {
    path: PathBuf,
    _temp: Option<TempDir>,
}

impl Checkout {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Use `source` in place when it is a local directory, otherwise clone it.
pub fn fetch(source: &str) -> Result<Checkout> {
    let local = Path::new(source);
    if local.is_dir() {
        let path = local
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", local.display()))?;
        return Ok(Checkout { path, _temp: None });
    }

    let url = normalize_url(source);
    let temp = tempfile::Builder::new()
        .prefix("skillsync-")
        .tempdir()
        .context("Failed to create temporary directory")?;
    let dest = temp.path().join("repo");

    tracing::debug!(%url, dest = %dest.display(), "Cloning repository");
    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet"])
        .arg(&url)
        .arg(&dest)
        .output()
        .context("Failed to run git; is it installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Git clone of {} failed: {}", url, stderr.trim());
    }

    Ok(Checkout {
        path: dest,
        _temp: Some(temp),
    })
}

/// Expand `owner/repo` shorthand to a GitHub URL; full URLs pass through.
pub fn normalize_url(source: &str) -> String {
    let source = source.trim();
    let is_url = ["http://", "https://", "ssh://", "git://", "file://", "git@"]
        .iter()
        .any(|prefix| source.starts_with(prefix));
    if is_url {
        return source.to_string();
    }

    let repo = source.trim_matches('/');
    let repo = repo.strip_prefix("github.com/").unwrap_or(repo);
    if repo.ends_with(".git") {
        format!("https://github.com/{repo}")
    } else {
        format!("https://github.com/{repo}.git")
    }
}
