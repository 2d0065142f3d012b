//! Repository scan: find every skill below a fetched source tree.
//!
//! Hidden directories are pruned without being read, and a manifest at the
//! scan root itself is treated as a template rather than a skill.

use super::manifest::{self, MANIFEST_FILE, Skill};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Scans one root. Every call to [`RepositoryScanner::manifests`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct RepositoryScanner {
    root: PathBuf,
}

impl RepositoryScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields the path of every manifest strictly below the root.
    pub fn manifests(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                let keep = entry.depth() == 0 || !is_hidden_dir(entry);
                if !keep {
                    tracing::debug!(path = %entry.path().display(), "Pruning hidden directory");
                }
                keep
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(error = %err, "Skipping inaccessible entry during skill scan");
                    None
                }
            })
            .filter(|entry| {
                entry.depth() > 1 && !entry.file_type().is_dir() && entry.file_name() == MANIFEST_FILE
            })
            .map(DirEntry::into_path)
    }

    pub fn skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.manifests().filter_map(|manifest_path| {
            let skill_dir = manifest_path.parent()?.to_path_buf();
            let name = skill_dir.file_name()?.to_string_lossy().into_owned();
            Some(Skill {
                name,
                description: manifest::read_description(&manifest_path),
                source_path: skill_dir,
            })
        })
    }

    pub fn scan(&self) -> Vec<Skill> {
        let skills: Vec<Skill> = self.skills().collect();
        tracing::debug!(root = %self.root.display(), count = skills.len(), "Scanned repository for skills");
        skills
    }

    /// Like [`scan`](Self::scan), but when nothing nested is found and the root
    /// itself is a valid skill, the whole tree becomes one skill named `fallback_name`.
    pub fn discover(&self, fallback_name: &str) -> Vec<Skill> {
        let skills = self.scan();
        if !skills.is_empty() {
            return skills;
        }

        match manifest::load_skill_named(&self.root, fallback_name) {
            Ok(skill) => {
                tracing::info!(name = fallback_name, "Treating repository root as a single skill");
                vec![skill]
            }
            Err(_) => Vec::new(),
        }
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

pub fn scan_repository(root: &Path) -> Vec<Skill> {
    RepositoryScanner::new(root).scan()
}
