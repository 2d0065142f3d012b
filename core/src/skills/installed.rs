use super::manifest::is_valid_skill;
use crate::error::{Result, SkillSyncError};
use crate::traits::{ToolProvider, ToolType};
use serde::{Serialize, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which part of a tool's skills tree a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    /// Directly under the scan root.
    Root,
    /// Inside one of the provider's known category subdirectories.
    Named(String),
    /// Inside a project-scoped skills directory; holds the project's base name.
    Project(String),
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => Ok(()),
            Self::Named(name) => write!(f, "{name}"),
            Self::Project(root) => write!(f, "project:{root}"),
        }
    }
}

impl Serialize for SkillCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Snapshot of one skill directory found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledSkill {
    pub name: String,
    pub path: PathBuf,
    pub provider: ToolType,
    pub is_valid: bool,
    pub category: SkillCategory,
}

/// Subdirectories of `dir`, or `None` when `dir` does not exist.
fn read_subdirs(dir: &Path) -> Result<Option<Vec<(String, PathBuf)>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SkillSyncError::io("read directory", dir, e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SkillSyncError::io("read directory", dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
    }
    Ok(Some(dirs))
}

/// Scan a tool's skills tree.
///
/// Known categories are descended one level; any other subdirectory is a
/// root-level skill candidate, except hidden ones that are not valid skills.
pub fn scan_installed_dir(
    dir: &Path,
    provider: ToolType,
    categories: &[&str],
) -> Result<Vec<InstalledSkill>> {
    let Some(entries) = read_subdirs(dir)? else {
        tracing::debug!(path = %dir.display(), "Skills directory does not exist");
        return Ok(Vec::new());
    };

    let mut skills = Vec::new();
    for (name, path) in entries {
        if categories.contains(&name.as_str()) {
            match scan_flat(&path, provider, SkillCategory::Named(name.clone())) {
                Ok(found) => skills.extend(found),
                Err(e) => tracing::warn!(category = %name, error = %e, "Failed to scan category"),
            }
            continue;
        }

        let is_valid = is_valid_skill(&path);
        if name.starts_with('.') && !is_valid {
            continue;
        }
        skills.push(InstalledSkill {
            name,
            path,
            provider,
            is_valid,
            category: SkillCategory::Root,
        });
    }
    Ok(skills)
}

/// One level of skill directories, hidden entries skipped.
fn scan_flat(dir: &Path, provider: ToolType, category: SkillCategory) -> Result<Vec<InstalledSkill>> {
    let entries = read_subdirs(dir)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter(|(name, _)| !name.starts_with('.'))
        .map(|(name, path)| InstalledSkill {
            is_valid: is_valid_skill(&path),
            name,
            path,
            provider,
            category: category.clone(),
        })
        .collect())
}

pub fn scan_installed(provider: &dyn ToolProvider) -> Result<Vec<InstalledSkill>> {
    let dir = provider.global_skills_dir()?;
    scan_installed_dir(&dir, provider.tool_type(), provider.categories())
}

pub fn scan_project_skills(
    provider: &dyn ToolProvider,
    project_root: &Path,
) -> Result<Vec<InstalledSkill>> {
    let dir = provider.local_skills_dir(project_root);
    let project_name = project_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    scan_flat(&dir, provider.tool_type(), SkillCategory::Project(project_name))
}
