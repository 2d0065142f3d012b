use crate::error::Result;
use crate::skills::Skill;
use crate::traits::{ToolProvider, ToolType};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which skills directories an install or removal targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local(PathBuf),
    Both(PathBuf),
}

impl Scope {
    /// Build a scope from the two switches, `None` when neither applies.
    pub fn from_parts(global: bool, project_root: Option<PathBuf>) -> Option<Self> {
        match (global, project_root) {
            (true, Some(root)) => Some(Self::Both(root)),
            (true, None) => Some(Self::Global),
            (false, Some(root)) => Some(Self::Local(root)),
            (false, None) => None,
        }
    }

    pub fn locations(&self) -> Vec<Location> {
        match self {
            Self::Global => vec![Location::Global],
            Self::Local(root) => vec![Location::Project(root.clone())],
            Self::Both(root) => vec![Location::Global, Location::Project(root.clone())],
        }
    }

    pub fn project_root(&self) -> Option<&Path> {
        match self {
            Self::Global => None,
            Self::Local(root) | Self::Both(root) => Some(root),
        }
    }
}

/// One concrete skills directory of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Global,
    Project(PathBuf),
}

impl Location {
    /// The directory skills are installed to and removed from. No I/O.
    pub fn skills_dir(&self, provider: &dyn ToolProvider) -> Result<PathBuf> {
        match self {
            Self::Global => provider.global_install_dir(),
            Self::Project(root) => Ok(provider.local_skills_dir(root)),
        }
    }

    /// Same directory as [`skills_dir`](Self::skills_dir), created if absent.
    pub fn ensure_skills_dir(&self, provider: &dyn ToolProvider) -> Result<PathBuf> {
        match self {
            Self::Global => provider.ensure_install_dir(),
            Self::Project(root) => provider.ensure_local_install_dir(root),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project(_) => write!(f, "project"),
        }
    }
}

/// A destination an operation would touch.
#[derive(Debug)]
pub struct PlannedTarget {
    pub skill: String,
    pub provider: ToolType,
    pub display_name: String,
    pub location: Location,
    pub path: Result<PathBuf>,
}

/// Every destination for `skill_names` across `providers` and `scope`, without touching disk.
pub fn plan<S: AsRef<str>>(
    skill_names: &[S],
    providers: &[Arc<dyn ToolProvider>],
    scope: &Scope,
) -> Vec<PlannedTarget> {
    let locations = scope.locations();
    let mut planned = Vec::new();

    for skill in skill_names.iter().map(AsRef::as_ref) {
        for location in &locations {
            for provider in providers {
                planned.push(PlannedTarget {
                    skill: skill.to_string(),
                    provider: provider.tool_type(),
                    display_name: provider.display_name().to_string(),
                    location: location.clone(),
                    path: location
                        .skills_dir(provider.as_ref())
                        .map(|dir| dir.join(skill)),
                });
            }
        }
    }
    planned
}

/// Destinations [`install`](super::install) would write for `skills`.
pub fn install_preview(
    skills: &[Skill],
    providers: &[Arc<dyn ToolProvider>],
    scope: &Scope,
) -> Vec<PlannedTarget> {
    let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
    plan(&names, providers, scope)
}

/// Destinations [`remove`](super::remove) would delete for `skill_name`.
pub fn removal_preview(
    skill_name: &str,
    providers: &[Arc<dyn ToolProvider>],
    scope: &Scope,
) -> Vec<PlannedTarget> {
    plan(&[skill_name], providers, scope)
}
