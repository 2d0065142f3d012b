use super::scope::{Location, Scope};
use crate::error::{Result, SkillSyncError};
use crate::skills::copier;
use crate::skills::validate_skill_name;
use crate::traits::{ToolProvider, ToolType};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub enum RemoveStatus {
    Removed,
    NotFound,
    Failed(SkillSyncError),
}

#[derive(Debug)]
pub struct RemoveOutcome {
    pub provider: ToolType,
    pub display_name: String,
    pub location: Location,
    /// `None` when the skills directory itself could not be resolved.
    pub path: Option<PathBuf>,
    pub status: RemoveStatus,
}

#[derive(Debug)]
pub struct RemoveReport {
    pub skill: String,
    pub outcomes: Vec<RemoveOutcome>,
}

impl RemoveReport {
    pub fn removed(&self) -> usize {
        self.count(|s| matches!(s, RemoveStatus::Removed))
    }

    pub fn not_found(&self) -> usize {
        self.count(|s| matches!(s, RemoveStatus::NotFound))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RemoveStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&RemoveStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Delete `skill_name` from every provider directory in `scope`.
///
/// Absent skills are reported as not found, so repeating a removal is harmless.
/// Only an unsafe name fails the call as a whole.
pub fn remove(
    skill_name: &str,
    providers: &[Arc<dyn ToolProvider>],
    scope: &Scope,
) -> Result<RemoveReport> {
    validate_skill_name(skill_name)?;

    let mut outcomes = Vec::new();
    for location in scope.locations() {
        for provider in providers {
            let (path, status) = match location.skills_dir(provider.as_ref()) {
                Ok(dir) => {
                    let path = dir.join(skill_name);
                    let status = remove_path(&path);
                    (Some(path), status)
                }
                Err(e) => (None, RemoveStatus::Failed(e)),
            };

            match &status {
                RemoveStatus::Removed => tracing::info!(
                    skill = skill_name,
                    provider = %provider.tool_type(),
                    %location,
                    "Skill removed"
                ),
                RemoveStatus::NotFound => tracing::debug!(
                    skill = skill_name,
                    provider = %provider.tool_type(),
                    %location,
                    "Skill not installed"
                ),
                RemoveStatus::Failed(e) => tracing::warn!(
                    skill = skill_name,
                    provider = %provider.tool_type(),
                    %location,
                    error = %e,
                    "Skill removal failed"
                ),
            }

            outcomes.push(RemoveOutcome {
                provider: provider.tool_type(),
                display_name: provider.display_name().to_string(),
                location: location.clone(),
                path,
                status,
            });
        }
    }

    Ok(RemoveReport {
        skill: skill_name.to_string(),
        outcomes,
    })
}

fn remove_path(path: &std::path::Path) -> RemoveStatus {
    match copier::remove_entry(path) {
        Ok(()) => RemoveStatus::Removed,
        Err(e) if e.kind() == io::ErrorKind::NotFound => RemoveStatus::NotFound,
        Err(e) => RemoveStatus::Failed(SkillSyncError::io("remove", path, e)),
    }
}
