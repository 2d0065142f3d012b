use super::scope::{Location, Scope};
use crate::error::{Result, SkillSyncError};
use crate::skills::copier::{self, CopyOptions};
use crate::skills::{Skill, validate_skill_name};
use crate::traits::{ToolProvider, ToolType};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of installing one skill into one provider directory.
#[derive(Debug)]
pub struct InstallOutcome {
    pub provider: ToolType,
    pub display_name: String,
    pub location: Location,
    /// Destination directory on success.
    pub result: Result<PathBuf>,
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct SkillInstallReport {
    pub skill: String,
    pub outcomes: Vec<InstallOutcome>,
}

impl SkillInstallReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

#[derive(Debug, Default)]
pub struct InstallReport {
    pub skills: Vec<SkillInstallReport>,
}

impl InstallReport {
    /// Skills that landed in at least one target.
    pub fn installed_skills(&self) -> usize {
        self.skills.iter().filter(|s| s.succeeded() > 0).count()
    }

    /// A batch succeeds when anything at all was installed.
    pub fn is_success(&self) -> bool {
        self.installed_skills() > 0
    }
}

/// Copies skills into provider directories with replace semantics.
#[derive(Debug, Clone, Default)]
pub struct Installer {
    copy: CopyOptions,
}

impl Installer {
    pub fn new(copy: CopyOptions) -> Self {
        Self { copy }
    }

    /// Install every skill for every provider and location of `scope`.
    ///
    /// Failures are recorded per target and never stop the batch.
    pub fn install(
        &self,
        skills: &[Skill],
        providers: &[Arc<dyn ToolProvider>],
        scope: &Scope,
    ) -> InstallReport {
        let locations = scope.locations();
        let mut report = InstallReport::default();

        for skill in skills {
            let mut outcomes = Vec::with_capacity(providers.len() * locations.len());

            for location in &locations {
                for provider in providers {
                    let result = self.install_one(skill, provider.as_ref(), location);
                    match &result {
                        Ok(dest) => tracing::info!(
                            skill = %skill.name,
                            provider = %provider.tool_type(),
                            dest = %dest.display(),
                            "Skill installed"
                        ),
                        Err(e) => tracing::warn!(
                            skill = %skill.name,
                            provider = %provider.tool_type(),
                            %location,
                            error = %e,
                            "Skill install failed"
                        ),
                    }
                    outcomes.push(InstallOutcome {
                        provider: provider.tool_type(),
                        display_name: provider.display_name().to_string(),
                        location: location.clone(),
                        result,
                    });
                }
            }

            report.skills.push(SkillInstallReport {
                skill: skill.name.clone(),
                outcomes,
            });
        }

        report
    }

    fn install_one(
        &self,
        skill: &Skill,
        provider: &dyn ToolProvider,
        location: &Location,
    ) -> Result<PathBuf> {
        validate_skill_name(&skill.name)?;
        let dir = location.ensure_skills_dir(provider)?;
        let dest = dir.join(&skill.name);

        if same_dir(&skill.source_path, &dest) {
            tracing::debug!(dest = %dest.display(), "Skill already in place");
            return Ok(dest);
        }
        if is_nested(&skill.source_path, &dest) {
            return Err(SkillSyncError::NestedDestination {
                from: skill.source_path.clone(),
                to: dest,
            });
        }

        match copier::remove_entry(&dest) {
            Ok(()) => tracing::debug!(dest = %dest.display(), "Replaced existing skill"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(SkillSyncError::io("remove existing", &dest, e)),
        }

        copier::copy_dir(&skill.source_path, &dest, &self.copy)?;
        Ok(dest)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn is_nested(source: &Path, dest: &Path) -> bool {
    let Ok(source) = source.canonicalize() else {
        return false;
    };
    // dest itself may not exist yet; its parent does.
    dest.parent()
        .and_then(|p| p.canonicalize().ok())
        .is_some_and(|parent| parent.starts_with(&source))
}

/// [`Installer::install`] with the default copy denylist.
pub fn install(
    skills: &[Skill],
    providers: &[Arc<dyn ToolProvider>],
    scope: &Scope,
) -> InstallReport {
    Installer::default().install(skills, providers, scope)
}
