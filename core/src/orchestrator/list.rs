use crate::error::SkillSyncError;
use crate::skills::{InstalledSkill, scan_installed, scan_project_skills};
use crate::traits::{ToolProvider, ToolType};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
pub struct ScanFailure {
    pub provider: ToolType,
    pub display_name: String,
    pub error: SkillSyncError,
}

/// Everything found on disk for a set of providers.
#[derive(Debug, Default)]
pub struct Inventory {
    pub skills: Vec<InstalledSkill>,
    pub failures: Vec<ScanFailure>,
}

impl Inventory {
    pub fn for_provider(&self, tool: ToolType) -> impl Iterator<Item = &InstalledSkill> {
        self.skills.iter().filter(move |s| s.provider == tool)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Scan each provider's global tree, then its project directory when a project root is given.
pub fn list_installed(
    providers: &[Arc<dyn ToolProvider>],
    project_root: Option<&Path>,
) -> Inventory {
    let mut inventory = Inventory::default();

    for provider in providers {
        match scan_installed(provider.as_ref()) {
            Ok(found) => inventory.skills.extend(found),
            Err(error) => record(&mut inventory, provider.as_ref(), error),
        }
    }

    if let Some(root) = project_root {
        for provider in providers {
            match scan_project_skills(provider.as_ref(), root) {
                Ok(found) => inventory.skills.extend(found),
                Err(error) => record(&mut inventory, provider.as_ref(), error),
            }
        }
    }

    tracing::debug!(
        skills = inventory.skills.len(),
        failures = inventory.failures.len(),
        "Listed installed skills"
    );
    inventory
}

fn record(inventory: &mut Inventory, provider: &dyn ToolProvider, error: SkillSyncError) {
    tracing::warn!(provider = %provider.tool_type(), error = %error, "Failed to scan skills");
    inventory.failures.push(ScanFailure {
        provider: provider.tool_type(),
        display_name: provider.display_name().to_string(),
        error,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderRegistry;
    use crate::skills::SkillCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn merges_global_and_project() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let registry = ProviderRegistry::with_home(home.path());
        let providers = registry.parse(&["claude", "droid"]).unwrap();

        let global = home.path().join(".claude/skills/g");
        fs::create_dir_all(&global).unwrap();
        fs::write(global.join("SKILL.md"), "").unwrap();
        fs::create_dir_all(project.path().join(".factory/skills/p")).unwrap();

        let inventory = list_installed(&providers, Some(project.path()));
        assert!(inventory.failures.is_empty());
        assert_eq!(inventory.skills.len(), 2);

        let claude: Vec<_> = inventory.for_provider(ToolType::Claude).collect();
        assert_eq!(claude[0].name, "g");
        assert!(claude[0].is_valid);
        assert_eq!(claude[0].category, SkillCategory::Root);

        let droid: Vec<_> = inventory.for_provider(ToolType::Droid).collect();
        assert!(!droid[0].is_valid);
        assert!(matches!(droid[0].category, SkillCategory::Project(_)));
    }

    #[test]
    fn unreadable_provider_is_reported_not_fatal() {
        let home = TempDir::new().unwrap();
        let registry = ProviderRegistry::with_home(home.path());
        let providers = registry.parse(&["gemini", "claude"]).unwrap();

        fs::create_dir_all(home.path().join(".gemini")).unwrap();
        fs::write(home.path().join(".gemini/skills"), "file, not dir").unwrap();
        fs::create_dir_all(home.path().join(".claude/skills/ok")).unwrap();

        let inventory = list_installed(&providers, None);
        assert_eq!(inventory.failures.len(), 1);
        assert_eq!(inventory.failures[0].provider, ToolType::Gemini);
        assert_eq!(inventory.skills.len(), 1);
    }

    #[test]
    fn nothing_installed() {
        let home = TempDir::new().unwrap();
        let registry = ProviderRegistry::with_home(home.path());
        let inventory = list_installed(registry.all_providers(), None);
        assert!(inventory.is_empty());
        assert!(inventory.failures.is_empty());
    }
}
