use crate::error::{Result, SkillSyncError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Stable identifier of a supported coding tool.
///
/// Declaration order is the canonical catalog order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ToolType {
    Gemini,
    Claude,
    Codex,
    Antigravity,
    Copilot,
    VsCode,
    Cline,
    RooCode,
    KiloCode,
    Goose,
    Crush,
    Droid,
}

/// Where a tool keeps its skills.
///
/// Every tool stores skills the same way (a directory holding `SKILL.md`);
/// implementations only decide the directory policy.
pub trait ToolProvider: Send + Sync {
    fn tool_type(&self) -> ToolType;

    fn display_name(&self) -> &str;

    /// Directory scanned for already-installed skills.
    fn global_skills_dir(&self) -> Result<PathBuf>;

    /// Directory new skills are written to. Always inside `global_skills_dir`.
    fn global_install_dir(&self) -> Result<PathBuf> {
        self.global_skills_dir()
    }

    fn local_skills_dir(&self, project_root: &Path) -> PathBuf;

    /// Known category subdirectories of `global_skills_dir`, in display order.
    fn categories(&self) -> &[&'static str] {
        &[]
    }

    fn ensure_install_dir(&self) -> Result<PathBuf> {
        let dir = self.global_install_dir()?;
        create_dir(&dir)?;
        Ok(dir)
    }

    fn ensure_local_install_dir(&self, project_root: &Path) -> Result<PathBuf> {
        let dir = self.local_skills_dir(project_root);
        create_dir(&dir)?;
        Ok(dir)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| SkillSyncError::io("create directory", dir, e))
}

impl std::fmt::Debug for dyn ToolProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolProvider")
            .field("type", &self.tool_type())
            .field("display_name", &self.display_name())
            .finish()
    }
}
