use crate::error::{Result, SkillSyncError};
use crate::traits::{ToolProvider, ToolType};
use std::path::{Path, PathBuf};

/// Declarative directory policy for one tool.
#[derive(Debug, Clone, Copy)]
pub struct PathLayout {
    pub tool: ToolType,
    pub display_name: &'static str,
    /// Scan root, relative to the home directory.
    pub global: &'static [&'static str],
    /// Subdirectory of the scan root that installs go to, if not the root itself.
    pub install_subdir: Option<&'static str>,
    /// Skills directory, relative to a project root.
    pub local: &'static [&'static str],
    pub categories: &'static [&'static str],
}

pub static GEMINI: PathLayout = PathLayout {
    tool: ToolType::Gemini,
    display_name: "Gemini CLI",
    global: &[".gemini", "skills"],
    install_subdir: None,
    local: &[".gemini", "skills"],
    categories: &[],
};

pub static CLAUDE: PathLayout = PathLayout {
    tool: ToolType::Claude,
    display_name: "Claude Code",
    global: &[".claude", "skills"],
    install_subdir: None,
    local: &[".claude", "skills"],
    categories: &[],
};

// User skills go to public/, bundled ones live in .system/.
pub static CODEX: PathLayout = PathLayout {
    tool: ToolType::Codex,
    display_name: "Codex CLI",
    global: &[".codex", "skills"],
    install_subdir: Some("public"),
    local: &[".codex", "skills"],
    categories: &["public", ".system"],
};

pub static ANTIGRAVITY: PathLayout = PathLayout {
    tool: ToolType::Antigravity,
    display_name: "Antigravity IDE",
    global: &[".gemini", "antigravity", "skills"],
    install_subdir: None,
    local: &[".agent", "skills"],
    categories: &[],
};

pub static COPILOT: PathLayout = PathLayout {
    tool: ToolType::Copilot,
    display_name: "GitHub Copilot",
    global: &[".copilot", "skills"],
    install_subdir: None,
    local: &[".github", "skills"],
    categories: &[],
};

pub static CLINE: PathLayout = PathLayout {
    tool: ToolType::Cline,
    display_name: "Cline IDE",
    global: &[".cline", "skills"],
    install_subdir: None,
    local: &[".cline", "skills"],
    categories: &[],
};

pub static ROO_CODE: PathLayout = PathLayout {
    tool: ToolType::RooCode,
    display_name: "Roo Code",
    global: &[".roo", "skills"],
    install_subdir: None,
    local: &[".roo", "skills"],
    categories: &[],
};

pub static KILO_CODE: PathLayout = PathLayout {
    tool: ToolType::KiloCode,
    display_name: "Kilo Code",
    global: &[".kilocode", "skills"],
    install_subdir: None,
    local: &[".kilocode", "skills"],
    categories: &[],
};

pub static GOOSE: PathLayout = PathLayout {
    tool: ToolType::Goose,
    display_name: "Goose AI",
    global: &[".config", "goose", "skills"],
    install_subdir: None,
    local: &[".goose", "skills"],
    categories: &[],
};

pub static CRUSH: PathLayout = PathLayout {
    tool: ToolType::Crush,
    display_name: "Crush",
    global: &[".config", "crush", "skills"],
    install_subdir: None,
    local: &[".crush", "skills"],
    categories: &[],
};

pub static DROID: PathLayout = PathLayout {
    tool: ToolType::Droid,
    display_name: "Droid (Factory AI)",
    global: &[".factory", "skills"],
    install_subdir: None,
    local: &[".factory", "skills"],
    categories: &[],
};

/// A provider driven entirely by a [`PathLayout`].
#[derive(Debug, Clone)]
pub struct TableProvider {
    layout: &'static PathLayout,
    home: Option<PathBuf>,
}

impl TableProvider {
    pub fn new(layout: &'static PathLayout, home: Option<PathBuf>) -> Self {
        Self { layout, home }
    }
}

fn join_all(base: &Path, segments: &[&str]) -> PathBuf {
    segments.iter().fold(base.to_path_buf(), |p, s| p.join(s))
}

impl ToolProvider for TableProvider {
    fn tool_type(&self) -> ToolType {
        self.layout.tool
    }

    fn display_name(&self) -> &str {
        self.layout.display_name
    }

    fn global_skills_dir(&self) -> Result<PathBuf> {
        let home = self
            .home
            .as_deref()
            .ok_or(SkillSyncError::HomeDirUnavailable)?;
        Ok(join_all(home, self.layout.global))
    }

    fn global_install_dir(&self) -> Result<PathBuf> {
        let root = self.global_skills_dir()?;
        Ok(match self.layout.install_subdir {
            Some(sub) => root.join(sub),
            None => root,
        })
    }

    fn local_skills_dir(&self, project_root: &Path) -> PathBuf {
        join_all(project_root, self.layout.local)
    }

    fn categories(&self) -> &[&'static str] {
        self.layout.categories
    }
}
