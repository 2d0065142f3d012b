use crate::error::{Result, SkillSyncError};
use crate::providers::alias::AliasProvider;
use crate::providers::table::{self, PathLayout, TableProvider};
use crate::traits::{ToolProvider, ToolType};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use strum::IntoEnumIterator;

/// The fixed catalog of tool providers.
///
/// Construct once at startup and pass it by reference. Providers are built on
/// first access and reused afterwards; the catalog never changes.
pub struct ProviderRegistry {
    home: Option<PathBuf>,
    providers: OnceLock<Vec<Arc<dyn ToolProvider>>>,
}

impl ProviderRegistry {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home,
            providers: OnceLock::new(),
        }
    }

    /// Registry rooted at the current user's home directory.
    pub fn from_env() -> Self {
        let home = dirs::home_dir();
        if home.is_none() {
            tracing::warn!("Home directory could not be resolved; global paths are unavailable");
        }
        Self::new(home)
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self::new(Some(home.into()))
    }

    pub fn all_providers(&self) -> &[Arc<dyn ToolProvider>] {
        self.providers.get_or_init(|| {
            tracing::debug!(home = ?self.home, "Building provider catalog");
            ToolType::iter()
                .map(|tool| build_provider(tool, self.home.clone()))
                .collect()
        })
    }

    pub fn get(&self, tool: ToolType) -> Arc<dyn ToolProvider> {
        // The catalog is built from `ToolType::iter()`, so the index is the discriminant.
        self.all_providers()[tool as usize].clone()
    }

    pub fn by_name(&self, name: &str) -> Result<Arc<dyn ToolProvider>> {
        let tool = ToolType::from_str(name.trim()).map_err(|_| SkillSyncError::UnknownProvider {
            name: name.to_string(),
            valid: valid_names(),
        })?;
        Ok(self.get(tool))
    }

    /// Resolve provider names in the given order, failing on the first unknown one.
    ///
    /// Blank names are ignored, repeats collapse to the first occurrence, and an
    /// empty selection means every provider.
    pub fn parse<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn ToolProvider>>> {
        let mut selected: Vec<Arc<dyn ToolProvider>> = Vec::new();

        for name in names.iter().map(AsRef::as_ref) {
            if name.trim().is_empty() {
                continue;
            }
            let provider = self.by_name(name)?;
            if !selected
                .iter()
                .any(|p| p.tool_type() == provider.tool_type())
            {
                selected.push(provider);
            }
        }

        if selected.is_empty() {
            return Ok(self.all_providers().to_vec());
        }
        Ok(selected)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Comma-separated list of every provider key, in catalog order.
pub fn valid_names() -> String {
    ToolType::iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn table_provider(layout: &'static PathLayout, home: Option<PathBuf>) -> Arc<dyn ToolProvider> {
    Arc::new(TableProvider::new(layout, home))
}

fn build_provider(tool: ToolType, home: Option<PathBuf>) -> Arc<dyn ToolProvider> {
    match tool {
        ToolType::Gemini => table_provider(&table::GEMINI, home),
        ToolType::Claude => table_provider(&table::CLAUDE, home),
        ToolType::Codex => table_provider(&table::CODEX, home),
        ToolType::Antigravity => table_provider(&table::ANTIGRAVITY, home),
        ToolType::Copilot => table_provider(&table::COPILOT, home),
        ToolType::VsCode => Arc::new(AliasProvider::new(
            ToolType::VsCode,
            "VSCode (Copilot)",
            TableProvider::new(&table::COPILOT, home),
        )),
        ToolType::Cline => table_provider(&table::CLINE, home),
        ToolType::RooCode => table_provider(&table::ROO_CODE, home),
        ToolType::KiloCode => table_provider(&table::KILO_CODE, home),
        ToolType::Goose => table_provider(&table::GOOSE, home),
        ToolType::Crush => table_provider(&table::CRUSH, home),
        ToolType::Droid => table_provider(&table::DROID, home),
    }
}
