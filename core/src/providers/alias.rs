use crate::error::Result;
use crate::traits::{ToolProvider, ToolType};
use std::path::{Path, PathBuf};

/// A tool that shares another tool's directory convention under its own identity.
///
/// Only `tool_type` and `display_name` differ; every path comes from the delegate.
pub struct AliasProvider<P> {
    tool: ToolType,
    display_name: &'static str,
    inner: P,
}

impl<P: ToolProvider> AliasProvider<P> {
    pub fn new(tool: ToolType, display_name: &'static str, inner: P) -> Self {
        Self {
            tool,
            display_name,
            inner,
        }
    }
}

impl<P: ToolProvider> ToolProvider for AliasProvider<P> {
    fn tool_type(&self) -> ToolType {
        self.tool
    }

    fn display_name(&self) -> &str {
        self.display_name
    }

    fn global_skills_dir(&self) -> Result<PathBuf> {
        self.inner.global_skills_dir()
    }

    fn global_install_dir(&self) -> Result<PathBuf> {
        self.inner.global_install_dir()
    }

    fn local_skills_dir(&self, project_root: &Path) -> PathBuf {
        self.inner.local_skills_dir(project_root)
    }

    fn categories(&self) -> &[&'static str] {
        self.inner.categories()
    }

    fn ensure_install_dir(&self) -> Result<PathBuf> {
        self.inner.ensure_install_dir()
    }

    fn ensure_local_install_dir(&self, project_root: &Path) -> Result<PathBuf> {
        self.inner.ensure_local_install_dir(project_root)
    }
}
