use crate::error::{Result, SkillSyncError};
use crate::skills::CopyOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SKILLSYNC_DIR: &str = ".skillsync";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CopyConfig {
    /// Directory names skipped on top of the built-in denylist.
    pub exclude_dirs: Vec<String>,
    /// File names skipped on top of the built-in denylist.
    pub exclude_files: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Providers used when no `--target` is given. Empty means ask.
    pub targets: Vec<String>,
    pub copy: CopyConfig,
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let path = get_config_path()?;
        if path.exists() {
            load_config_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions::default().with_extra_excludes(
            self.copy.exclude_dirs.iter().cloned(),
            self.copy.exclude_files.iter().cloned(),
        )
    }
}

pub fn get_skillsync_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(SKILLSYNC_DIR))
        .ok_or(SkillSyncError::HomeDirUnavailable)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_skillsync_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SkillSyncError::io("read config", path, e))?;

    toml::from_str(&content).map_err(|e| SkillSyncError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = get_config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| SkillSyncError::io("create directory", dir, e))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| SkillSyncError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    std::fs::write(path, content).map_err(|e| SkillSyncError::io("write config", path, e))
}
