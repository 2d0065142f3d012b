use crate::error::{Result, SkillSyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// The marker file that makes a directory a skill.
pub const MANIFEST_FILE: &str = "SKILL.md";

const DESCRIPTION_KEY: &str = "description:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub source_path: PathBuf,
    pub description: String,
}

/// A directory is a skill when it directly contains the manifest file.
pub fn is_valid_skill(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

pub fn validate_skill_dir(dir: &Path) -> Result<()> {
    if is_valid_skill(dir) {
        Ok(())
    } else {
        Err(SkillSyncError::not_found(MANIFEST_FILE, dir.join(MANIFEST_FILE)))
    }
}

/// Load a skill whose name is the directory's base name.
pub fn load_skill(skill_dir: &Path) -> Result<Skill> {
    let name = skill_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_skill_named(skill_dir, name)
}

pub fn load_skill_named(skill_dir: &Path, name: impl Into<String>) -> Result<Skill> {
    validate_skill_dir(skill_dir)?;

    Ok(Skill {
        name: name.into(),
        source_path: skill_dir.to_path_buf(),
        description: read_description(&skill_dir.join(MANIFEST_FILE)),
    })
}

/// Description from a manifest file, empty when unreadable.
pub fn read_description(manifest: &Path) -> String {
    match fs::read_to_string(manifest) {
        Ok(content) => parse_description(&content),
        Err(e) => {
            tracing::debug!(path = %manifest.display(), error = %e, "Could not read manifest");
            String::new()
        }
    }
}

/// First `description:` line wins; everything else in the manifest is ignored.
pub fn parse_description(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(DESCRIPTION_KEY))
        .map(|desc| desc.trim().to_string())
        .unwrap_or_default()
}

/// Name for a repository that is itself one skill: the last path segment
/// without a `.git` suffix.
pub fn skill_name_from_source(source: &str) -> String {
    let trimmed = source.trim().trim_end_matches(['/', '\\']);
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// Reject names that would escape a skills directory.
pub fn validate_skill_name(name: &str) -> Result<()> {
    if is_unsafe_skill_name(name) {
        return Err(SkillSyncError::InvalidSkillName(name.to_string()));
    }
    Ok(())
}

fn is_unsafe_skill_name(name: &str) -> bool {
    name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_md_skill() {
        let tmp = TempDir::new().unwrap();
        let skill_dir = tmp.path().join("test-skill");
        fs::create_dir_all(&skill_dir).unwrap();

        fs::write(
            skill_dir.join("SKILL.md"),
            "---\nname: test\ndescription:   Does a test thing.  \n---\n# Test Skill\n",
        )
        .unwrap();

        let skill = load_skill(&skill_dir).unwrap();
        assert_eq!(skill.name, "test-skill");
        assert_eq!(skill.description, "Does a test thing.");
        assert_eq!(skill.source_path, skill_dir);
    }

    #[test]
    fn no_skill_file() {
        let tmp = TempDir::new().unwrap();
        let skill_dir = tmp.path().join("empty");
        fs::create_dir_all(&skill_dir).unwrap();

        assert!(!is_valid_skill(&skill_dir));
        let err = load_skill(&skill_dir).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn manifest_must_be_a_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("SKILL.md")).unwrap();
        assert!(!is_valid_skill(tmp.path()));
    }

    #[test]
    fn description_first_match_wins() {
        let content = "# Title\n  description: first \ndescription: second\n";
        assert_eq!(parse_description(content), "first");
    }

    #[test]
    fn description_is_case_sensitive() {
        assert_eq!(parse_description("Description: nope\n"), "");
        assert_eq!(parse_description("no metadata here"), "");
    }

    #[test]
    fn name_from_source() {
        assert_eq!(skill_name_from_source("owner/my-skill"), "my-skill");
        assert_eq!(
            skill_name_from_source("https://github.com/owner/my-skill.git"),
            "my-skill"
        );
        assert_eq!(skill_name_from_source("git@github.com:owner/tool.git"), "tool");
        assert_eq!(skill_name_from_source("./local/dir/"), "dir");
    }

    #[test]
    fn unsafe_names() {
        assert!(validate_skill_name("demo").is_ok());
        assert!(validate_skill_name(".hidden-but-ok").is_ok());
        for bad in ["", "  ", "../x", "a/b", "a\\b", "..", "a\0b"] {
            assert!(validate_skill_name(bad).is_err(), "{bad:?}");
        }
    }
}
