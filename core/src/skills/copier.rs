use crate::error::{Result, SkillSyncError};
use std::fs;
use std::path::Path;

/// Names left behind when a skill tree is copied. Matching ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![".git".to_string()],
            exclude_files: vec![".gitignore".to_string(), ".gitattributes".to_string()],
        }
    }
}

impl CopyOptions {
    pub fn with_extra_excludes(
        mut self,
        dirs: impl IntoIterator<Item = String>,
        files: impl IntoIterator<Item = String>,
    ) -> Self {
        self.exclude_dirs.extend(dirs);
        self.exclude_files.extend(files);
        self
    }

    fn excludes_dir(&self, name: &str) -> bool {
        matches_any(name, &self.exclude_dirs)
    }

    fn excludes_file(&self, name: &str) -> bool {
        matches_any(name, &self.exclude_files)
    }
}

fn matches_any(name: &str, list: &[String]) -> bool {
    list.iter().any(|ex| ex.eq_ignore_ascii_case(name))
}

/// Recursively copy `src` into `dest`, keeping permission bits.
///
/// Symlinks are followed. Directory permissions are applied after their
/// contents are written, with owner access always kept so the copy can be
/// replaced or removed later.
pub fn copy_dir(src: &Path, dest: &Path, opts: &CopyOptions) -> Result<()> {
    let meta = fs::metadata(src).map_err(|e| SkillSyncError::io("stat", src, e))?;
    if !meta.is_dir() {
        return Err(SkillSyncError::not_found("skill directory", src));
    }

    fs::create_dir_all(dest).map_err(|e| SkillSyncError::io("create directory", dest, e))?;

    let entries = fs::read_dir(src).map_err(|e| SkillSyncError::io("read directory", src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SkillSyncError::io("read directory", src, e))?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        let src_path = entry.path();
        let dest_path = dest.join(&name);

        let entry_meta =
            fs::metadata(&src_path).map_err(|e| SkillSyncError::io("stat", &src_path, e))?;
        if entry_meta.is_dir() {
            if opts.excludes_dir(&name_str) {
                continue;
            }
            copy_dir(&src_path, &dest_path, opts)?;
        } else {
            if opts.excludes_file(&name_str) {
                continue;
            }
            fs::copy(&src_path, &dest_path)
                .map_err(|e| SkillSyncError::io("copy file", &src_path, e))?;
        }
    }

    fs::set_permissions(dest, owner_writable(meta.permissions()))
        .map_err(|e| SkillSyncError::io("set permissions on", dest, e))?;
    Ok(())
}

#[cfg(unix)]
fn owner_writable(perms: fs::Permissions) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    fs::Permissions::from_mode(perms.mode() | 0o700)
}

#[cfg(not(unix))]
fn owner_writable(mut perms: fs::Permissions) -> fs::Permissions {
    perms.set_readonly(false);
    perms
}

/// Delete whatever sits at `path`: a directory tree, a file or a symlink.
pub fn remove_entry(path: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("scripts")).unwrap();
        fs::create_dir_all(src.join(".git").join("objects")).unwrap();
        fs::write(src.join("SKILL.md"), "description: demo\n").unwrap();
        fs::write(src.join("scripts").join("run.sh"), "#!/bin/sh\necho hi\n").unwrap();
        fs::write(src.join(".gitignore"), "target\n").unwrap();
        fs::write(src.join(".GitAttributes"), "* text\n").unwrap();
        fs::write(src.join(".git").join("HEAD"), "ref").unwrap();
        tmp
    }

    #[test]
    fn copies_tree_without_vcs_metadata() {
        let tmp = fixture();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("out").join("demo");

        copy_dir(&src, &dest, &CopyOptions::default()).unwrap();

        assert_eq!(
            fs::read(dest.join("SKILL.md")).unwrap(),
            fs::read(src.join("SKILL.md")).unwrap()
        );
        assert!(dest.join("scripts").join("run.sh").is_file());
        assert!(!dest.join(".git").exists());
        assert!(!dest.join(".gitignore").exists());
        assert!(!dest.join(".GitAttributes").exists());
    }

    #[test]
    fn extra_excludes_apply() {
        let tmp = fixture();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("out");
        let opts = CopyOptions::default().with_extra_excludes(vec!["scripts".to_string()], vec![]);

        copy_dir(&src, &dest, &opts).unwrap();
        assert!(dest.join("SKILL.md").is_file());
        assert!(!dest.join("scripts").exists());
    }

    #[test]
    fn missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let err = copy_dir(
            &tmp.path().join("absent"),
            &tmp.path().join("out"),
            &CopyOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
        assert!(!tmp.path().join("out").exists());
    }

    #[cfg(unix)]
    #[test]
    fn preserves_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = fixture();
        let src = tmp.path().join("src");
        let script = src.join("scripts").join("run.sh");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

        let dest = tmp.path().join("out");
        copy_dir(&src, &dest, &CopyOptions::default()).unwrap();

        let mode = fs::metadata(dest.join("scripts").join("run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_source_dirs_copy_as_owner_writable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = fixture();
        let src = tmp.path().join("src");
        fs::set_permissions(&src, fs::Permissions::from_mode(0o555)).unwrap();

        let dest = tmp.path().join("out");
        copy_dir(&src, &dest, &CopyOptions::default()).unwrap();
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(mode & 0o777, 0o755);
        remove_entry(&dest).unwrap();
        assert!(!dest.exists());
    }

    #[test]
    fn remove_entry_handles_files_and_dirs() {
        let tmp = fixture();
        let file = tmp.path().join("src").join("SKILL.md");
        remove_entry(&file).unwrap();
        assert!(!file.exists());

        let dir = tmp.path().join("src");
        remove_entry(&dir).unwrap();
        assert!(!dir.exists());
    }
}
