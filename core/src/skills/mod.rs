pub mod copier;
pub mod installed;
pub mod manifest;
pub mod scanner;

pub use copier::{CopyOptions, copy_dir};
pub use installed::{
    InstalledSkill, SkillCategory, scan_installed, scan_installed_dir, scan_project_skills,
};
pub use manifest::{
    MANIFEST_FILE, Skill, is_valid_skill, load_skill, parse_description, skill_name_from_source,
    validate_skill_dir, validate_skill_name,
};
pub use scanner::{RepositoryScanner, scan_repository};
