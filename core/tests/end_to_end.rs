use skillsync_core::{
    ProviderRegistry, RepositoryScanner, Scope, SkillCategory, ToolType, install, list_installed,
    remove,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    list_tree(root)
        .into_iter()
        .map(|p| {
            let bytes = if p.is_file() { fs::read(&p).unwrap() } else { Vec::new() };
            (p.strip_prefix(root).unwrap().to_path_buf(), bytes)
        })
        .collect()
}

fn list_tree(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(list_tree(&path));
        }
        out.push(path);
    }
    out
}

fn source_repo() -> TempDir {
    let repo = TempDir::new().unwrap();
    let demo = repo.path().join("skills").join("demo");
    fs::create_dir_all(demo.join("scripts")).unwrap();
    fs::write(demo.join("SKILL.md"), "---\nname: demo\ndescription: hi\n---\n").unwrap();
    fs::write(demo.join("scripts").join("go.sh"), "echo go\n").unwrap();
    fs::create_dir_all(repo.path().join(".git")).unwrap();
    fs::write(repo.path().join("SKILL.md"), "template\n").unwrap();
    repo
}

#[test]
fn install_then_list_across_providers() {
    let home = TempDir::new().unwrap();
    let repo = source_repo();
    let registry = ProviderRegistry::with_home(home.path());

    let skills = RepositoryScanner::new(repo.path()).scan();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].name, "demo");
    assert_eq!(skills[0].description, "hi");

    let providers = registry.parse(&["claude", "gemini"]).unwrap();
    let report = install(&skills, &providers, &Scope::Global);
    assert!(report.is_success());
    assert_eq!(report.skills[0].succeeded(), 2);

    let source_manifest = fs::read(skills[0].source_path.join("SKILL.md")).unwrap();
    for dir in [".claude/skills/demo", ".gemini/skills/demo"] {
        let installed = fs::read(home.path().join(dir).join("SKILL.md")).unwrap();
        assert_eq!(installed, source_manifest);
    }

    let inventory = list_installed(&providers, None);
    assert_eq!(inventory.skills.len(), 2);
    for record in &inventory.skills {
        assert_eq!(record.name, "demo");
        assert!(record.is_valid);
        assert_eq!(record.category.to_string(), "");
    }
}

#[test]
fn codex_installs_are_listed_under_public() {
    let home = TempDir::new().unwrap();
    let repo = source_repo();
    let registry = ProviderRegistry::with_home(home.path());
    let codex = registry.parse(&["codex"]).unwrap();

    let skills = RepositoryScanner::new(repo.path()).scan();
    assert!(install(&skills, &codex, &Scope::Global).is_success());
    assert!(home.path().join(".codex/skills/public/demo/SKILL.md").is_file());

    let inventory = list_installed(&codex, None);
    assert_eq!(inventory.skills.len(), 1);
    assert_eq!(inventory.skills[0].provider, ToolType::Codex);
    assert_eq!(
        inventory.skills[0].category,
        SkillCategory::Named("public".to_string())
    );
}

#[test]
fn install_is_idempotent() {
    let home = TempDir::new().unwrap();
    let repo = source_repo();
    let registry = ProviderRegistry::with_home(home.path());
    let providers = registry.parse(&["crush"]).unwrap();
    let skills = RepositoryScanner::new(repo.path()).scan();

    assert!(install(&skills, &providers, &Scope::Global).is_success());
    let once = snapshot(home.path());
    assert!(install(&skills, &providers, &Scope::Global).is_success());
    let twice = snapshot(home.path());

    assert_eq!(once, twice);
}

#[test]
fn remove_twice_is_harmless() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let repo = source_repo();
    let registry = ProviderRegistry::with_home(home.path());
    let providers = registry.parse(&["goose", "vscode"]).unwrap();
    let scope = Scope::Both(project.path().to_path_buf());

    let skills = RepositoryScanner::new(repo.path()).scan();
    assert!(install(&skills, &providers, &scope).is_success());
    assert!(project.path().join(".github/skills/demo/SKILL.md").is_file());
    assert!(home.path().join(".config/goose/skills/demo").is_dir());

    let first = remove("demo", &providers, &scope).unwrap();
    assert_eq!(first.removed(), 4);

    let second = remove("demo", &providers, &scope).unwrap();
    assert_eq!(second.removed(), 0);
    assert_eq!(second.not_found(), 4);
    assert_eq!(second.failed(), 0);

    let inventory = list_installed(&providers, Some(project.path()));
    assert!(inventory.is_empty());
}

#[test]
fn whole_repo_fallback_installs_under_repo_name() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("SKILL.md"), "description: single\n").unwrap();
    fs::create_dir_all(repo.path().join(".git")).unwrap();
    fs::write(repo.path().join(".git").join("HEAD"), "ref").unwrap();
    fs::write(repo.path().join(".gitignore"), "*.log\n").unwrap();

    let registry = ProviderRegistry::with_home(home.path());
    let providers = registry.parse(&["kilocode"]).unwrap();
    let name = skillsync_core::skill_name_from_source("https://github.com/acme/solo.git");
    let skills = RepositoryScanner::new(repo.path()).discover(&name);
    assert_eq!(skills.len(), 1);

    assert!(install(&skills, &providers, &Scope::Global).is_success());
    let dest = home.path().join(".kilocode/skills/solo");
    assert!(dest.join("SKILL.md").is_file());
    assert!(!dest.join(".git").exists());
    assert!(!dest.join(".gitignore").exists());
}

#[cfg(unix)]
#[test]
fn read_only_source_reinstalls_and_removes() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let repo = source_repo();
    let demo = repo.path().join("skills").join("demo");
    fs::set_permissions(&demo, fs::Permissions::from_mode(0o555)).unwrap();

    let registry = ProviderRegistry::with_home(home.path());
    let providers = registry.parse(&["claude"]).unwrap();
    let skills = RepositoryScanner::new(repo.path()).scan();

    let first = install(&skills, &providers, &Scope::Global);
    let second = install(&skills, &providers, &Scope::Global);
    let removed = remove("demo", &providers, &Scope::Global).unwrap();
    fs::set_permissions(&demo, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(first.is_success());
    assert_eq!(second.skills[0].failed(), 0);
    assert_eq!(removed.removed(), 1);
    assert_eq!(removed.failed(), 0);
    assert!(!home.path().join(".claude/skills/demo").exists());
}
