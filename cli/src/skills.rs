use crate::{fetch, prompt};
use anyhow::{Context, Result};
use console::style;
use skillsync_core::{
    Config, InstallReport, Installer, Inventory, InstalledSkill, Location, PlannedTarget,
    ProviderRegistry, RemoveReport, RemoveStatus, RepositoryScanner, Scope, Skill, ToolProvider,
    current_project_root, install_preview, removal_preview, skill_name_from_source,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

pub struct InstallArgs {
    pub source: String,
    pub targets: Vec<String>,
    pub local: bool,
    pub only: Vec<String>,
    pub all: bool,
    pub yes: bool,
}

/// Where the provider selection comes from.
#[derive(Debug, PartialEq, Eq)]
enum TargetChoice<'a> {
    Flags(&'a [String]),
    Config(&'a [String]),
    All,
    Prompt,
}

/// `--target` wins, then the config file, then every tool with `--yes`, else ask.
fn choose_targets<'a>(flags: &'a [String], config: &'a Config, yes: bool) -> TargetChoice<'a> {
    if !flags.is_empty() {
        TargetChoice::Flags(flags)
    } else if !config.targets.is_empty() {
        TargetChoice::Config(&config.targets)
    } else if yes {
        TargetChoice::All
    } else {
        TargetChoice::Prompt
    }
}

/// Providers for a non-interactive choice, `None` for [`TargetChoice::Prompt`].
fn parse_choice(
    registry: &ProviderRegistry,
    choice: TargetChoice<'_>,
) -> Result<Option<Vec<Arc<dyn ToolProvider>>>> {
    Ok(match choice {
        TargetChoice::Flags(names) => Some(registry.parse(names)?),
        TargetChoice::Config(names) => Some(
            registry
                .parse(names)
                .context("Invalid targets in config file")?,
        ),
        TargetChoice::All => Some(registry.all_providers().to_vec()),
        TargetChoice::Prompt => None,
    })
}

fn resolve_providers(
    registry: &ProviderRegistry,
    flags: &[String],
    config: &Config,
    yes: bool,
) -> Result<Vec<Arc<dyn ToolProvider>>> {
    let Some(providers) = parse_choice(registry, choose_targets(flags, config, yes))? else {
        return prompt::select_providers(registry.all_providers());
    };

    println!("{} Target tools:", style("🎯").cyan());
    for p in &providers {
        println!("   • {}", p.display_name());
    }
    println!();
    Ok(providers)
}

fn resolve_scope(local: bool, yes: bool, verb: &str) -> Result<Scope> {
    let project_root = current_project_root();
    if local && project_root.is_none() {
        anyhow::bail!("Not in a git repository, --local requires a project context");
    }

    let project = match project_root {
        Some(root) if local => Some(root),
        Some(root) if !yes => {
            let question = format!(
                "Also {verb} the project directory?\n   ({})",
                root.display()
            );
            prompt::confirm(&question, false)?.then_some(root)
        }
        _ => None,
    };
    let scope = Scope::from_parts(!local, project).context("No skills directory selected")?;

    let label = match &scope {
        Scope::Global => "Global only",
        Scope::Local(_) => "Project only",
        Scope::Both(_) => "Global + Project",
    };
    println!("{} Scope: {}", style("📁").cyan(), label);
    if let Some(root) = scope.project_root() {
        println!("   {}", style(format!("Project root: {}", root.display())).dim());
    }
    println!();
    Ok(scope)
}

fn print_preview(title: &str, planned: Vec<PlannedTarget>) {
    println!("{} {}:", style("📍").cyan(), title);
    for target in planned {
        let path = match &target.path {
            Ok(path) => path.display().to_string(),
            Err(e) => style(e.to_string()).red().to_string(),
        };
        println!(
            "   {} [{}] {}",
            style(&target.skill).cyan(),
            target.location,
            path
        );
    }
    println!();
}

/// Skills picked by `--skill` or `--all`, `None` when the user should choose.
fn pick_skills(found: Vec<Skill>, only: &[String], all: bool) -> Result<Option<Vec<Skill>>> {
    if !only.is_empty() {
        let missing: Vec<&str> = only
            .iter()
            .filter(|name| !found.iter().any(|s| &s.name == *name))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            let available: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
            anyhow::bail!(
                "Skill(s) not found: {}. Available: {}",
                missing.join(", "),
                available.join(", ")
            );
        }
        return Ok(Some(
            found.into_iter().filter(|s| only.contains(&s.name)).collect(),
        ));
    }

    Ok(all.then_some(found))
}

pub fn install(registry: &ProviderRegistry, config: &Config, args: InstallArgs) -> Result<()> {
    let providers = resolve_providers(registry, &args.targets, config, args.yes)?;

    println!("{} Fetching: {}", style("📦").cyan(), args.source);
    let checkout = fetch::fetch(&args.source)?;

    let fallback_name = skill_name_from_source(&args.source);
    let found = RepositoryScanner::new(checkout.path()).discover(&fallback_name);
    if found.is_empty() {
        anyhow::bail!("No valid skills found in {}", args.source);
    }
    println!("{} Found {} skill(s)", style("✓").green().bold(), found.len());
    println!();

    let selected = match pick_skills(found.clone(), &args.only, args.all || args.yes)? {
        Some(selected) => selected,
        None => prompt::select_skills(found)?,
    };
    if selected.is_empty() {
        println!("{} No skills selected", style("!").yellow());
        return Ok(());
    }

    let scope = resolve_scope(args.local, args.yes, "install to")?;
    print_preview(
        "Installation preview",
        install_preview(&selected, &providers, &scope),
    );

    let report = Installer::new(config.copy_options()).install(&selected, &providers, &scope);
    print_install_report(&report);

    if !report.is_success() {
        anyhow::bail!("Installation failed: no skills were installed");
    }
    Ok(())
}

fn print_install_report(report: &InstallReport) {
    for skill in &report.skills {
        println!("{} Installing: {}", style("📦").cyan(), style(&skill.skill).bold());
        for outcome in &skill.outcomes {
            match &outcome.result {
                Ok(dest) => println!(
                    "   {} {}: {}",
                    style("✓").green(),
                    outcome.display_name,
                    dest.display()
                ),
                Err(e) => println!(
                    "   {} {} ({}): {}",
                    style("⚠").yellow(),
                    outcome.display_name,
                    outcome.location,
                    e
                ),
            }
        }
    }
    println!();

    if report.is_success() {
        println!(
            "{} Installation complete! {} skill(s) installed",
            style("✅").green(),
            report.installed_skills()
        );
    } else {
        println!("{} No skills installed successfully", style("❌").red());
    }
}

pub fn remove(
    registry: &ProviderRegistry,
    config: &Config,
    name: &str,
    targets: &[String],
    local: bool,
    yes: bool,
) -> Result<()> {
    println!("{} Preparing to remove: {}", style("🗑").cyan(), name);
    println!();

    let providers = resolve_providers(registry, targets, config, yes)?;
    let scope = resolve_scope(local, yes, "remove from")?;
    print_preview("Removal preview", removal_preview(name, &providers, &scope));

    if !yes && !prompt::confirm("Proceed with removal?", false)? {
        println!("{} Removal cancelled", style("!").yellow());
        return Ok(());
    }

    let report = skillsync_core::remove(name, &providers, &scope)?;
    print_remove_report(&report);
    Ok(())
}

fn print_remove_report(report: &RemoveReport) {
    for outcome in &report.outcomes {
        let place = match &outcome.location {
            Location::Global => outcome.display_name.clone(),
            Location::Project(_) => format!("{} (project)", outcome.display_name),
        };
        match &outcome.status {
            RemoveStatus::Removed => println!("   {} Removed from {}", style("✓").green(), place),
            RemoveStatus::NotFound => println!("   {} {}: not found", style("⚠").yellow(), place),
            RemoveStatus::Failed(e) => {
                println!("   {} {}: failed to remove - {}", style("❌").red(), place, e)
            }
        }
    }
    println!();

    if report.removed() > 0 {
        println!(
            "{} Skill '{}' removed from {} location(s)",
            style("✅").green(),
            report.skill,
            report.removed()
        );
    } else {
        println!("{} Nothing was removed", style("!").yellow());
    }
}

pub fn list(
    registry: &ProviderRegistry,
    config: &Config,
    targets: &[String],
    json: bool,
) -> Result<()> {
    let providers = parse_choice(registry, choose_targets(targets, config, true))?
        .unwrap_or_else(|| registry.all_providers().to_vec());
    let project_root = current_project_root();
    let inventory = skillsync_core::list_installed(&providers, project_root.as_deref());

    for failure in &inventory.failures {
        eprintln!(
            "{} Failed to scan {}: {}",
            style("⚠").yellow(),
            failure.display_name,
            failure.error
        );
    }

    if json {
        let out = serde_json::to_string_pretty(&inventory.skills)
            .context("Failed to serialize installed skills")?;
        println!("{out}");
        return Ok(());
    }

    if inventory.is_empty() {
        println!("{} No installed skills found", style("📭").yellow());
        return Ok(());
    }

    println!("{} Installed skills:", style("📦").cyan());
    println!();
    for provider in &providers {
        print_provider_skills(provider.as_ref(), &inventory);
    }
    Ok(())
}

fn print_provider_skills(provider: &dyn ToolProvider, inventory: &Inventory) {
    let skills: Vec<&InstalledSkill> = inventory.for_provider(provider.tool_type()).collect();
    if skills.is_empty() {
        return;
    }

    println!(
        "  {} ({}):",
        style(provider.display_name()).white().bold(),
        skills.len()
    );
    if let Ok(dir) = provider.global_skills_dir() {
        println!("  {}", style(format!("📁 {}", dir.display())).dim());
    }

    // Root skills first, then the provider's own categories in order, then the rest.
    let mut groups: BTreeMap<String, Vec<&InstalledSkill>> = BTreeMap::new();
    for &skill in &skills {
        groups.entry(skill.category.to_string()).or_default().push(skill);
    }

    let mut order: Vec<String> = vec![String::new()];
    order.extend(provider.categories().iter().map(|c| c.to_string()));
    let rest: Vec<String> = groups
        .keys()
        .filter(|k| !order.contains(k))
        .cloned()
        .collect();
    order.extend(rest);

    for key in order {
        let Some(group) = groups.get(&key) else {
            continue;
        };
        if !key.is_empty() {
            println!("    {}", style(format!("[{key}]")).dim());
        }
        let indent = if key.is_empty() { "    " } else { "      " };
        for skill in group {
            if skill.is_valid {
                println!("{indent}{} {}", style("✓").green(), skill.name);
            } else {
                println!(
                    "{indent}{} {} {}",
                    style("⚠").yellow(),
                    skill.name,
                    style("(missing SKILL.md)").dim()
                );
            }
        }
    }
    println!();
}

pub fn print_targets(registry: &ProviderRegistry) -> Result<()> {
    let project = PathBuf::from("<project>");
    println!("{} Supported tools:", style("🎯").cyan());
    println!();

    for provider in registry.all_providers() {
        println!(
            "  {} {}",
            style(provider.tool_type()).cyan().bold(),
            style(format!("({})", provider.display_name())).dim()
        );
        match (provider.global_skills_dir(), provider.global_install_dir()) {
            (Ok(scan), Ok(install)) if scan == install => {
                println!("    global:  {}", scan.display());
            }
            (Ok(scan), Ok(install)) => {
                println!("    global:  {}", scan.display());
                println!("    install: {}", install.display());
            }
            (Err(e), _) | (_, Err(e)) => println!("    global:  {}", style(e).red()),
        }
        println!("    project: {}", provider.local_skills_dir(&project).display());
        if !provider.categories().is_empty() {
            println!("    categories: {}", provider.categories().join(", "));
        }
    }
    Ok(())
}
