use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, MultiSelect};
use skillsync_core::{Skill, ToolProvider};
use std::sync::Arc;

pub fn select_providers(all: &[Arc<dyn ToolProvider>]) -> Result<Vec<Arc<dyn ToolProvider>>> {
    let items: Vec<String> = all
        .iter()
        .map(|p| format!("{} ({})", p.display_name(), p.tool_type()))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Select target tools (space to toggle, enter to confirm)")
        .items(&items)
        .max_length(8)
        .interact()
        .context("Selection cancelled")?;

    if picked.is_empty() {
        anyhow::bail!("No tools selected");
    }
    Ok(picked.into_iter().map(|i| all[i].clone()).collect())
}

pub fn select_skills(skills: Vec<Skill>) -> Result<Vec<Skill>> {
    let items: Vec<String> = skills
        .iter()
        .map(|s| {
            if s.description.is_empty() {
                style(&s.name).cyan().to_string()
            } else {
                format!("{} - {}", style(&s.name).cyan(), s.description)
            }
        })
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Select skills to install")
        .items(&items)
        .max_length(10)
        .interact()
        .context("Selection cancelled")?;

    let mut skills: Vec<Option<Skill>> = skills.into_iter().map(Some).collect();
    Ok(picked
        .into_iter()
        .filter_map(|i| skills.get_mut(i).and_then(Option::take))
        .collect())
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .context("Confirmation cancelled")
}
