//! Skill management commands: install, list, where, locations, remove.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::{Term, style};
use dialoguer::{Confirm, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};

use skillkit_core::skill::discovery::discover_skills;
use skillkit_core::skill::manifest::load_manifest;
use skillkit_core::service::remove::remove_skills;
use skillkit_types::skill::{DiscoveredSkill, InstallOutcome};
use skillkit_types::storage::{ScanOutcome, SkillLocation};

use crate::state::AppState;

/// Start a steady-ticking spinner with the given message.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Whether prompts can be shown.
pub fn interactive(json: bool) -> bool {
    !json && Term::stderr().is_term()
}

// ---------------------------------------------------------------------------
// Install
// ---------------------------------------------------------------------------

pub struct InstallArgs<'a> {
    pub source: &'a Path,
    pub global: bool,
    pub universal: bool,
    pub all: bool,
    pub force: bool,
    pub skills: &'a [String],
}

pub fn handle_install(args: InstallArgs<'_>, state: &AppState, json: bool) -> Result<()> {
    let discovered = discover_skills(
        state.resolver.fs(),
        args.source,
        state.resolver.entry_files(),
    )
    .with_context(|| format!("Failed to read skills from {}", args.source.display()))?;

    if discovered.is_empty() {
        bail!(
            "No skills found in {} (expected SKILL.md or SKILL.yaml)",
            args.source.display()
        );
    }

    let selected = if !args.skills.is_empty() {
        pick_by_name(discovered, args.skills)?
    } else if args.all || discovered.len() == 1 {
        discovered
    } else if interactive(json) {
        prompt_install_selection(discovered)?
    } else {
        bail!(
            "Found {} skills; pass --all or --skills to choose which to install",
            discovered.len()
        );
    };

    if selected.is_empty() {
        if !json {
            println!("  No skills selected.");
        }
        return Ok(());
    }

    let scope = state.install_scope(args.global, args.universal);
    let progress = if json {
        None
    } else {
        Some(spinner(&format!("Installing {} skill(s)...", selected.len()))?)
    };
    let report = state.install_service().install(
        &selected,
        scope,
        args.force,
        &args.source.display().to_string(),
    );
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let report = report?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!(
            "  Target: {} {}",
            style(report.target.kind.label()).cyan(),
            style(report.target.base.display()).dim()
        );
        for result in &report.results {
            match &result.outcome {
                InstallOutcome::Installed { replaced, .. } => println!(
                    "  {} {}{}",
                    style("*").green().bold(),
                    style(&result.name).cyan(),
                    if *replaced { " (replaced)" } else { "" }
                ),
                InstallOutcome::Skipped { reason } => println!(
                    "  {} {}: {}",
                    style("-").yellow(),
                    style(&result.name).cyan(),
                    reason
                ),
                InstallOutcome::Failed { reason } => println!(
                    "  {} {}: {}",
                    style("!").red().bold(),
                    style(&result.name).cyan(),
                    reason
                ),
            }
        }
        println!();
    }

    let failed = report.failed().count();
    if failed > 0 {
        bail!("{failed} skill(s) failed to install");
    }
    Ok(())
}

/// Keep the discovered skills named in `names`, in discovery order.
fn pick_by_name(discovered: Vec<DiscoveredSkill>, names: &[String]) -> Result<Vec<DiscoveredSkill>> {
    let missing: Vec<&str> = names
        .iter()
        .filter(|name| !discovered.iter().any(|s| &s.name == *name))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        bail!("Skill(s) not found in source: {}", missing.join(", "));
    }

    Ok(discovered
        .into_iter()
        .filter(|s| names.contains(&s.name))
        .collect())
}

fn prompt_install_selection(discovered: Vec<DiscoveredSkill>) -> Result<Vec<DiscoveredSkill>> {
    let items: Vec<String> = discovered
        .iter()
        .map(|s| {
            let marker = if s.has_implementation { "" } else { " [no entry file]" };
            format!("{} - {}{marker}", s.name, s.description)
        })
        .collect();
    let defaults: Vec<bool> = discovered.iter().map(|s| s.has_implementation).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select skills to install")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    Ok(discovered
        .into_iter()
        .enumerate()
        .filter(|(i, _)| chosen.contains(i))
        .map(|(_, s)| s)
        .collect())
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub fn handle_list(state: &AppState, json: bool) -> Result<()> {
    let skills = state.resolver.list_all_skills();

    if json {
        let out: Vec<_> = skills
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "description": description_of(state, s),
                    "kind": s.kind,
                    "priority": s.priority,
                    "path": s.path,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!();
        println!("  No skills installed. Use 'tsk install <dir>' to add skills.");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Description"),
            Cell::new("Location"),
            Cell::new("Priority"),
            Cell::new("Path"),
        ]);

    for skill in &skills {
        let location_color = if skill.kind.is_global() {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(&skill.name),
            Cell::new(description_of(state, skill)),
            Cell::new(skill.kind.label()).fg(location_color),
            Cell::new(skill.priority),
            Cell::new(skill.path.display()),
        ]);
    }

    println!();
    println!("{table}");
    println!("  {} skill(s)", skills.len());
    println!();
    Ok(())
}

fn description_of(state: &AppState, skill: &SkillLocation) -> String {
    load_manifest(state.resolver.fs(), &skill.path)
        .unwrap_or_default()
        .description_or_default()
        .to_owned()
}

// ---------------------------------------------------------------------------
// Where / locations
// ---------------------------------------------------------------------------

pub fn handle_where(name: &str, state: &AppState, json: bool) -> Result<()> {
    let Some(skill) = state.resolver.find_skill(name) else {
        bail!("Skill '{name}' not found in any location.");
    };
    let valid = state.resolver.is_skill_directory(&skill.path);

    if json {
        let out = serde_json::json!({
            "name": skill.name,
            "kind": skill.kind,
            "priority": skill.priority,
            "path": skill.path,
            "valid": valid,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} -> {}",
        style("*").green().bold(),
        style(&skill.name).cyan(),
        skill.path.display()
    );
    println!(
        "    {} (priority {})",
        style(skill.kind.label()).dim(),
        skill.priority
    );
    if !valid {
        println!(
            "    {} missing a manifest or entry file; not shown by 'tsk list'",
            style("!").yellow()
        );
    }
    println!();
    Ok(())
}

pub fn handle_locations(state: &AppState, json: bool) -> Result<()> {
    let scans = state.resolver.scan_locations();

    if json {
        let out: Vec<_> = scans
            .iter()
            .map(|scan| {
                serde_json::json!({
                    "kind": scan.location.kind,
                    "priority": scan.location.priority,
                    "path": scan.location.base,
                    "exists": scan.location.exists,
                    "skills": scan.skills().len(),
                    "skipped": scan.skip_reason(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Priority").fg(Color::Cyan),
            Cell::new("Location"),
            Cell::new("Path"),
            Cell::new("Status"),
        ]);

    for scan in &scans {
        let (status, color) = match &scan.outcome {
            ScanOutcome::Absent => ("absent".to_owned(), Color::DarkGrey),
            ScanOutcome::Scanned { skills, rejected } if rejected.is_empty() => {
                (format!("{} skill(s)", skills.len()), Color::Green)
            }
            ScanOutcome::Scanned { skills, rejected } => (
                format!("{} skill(s), {} ignored", skills.len(), rejected.len()),
                Color::Yellow,
            ),
            ScanOutcome::Skipped { reason } => (format!("unreadable: {reason}"), Color::Red),
        };
        table.add_row(vec![
            Cell::new(scan.location.priority),
            Cell::new(scan.location.kind.label()),
            Cell::new(scan.location.base.display()),
            Cell::new(status).fg(color),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

pub fn handle_remove(names: &[String], yes: bool, state: &AppState, json: bool) -> Result<()> {
    let names: Vec<String> = if names.is_empty() {
        if !interactive(json) {
            bail!("Specify the skills to remove.");
        }
        let installed = state.resolver.list_all_skills();
        if installed.is_empty() {
            println!("  No skills installed.");
            return Ok(());
        }
        let items: Vec<String> = installed
            .iter()
            .map(|s| format!("{} ({})", s.name, s.kind.label()))
            .collect();
        let chosen = MultiSelect::new()
            .with_prompt("Select skills to remove")
            .items(&items)
            .interact()?;
        chosen.into_iter().map(|i| installed[i].name.clone()).collect()
    } else {
        names.to_vec()
    };

    if names.is_empty() {
        if !json {
            println!("  No skills selected.");
        }
        return Ok(());
    }

    if !yes {
        if !interactive(json) {
            bail!("Refusing to remove skills without confirmation; pass --yes.");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {}?", names.join(", ")))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let report = remove_skills(&state.resolver, &names);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for skill in &report.removed {
            println!(
                "  {} Removed '{}' from {}",
                style("*").green().bold(),
                style(&skill.name).cyan(),
                skill.kind.label()
            );
            if let Some(shadowed) = state.resolver.find_skill(&skill.name) {
                println!(
                    "    {} a copy in {} is now active",
                    style("!").yellow(),
                    shadowed.kind.label()
                );
            }
        }
        for name in &report.not_found {
            println!("  {} '{}' is not installed", style("-").yellow(), name);
        }
        for (name, error) in &report.failed {
            println!("  {} '{}': {}", style("!").red().bold(), name, error);
        }
        println!();
    }

    if !report.failed.is_empty() {
        bail!("{} skill(s) could not be removed", report.failed.len());
    }
    Ok(())
}
