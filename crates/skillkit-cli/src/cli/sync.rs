//! `tsk sync`: write installed skills into AGENTS.md.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;
use dialoguer::MultiSelect;

use skillkit_core::service::sync::{listed_in, skill_summaries, sync_agents_md};

use super::skill::interactive;
use crate::state::AppState;

pub fn handle_sync(
    output: Option<&Path>,
    auto: bool,
    skills: &[String],
    state: &AppState,
    json: bool,
) -> Result<()> {
    let output = state.sync_output(output);

    let selection: Option<Vec<String>> = if !skills.is_empty() {
        Some(skills.to_vec())
    } else if auto {
        None
    } else if interactive(json) {
        let summaries = skill_summaries(&state.resolver);
        if summaries.is_empty() {
            println!("  No skills installed; writing an empty skills block.");
            Some(Vec::new())
        } else {
            let listed = listed_in(&state.resolver, &output);
            let first_sync = listed.is_empty();
            let items: Vec<String> = summaries
                .iter()
                .map(|s| format!("{} ({}) - {}", s.name, s.kind, s.description))
                .collect();
            // First sync checks everything; later syncs keep the previous choice.
            let defaults: Vec<bool> = summaries
                .iter()
                .map(|s| first_sync || listed.contains(&s.name))
                .collect();
            let chosen = MultiSelect::new()
                .with_prompt(format!("Select skills to list in {}", output.display()))
                .items(&items)
                .defaults(&defaults)
                .interact()?;
            Some(chosen.into_iter().map(|i| summaries[i].name.clone()).collect())
        }
    } else {
        bail!("Pass --auto or --skills when not running interactively.");
    };

    let synced = sync_agents_md(&state.resolver, &output, selection.as_deref())?;

    if json {
        let out = serde_json::json!({
            "output": output,
            "skills": synced,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!(
            "  {} Synced {} skill(s) to {}",
            style("*").green().bold(),
            synced.len(),
            style(output.display()).cyan()
        );
        println!();
    }
    Ok(())
}
