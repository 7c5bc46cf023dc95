//! The managed skills block inside AGENTS.md.
//!
//! The block is delimited by HTML comment markers so it can be regenerated
//! without touching hand-written content around it.

use skillkit_types::skill::SkillSummary;

/// Opening marker of the managed block.
pub const BLOCK_START: &str = "<!-- SKILLKIT:SKILLS:START -->";
/// Closing marker of the managed block.
pub const BLOCK_END: &str = "<!-- SKILLKIT:SKILLS:END -->";

/// Render the full managed block, markers included, without a trailing
/// newline.
pub fn render_skills_block(skills: &[SkillSummary]) -> String {
    let mut lines = vec![
        BLOCK_START.to_owned(),
        "<skills_system priority=\"1\">".to_owned(),
        String::new(),
        "## Available Skills".to_owned(),
        String::new(),
    ];

    if skills.is_empty() {
        lines.push("_No skills installed._".to_owned());
    } else {
        lines.push(
            "Load a skill by reading its SKILL.md when a task matches its description.".to_owned(),
        );
        lines.push(String::new());
        for skill in skills {
            let description = skill.description.replace(['\r', '\n'], " ");
            lines.push(format!(
                "- **{}**: {} ({})",
                skill.name,
                description.trim(),
                skill.kind
            ));
        }
    }

    lines.push(String::new());
    lines.push("</skills_system>".to_owned());
    lines.push(BLOCK_END.to_owned());
    lines.join("\n")
}

/// Byte range of the managed block in `content`, end marker included.
fn block_range(content: &str) -> Option<(usize, usize)> {
    let start = content.find(BLOCK_START)?;
    let end = content[start..].find(BLOCK_END)? + start + BLOCK_END.len();
    Some((start, end))
}

/// Names of the skills listed in the managed block, in listed order.
pub fn parse_listed_skills(content: &str) -> Vec<String> {
    let Some((start, end)) = block_range(content) else {
        return Vec::new();
    };

    content[start..end]
        .lines()
        .filter_map(|line| {
            let rest = line.trim_start().strip_prefix("- **")?;
            let (name, _) = rest.split_once("**:")?;
            (!name.is_empty()).then(|| name.to_owned())
        })
        .collect()
}

/// Replace the managed block in `existing`, or append it when absent.
pub fn upsert_skills_block(existing: &str, block: &str) -> String {
    if let Some((start, end)) = block_range(existing) {
        let mut updated = String::with_capacity(existing.len() + block.len());
        updated.push_str(&existing[..start]);
        updated.push_str(block);
        updated.push_str(&existing[end..]);
        return updated;
    }

    if existing.trim().is_empty() {
        return format!("{block}\n");
    }

    let separator = if existing.ends_with("\n\n") {
        ""
    } else if existing.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    format!("{existing}{separator}{block}\n")
}
