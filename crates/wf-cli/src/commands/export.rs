use std::fmt::Write as _;
use std::path::Path;

use wf_fiction::{ContentRegistry, HotspotAction};

pub fn run(content: Option<&Path>, format: &str, output: Option<&Path>) -> Result<(), String> {
    let content = super::load_content(content)?;

    let text = match format {
        "json" => content
            .to_json()
            .map_err(|e| format!("JSON serialization error: {e}"))?,
        "markdown" | "md" => export_markdown(&content),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: json, markdown"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &text)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{text}");
    }

    Ok(())
}

/// Render content as a readable script.
fn export_markdown(content: &ContentRegistry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", content.title);
    let _ = writeln!(out, "> {}\n", content.opening_line);
    out.push_str("---\n\n## Scenes\n\n");

    for scene in content.scenes.iter() {
        let _ = writeln!(out, "### {}\n", scene.id);
        let _ = writeln!(out, "*{}*\n", scene.flavor);
        for hotspot in &scene.hotspots {
            let action = match &hotspot.action {
                HotspotAction::Dialogue(node) => format!("dialogue {node}"),
                HotspotAction::Transition { to, .. } => format!("go to `{to}`"),
                HotspotAction::StartQuest(quest) => format!("start quest `{quest}`"),
                HotspotAction::GrantFlag(flag) => format!("grant `{flag}`"),
            };
            let _ = writeln!(out, "- **{}**: {action}", hotspot.label);
        }
        out.push('\n');
    }

    out.push_str("## Dialogue\n\n");
    for (id, node) in content.dialogue.iter() {
        let _ = writeln!(out, "### {id}. {}\n", node.speaker);
        let _ = writeln!(out, "{}\n", node.line);
        for (i, choice) in node.choices.iter().enumerate() {
            let mut notes = Vec::new();
            if let Some(flag) = &choice.gate.requires {
                notes.push(format!("needs `{flag}`"));
            }
            if let Some(flag) = &choice.gate.blocks_if {
                notes.push(format!("not after `{flag}`"));
            }
            if let Some(flag) = &choice.set_flag {
                notes.push(format!("sets `{flag}`"));
            }
            if let Some(quest) = &choice.start_quest {
                notes.push(format!("starts `{quest}`"));
            }
            if !choice.impact.is_zero() {
                notes.push(choice.impact.to_string());
            }
            if let Some(next) = choice.goto {
                notes.push(format!("goes to {next}"));
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join("; "))
            };
            let _ = writeln!(out, "{}. {}{notes}", i + 1, choice.text);
        }
        if let Some(timeout) = node.timeout {
            let _ = writeln!(
                out,
                "\nAfter {}s choice {} is taken.",
                timeout.seconds,
                timeout.choice + 1
            );
        }
        out.push('\n');
    }

    out.push_str("## Quests\n\n");
    for quest in &content.quests {
        let _ = writeln!(out, "### {}\n", quest.title);
        if !quest.purpose.is_empty() {
            let _ = writeln!(out, "{}\n", quest.purpose);
        }
        for objective in &quest.objectives {
            let _ = writeln!(
                out,
                "- {} (any of: {})",
                objective.text,
                objective.done_by.join(", ")
            );
        }
        out.push('\n');
    }

    if !content.codex.is_empty() {
        out.push_str("## Codex\n\n");
        for rule in &content.codex.rules {
            let _ = writeln!(out, "- **{}**: {}", rule.code, rule.text);
        }
        for pillar in &content.codex.pillars {
            let _ = writeln!(out, "- {pillar}");
        }
    }

    out
}
