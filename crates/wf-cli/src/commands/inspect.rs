use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use wf_fiction::save::read_snapshot;
use wf_fiction::{EngineConfig, SessionState, Snapshot};

pub fn run(save: &Path, content: Option<&Path>, json: bool) -> Result<(), String> {
    let content = super::load_content(content)?;
    let base = SessionState::new(&content, &EngineConfig::default());
    let snapshot = read_snapshot(save, &base).map_err(|e| e.to_string())?;
    let known = content.scenes.contains(&snapshot.scene);

    if json {
        println!("{}", export_json(&snapshot, known)?);
        return Ok(());
    }

    let scene = if known {
        snapshot.scene.to_string()
    } else {
        format!("{} {}", snapshot.scene, "(not in this content)".red())
    };
    println!("  {} {}", "Scene:".bold(), scene);
    println!(
        "  {} ({}, {}) -> ({}, {})",
        "Player:".bold(),
        snapshot.player.x,
        snapshot.player.y,
        snapshot.target.x,
        snapshot.target.y
    );
    println!("  {} {}", "Stats:".bold(), snapshot.stats);

    let flags: Vec<_> = snapshot.flags.iter().collect();
    if flags.is_empty() {
        println!("  {} none", "Flags:".bold());
    } else {
        println!("  {} {}", "Flags:".bold(), flags.join(", "));
    }

    if !snapshot.quests.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Quest", "State", "Objective"]);
        for quest in &snapshot.quests {
            let objective = content
                .quest(&quest.id)
                .and_then(|q| q.objectives.get(quest.index))
                .map_or("-", |o| o.text.as_str());
            table.add_row(vec![
                quest.id.to_string(),
                quest.state.to_string(),
                objective.to_string(),
            ]);
        }
        println!("{table}");
    }

    for issue in &snapshot.issues {
        println!("  {}", format!("warning: {issue}").yellow());
    }

    Ok(())
}

fn export_json(snapshot: &Snapshot, known: bool) -> Result<String, String> {
    let flags: Vec<_> = snapshot.flags.iter().collect();
    let quests: Vec<_> = snapshot
        .quests
        .iter()
        .map(|q| {
            serde_json::json!({
                "id": q.id,
                "state": q.state,
                "index": q.index,
            })
        })
        .collect();

    let export = serde_json::json!({
        "scene": snapshot.scene,
        "scene_known": known,
        "player": snapshot.player,
        "target": snapshot.target,
        "stats": snapshot.stats,
        "flags": flags,
        "quests": quests,
        "issues": snapshot.issues.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });

    serde_json::to_string_pretty(&export).map_err(|e| format!("JSON serialization error: {e}"))
}
