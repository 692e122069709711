use std::path::Path;

use colored::Colorize;

pub fn run(content: Option<&Path>) -> Result<(), String> {
    let content = super::load_content(content)?;
    let issues = content.validate();

    for issue in &issues {
        if issue.is_error {
            println!("  {}", issue.to_string().red());
        } else {
            println!("  {}", issue.to_string().yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        return Err(format!("{errors} content error(s) in '{}'", content.title));
    }

    println!("  All checks passed for '{}'.", content.title);
    println!(
        "  {} scenes, {} dialogue nodes, {} quests, {} ambient events",
        content.scenes.len(),
        content.dialogue.len(),
        content.quests.len(),
        content.ambient.len()
    );

    Ok(())
}
