use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use wf_core::{GameState, NodeId, Position, SceneId};
use wf_fiction::view::DialogueView;
use wf_fiction::{Engine, EngineConfig, ObjectivePacing, SessionView};

use crate::input::{MAX_WAIT, PlayCommand, parse_command};

/// Time step used when the host lets the clock run.
const STEP: f32 = 0.1;
/// Upper bound on steps spent waiting out a scene fade.
const MAX_FADE_STEPS: usize = 200;

/// Engine settings taken from the command line.
pub struct PlayOptions {
    pub interval: f32,
    pub chronicle: usize,
    pub stepwise: bool,
}

pub fn run(content: Option<&Path>, save_path: &Path, options: PlayOptions) -> Result<(), String> {
    let content = super::load_content(content)?;
    let pacing = if options.stepwise {
        ObjectivePacing::Stepwise
    } else {
        ObjectivePacing::Cascade
    };
    let config = EngineConfig::default()
        .with_ambient_interval(options.interval)
        .with_chronicle_capacity(options.chronicle)
        .with_objective_pacing(pacing);

    let mut engine =
        Engine::new(content, config).map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} {}", "Starting".bold(), engine.content().title);
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut screen = Screen::default();
    echo(engine.session().chronicle.lines());
    screen.refresh(&engine.view(), true);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let mut mark = engine.session().chronicle.pushed();
        let mut force = false;

        let command = parse_command(&line);
        tracing::debug!(?command, "play command");
        match command {
            PlayCommand::Quit => break,
            PlayCommand::Look => force = true,
            PlayCommand::Number(index) => {
                if engine.session().game_state() == GameState::Dialogue {
                    choose(&mut engine, index);
                } else {
                    use_hotspot(&mut engine, index);
                }
            }
            PlayCommand::Hotspot(index) => use_hotspot(&mut engine, index),
            PlayCommand::Choose(index) => choose(&mut engine, index),
            PlayCommand::Click { x, y } => {
                if engine.session().game_state() == GameState::FreeRoam {
                    engine.click(Position::new(x, y));
                    settle(&mut engine);
                } else {
                    hint("Finish the conversation first.");
                }
            }
            PlayCommand::Wait { seconds } => wait(&mut engine, seconds),
            PlayCommand::Status => print_status(&engine.view()),
            PlayCommand::Quests => print_quests(&engine.view()),
            PlayCommand::Flags => print_flags(&engine),
            PlayCommand::Log => {
                echo(engine.session().chronicle.lines());
                println!();
                continue;
            }
            PlayCommand::Codex => print_codex(&engine),
            PlayCommand::Save { path } => {
                engine.request_save(path.as_deref().unwrap_or(save_path));
            }
            PlayCommand::Load { path } => {
                if engine.request_load(path.as_deref().unwrap_or(save_path)) {
                    force = true;
                }
            }
            PlayCommand::NewGame => {
                engine.new_game();
                mark = 0;
                force = true;
            }
            PlayCommand::Help => print_help(),
            PlayCommand::Usage { usage } => hint(&format!("Usage: {usage}")),
            PlayCommand::Unknown { input } => {
                hint(&format!("I don't understand \"{input}\". Type 'help'."));
            }
        }

        echo(engine.session().chronicle.since(mark));
        screen.refresh(&engine.view(), force);
        println!();
    }

    Ok(())
}

fn use_hotspot(engine: &mut Engine, index: usize) {
    if engine.session().game_state() != GameState::FreeRoam {
        hint("Finish the conversation first.");
        return;
    }
    let count = engine.current_scene().map_or(0, |s| s.hotspots.len());
    if index >= count {
        hint(&format!("There is no hotspot {}.", index + 1));
        return;
    }
    engine.activate_hotspot(index);
    settle(engine);
}

fn choose(engine: &mut Engine, index: usize) {
    if engine.session().game_state() != GameState::Dialogue {
        hint("Nobody is talking to you.");
        return;
    }
    engine.choose(index);
    settle(engine);
}

/// Let the frame after an intent run: quest progress, then any scene fade.
fn settle(engine: &mut Engine) {
    engine.tick(0.0);
    let mut steps = 0;
    while engine.session().game_state() == GameState::Transition && steps < MAX_FADE_STEPS {
        engine.tick(STEP);
        steps += 1;
    }
}

fn wait(engine: &mut Engine, seconds: f32) {
    let seconds = seconds.clamp(0.0, MAX_WAIT);
    let steps = (seconds / STEP).floor() as u32;
    for _ in 0..steps {
        engine.tick(STEP);
    }
    engine.tick(seconds - steps as f32 * STEP);
    settle(engine);
}

/// What the player was last shown, so only changes get redrawn.
#[derive(Default)]
struct Screen {
    scene: Option<SceneId>,
    node: Option<NodeId>,
}

impl Screen {
    fn refresh(&mut self, view: &SessionView, force: bool) {
        let node = view.dialogue.as_ref().map(|d| d.node);
        if force || self.scene.as_ref() != Some(&view.scene) {
            print_scene(view);
        }
        if let Some(dialogue) = view.dialogue.as_ref().filter(|_| force || self.node != node) {
            print_dialogue(dialogue);
        }
        self.scene = Some(view.scene.clone());
        self.node = node;
    }
}

fn echo<'a>(lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        let styled = if line.starts_with("QUEST") || line.starts_with("OBJECTIVE") {
            line.green()
        } else if line.starts_with("SYSTEM SHIFT") || line.starts_with("FLAG GAINED") {
            line.cyan()
        } else if line.starts_with("CONTENT ERROR") || line.contains("FAILED") {
            line.red()
        } else if line.starts_with("LOCKED") || line.contains("WARNING") {
            line.yellow()
        } else if line.starts_with("YOU:") {
            line.bold()
        } else {
            line.normal()
        };
        println!("  {styled}");
    }
}

fn hint(message: &str) {
    println!("  {}", message.yellow());
}

fn print_scene(view: &SessionView) {
    println!();
    println!("  {}", view.flavor.bold());
    for (i, label) in view.hotspots.iter().enumerate() {
        println!("    [{}] {label}", i + 1);
    }
    if view.game_state == GameState::FreeRoam && view.player != view.target {
        println!(
            "  You stand at ({:.0}, {:.0}), heading for ({:.0}, {:.0}).",
            view.player.x, view.player.y, view.target.x, view.target.y
        );
    }
}

fn print_dialogue(dialogue: &DialogueView) {
    println!();
    println!("  {}: {}", dialogue.speaker.bold(), dialogue.line);
    for (i, choice) in dialogue.choices.iter().enumerate() {
        let text = format!("    {}) {}", i + 1, choice.text);
        if choice.unlocked {
            println!("{text}");
        } else {
            println!("{}", format!("{text} [locked]").dimmed());
        }
    }
    if let Some(left) = dialogue.countdown {
        println!("  {}", format!("Decide within {left:.1}s.").red());
    }
}

fn print_status(view: &SessionView) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec!["Composure".to_string(), view.stats.composure().to_string()]);
    table.add_row(vec!["Crew trust".to_string(), view.stats.crew_trust().to_string()]);
    table.add_row(vec!["Threat".to_string(), view.stats.threat().to_string()]);
    println!("{table}");
    println!("  {} in {}, {} flags", view.game_state, view.scene, view.flag_count);
}

fn print_quests(view: &SessionView) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Quest", "State", "Objective"]);
    for quest in &view.quests {
        table.add_row(vec![
            quest.title.clone(),
            quest.state.to_string(),
            quest.objective.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
}

fn print_flags(engine: &Engine) {
    let flags = &engine.session().flags;
    if flags.is_empty() {
        println!("  No flags yet.");
        return;
    }
    for flag in flags.iter() {
        println!("  - {flag}");
    }
}

fn print_codex(engine: &Engine) {
    let codex = &engine.content().codex;
    if codex.is_empty() {
        println!("  This world has no codex.");
        return;
    }
    for reason in &codex.reasons {
        println!("  {reason}");
    }
    if !codex.rules.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Rule", "Text"]);
        for rule in &codex.rules {
            table.add_row(vec![&rule.code, &rule.text]);
        }
        println!("{table}");
    }
    for pillar in &codex.pillars {
        println!("  * {pillar}");
    }
}

fn print_help() {
    println!("  {}", "Commands".bold());
    println!("    <n>              use hotspot n, or pick choice n in a conversation");
    println!("    use <n>          activate hotspot n");
    println!("    choose <n>       pick dialogue choice n");
    println!("    click <x> <y>    click a point in the room");
    println!("    wait [seconds]   let time pass (default 1)");
    println!("    look             describe the room again");
    println!("    status, quests, flags, log, codex");
    println!("    save [path], load [path], new, quit");
}
