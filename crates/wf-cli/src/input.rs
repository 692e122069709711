//! Parsing of typed play commands.

use std::path::PathBuf;

/// A parsed play command.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayCommand {
    /// Describe the scene and any open dialogue.
    Look,
    /// A bare number: a hotspot in free roam, a choice in dialogue.
    Number(usize),
    /// Activate a hotspot (zero-based).
    Hotspot(usize),
    /// Pick a dialogue choice (zero-based).
    Choose(usize),
    /// Click at a world position.
    Click {
        /// Horizontal coordinate.
        x: f32,
        /// Vertical coordinate.
        y: f32,
    },
    /// Let time pass.
    Wait {
        /// Seconds to advance.
        seconds: f32,
    },
    /// Show command stats.
    Status,
    /// Show quest progress.
    Quests,
    /// Show earned flags.
    Flags,
    /// Show the whole chronicle.
    Log,
    /// Show the world rules.
    Codex,
    /// Save to a file, or the session's save file.
    Save {
        /// Explicit path.
        path: Option<PathBuf>,
    },
    /// Load from a file, or the session's save file.
    Load {
        /// Explicit path.
        path: Option<PathBuf>,
    },
    /// Start over.
    NewGame,
    /// Show help.
    Help,
    /// Leave the game.
    Quit,
    /// A recognised verb with a bad argument.
    Usage {
        /// How the verb is used.
        usage: &'static str,
    },
    /// Unknown command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// Seconds passed by a bare `wait`.
pub const DEFAULT_WAIT: f32 = 1.0;
/// Longest single `wait`, in seconds.
pub const MAX_WAIT: f32 = 600.0;

const HOTSPOT_VERBS: &[&str] = &["use", "go", "touch", "interact", "activate"];
const CHOOSE_VERBS: &[&str] = &["choose", "pick", "say", "answer", "c"];
const LOOK_VERBS: &[&str] = &["look", "l", "examine", "x", "scene"];
const WAIT_VERBS: &[&str] = &["wait", "tick", "z"];
const STATUS_VERBS: &[&str] = &["status", "stats", "st"];
const QUEST_VERBS: &[&str] = &["quests", "quest", "objectives", "j"];
const CODEX_VERBS: &[&str] = &["codex", "rules", "doctrine"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit", "bye"];

/// Parse one line of player input.
///
/// Numbers are typed one-based and returned zero-based. An empty line
/// looks around.
pub fn parse_command(input: &str) -> PlayCommand {
    let input = input.trim();
    if input.is_empty() {
        return PlayCommand::Look;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let rest = words.get(1..).unwrap_or(&[]);

    if let Some(n) = ordinal(&verb) {
        return PlayCommand::Number(n);
    }

    let verb = verb.as_str();
    if HOTSPOT_VERBS.contains(&verb) {
        return numbered(rest, PlayCommand::Hotspot, "use <hotspot number>");
    }
    if CHOOSE_VERBS.contains(&verb) {
        return numbered(rest, PlayCommand::Choose, "choose <choice number>");
    }
    if LOOK_VERBS.contains(&verb) {
        return PlayCommand::Look;
    }
    if WAIT_VERBS.contains(&verb) {
        return parse_wait(rest);
    }
    if STATUS_VERBS.contains(&verb) {
        return PlayCommand::Status;
    }
    if QUEST_VERBS.contains(&verb) {
        return PlayCommand::Quests;
    }
    if CODEX_VERBS.contains(&verb) {
        return PlayCommand::Codex;
    }
    if HELP_VERBS.contains(&verb) {
        return PlayCommand::Help;
    }
    if QUIT_VERBS.contains(&verb) {
        return PlayCommand::Quit;
    }

    match verb {
        "click" => parse_click(rest),
        "flags" => PlayCommand::Flags,
        "log" | "chronicle" => PlayCommand::Log,
        "save" => PlayCommand::Save { path: path(rest) },
        "load" | "restore" => PlayCommand::Load { path: path(rest) },
        "new" | "restart" => PlayCommand::NewGame,
        _ => PlayCommand::Unknown {
            input: input.to_string(),
        },
    }
}

fn path(rest: &[&str]) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest.join(" ")))
}

/// A one-based count typed by the player, as a zero-based index.
fn ordinal(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

fn numbered(rest: &[&str], make: fn(usize) -> PlayCommand, usage: &'static str) -> PlayCommand {
    match rest {
        [word] => ordinal(word).map_or(PlayCommand::Usage { usage }, make),
        _ => PlayCommand::Usage { usage },
    }
}

fn parse_wait(rest: &[&str]) -> PlayCommand {
    let usage = "wait [seconds, at most 600]";
    match rest {
        [] => PlayCommand::Wait {
            seconds: DEFAULT_WAIT,
        },
        [word] => match word.parse::<f32>() {
            Ok(seconds) if (0.0..=MAX_WAIT).contains(&seconds) => PlayCommand::Wait { seconds },
            _ => PlayCommand::Usage { usage },
        },
        _ => PlayCommand::Usage { usage },
    }
}

fn parse_click(rest: &[&str]) -> PlayCommand {
    let usage = "click <x> <y>";
    let [x, y] = rest else {
        return PlayCommand::Usage { usage };
    };
    match (x.parse::<f32>(), y.parse::<f32>()) {
        (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => PlayCommand::Click { x, y },
        _ => PlayCommand::Usage { usage },
    }
}
