//! One record per line: `<key> <field>...`, whitespace-delimited.

use std::fmt;
use std::str::FromStr;

use wf_core::{Position, QuestId, SceneId};

use crate::quest::QuestState;

/// A decoded save-file line.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `scene <id>`
    Scene(SceneId),
    /// `player <x> <y>`
    Player(Position),
    /// `target <x> <y>`
    Target(Position),
    /// `stats <composure> <crew_trust> <threat>`
    Stats(i32, i32, i32),
    /// `flag <name>`
    Flag(String),
    /// `quest <id> <locked|active|completed> <objective_index>`
    Quest {
        /// Quest id.
        id: QuestId,
        /// Lifecycle state.
        state: QuestState,
        /// Objective index.
        index: usize,
    },
}

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The key is not one this format knows.
    UnknownKey,
    /// The key is known but its fields are not.
    Malformed,
}

/// A skipped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineIssue {
    /// One-based line number.
    pub line: usize,
    /// What was wrong.
    pub kind: IssueKind,
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::UnknownKey => write!(f, "unknown token at line {}", self.line),
            IssueKind::Malformed => write!(f, "malformed record at line {}", self.line),
        }
    }
}

fn num<T: FromStr>(field: &str) -> Option<T> {
    field.parse().ok()
}

fn position(x: &str, y: &str) -> Option<Position> {
    let p = Position::new(num(x)?, num(y)?);
    p.is_finite().then_some(p)
}

fn stats(composure: &str, crew_trust: &str, threat: &str) -> Option<Record> {
    Some(Record::Stats(num(composure)?, num(crew_trust)?, num(threat)?))
}

fn decode(fields: &[&str]) -> Result<Record, IssueKind> {
    let record = match fields {
        ["scene", id] => Some(Record::Scene(SceneId::new(*id))),
        ["player", x, y] => position(x, y).map(Record::Player),
        ["target", x, y] => position(x, y).map(Record::Target),
        ["stats", c, t, th] => stats(c, t, th),
        ["flag", name] => Some(Record::Flag((*name).to_string())),
        ["quest", id, state, index] => QuestState::from_token(state).and_then(|state| {
            Some(Record::Quest {
                id: QuestId::new(*id),
                state,
                index: num(index)?,
            })
        }),
        ["scene" | "player" | "target" | "stats" | "flag" | "quest", ..] => None,
        _ => return Err(IssueKind::UnknownKey),
    };
    record.ok_or(IssueKind::Malformed)
}

/// Decode one line. Blank lines yield `Ok(None)`.
pub fn parse_line(number: usize, text: &str) -> Result<Option<Record>, LineIssue> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    decode(&fields)
        .map(Some)
        .map_err(|kind| LineIssue { line: number, kind })
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(id) => write!(f, "scene {id}"),
            Self::Player(p) => write!(f, "player {} {}", p.x, p.y),
            Self::Target(p) => write!(f, "target {} {}", p.x, p.y),
            Self::Stats(c, t, th) => write!(f, "stats {c} {t} {th}"),
            Self::Flag(name) => write!(f, "flag {name}"),
            Self::Quest { id, state, index } => {
                write!(f, "quest {id} {} {index}", state.token())
            }
        }
    }
}
