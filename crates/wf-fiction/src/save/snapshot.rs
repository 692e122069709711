use wf_core::{CommandState, FlagSet, Position, QuestId, SceneId};

use super::format::{IssueKind, LineIssue, Record, parse_line};
use crate::quest::QuestState;
use crate::session::SessionState;

/// Persisted progress of one quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestProgress {
    /// Quest id.
    pub id: QuestId,
    /// Lifecycle state.
    pub state: QuestState,
    /// Objective index as written.
    pub index: usize,
}

/// A staging copy of everything a save file holds.
///
/// Decoding never touches the live session; [`apply`](Self::apply) commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Scene id.
    pub scene: SceneId,
    /// Player position.
    pub player: Position,
    /// Walk target.
    pub target: Position,
    /// Command stats, clamped.
    pub stats: CommandState,
    /// Granted flags.
    pub flags: FlagSet,
    /// Quest progress in file order.
    pub quests: Vec<QuestProgress>,
    /// Lines that were skipped while decoding.
    pub issues: Vec<LineIssue>,
}

impl Snapshot {
    /// Capture the persistent part of a live session.
    pub fn capture(session: &SessionState) -> Self {
        Self {
            scene: session.scene.clone(),
            player: session.player,
            target: session.target,
            stats: session.stats,
            flags: session.flags.clone(),
            quests: session
                .quests
                .iter()
                .map(|q| QuestProgress {
                    id: q.id.clone(),
                    state: q.state(),
                    index: q.objective_index(),
                })
                .collect(),
            issues: Vec::new(),
        }
    }

    /// Decode save-file text.
    ///
    /// Scene, positions, and stats default to `base` when the file omits
    /// them; flags and quests start empty.
    pub fn decode(text: &str, base: &SessionState) -> Self {
        Self::decode_lines(text.lines().map(Some), base)
    }

    /// Decode raw save-file bytes.
    ///
    /// A line that is not valid UTF-8 is skipped as malformed; the rest of
    /// the file is still read.
    pub fn decode_bytes(bytes: &[u8], base: &SessionState) -> Self {
        let lines = bytes
            .split(|b| *b == b'\n')
            .map(|line| std::str::from_utf8(line).ok());
        Self::decode_lines(lines, base)
    }

    fn decode_lines<'a>(
        lines: impl Iterator<Item = Option<&'a str>>,
        base: &SessionState,
    ) -> Self {
        let mut snapshot = Self {
            flags: FlagSet::new(),
            quests: Vec::new(),
            ..Self::capture(base)
        };
        for (i, line) in lines.enumerate() {
            let parsed = match line {
                Some(text) => parse_line(i + 1, text),
                None => Err(LineIssue {
                    line: i + 1,
                    kind: IssueKind::Malformed,
                }),
            };
            match parsed {
                Ok(Some(record)) => snapshot.stage(record),
                Ok(None) => {}
                Err(issue) => {
                    tracing::warn!(line = issue.line, kind = ?issue.kind, "skipped save line");
                    snapshot.issues.push(issue);
                }
            }
        }
        snapshot
    }

    fn stage(&mut self, record: Record) {
        match record {
            Record::Scene(id) => self.scene = id,
            Record::Player(p) => self.player = p,
            Record::Target(p) => self.target = p,
            Record::Stats(c, t, th) => self.stats = CommandState::new(c, t, th),
            Record::Flag(name) => {
                self.flags.insert(&name);
            }
            Record::Quest { id, state, index } => {
                self.quests.retain(|q| q.id != id);
                self.quests.push(QuestProgress { id, state, index });
            }
        }
    }

    /// Encode as save-file text.
    pub fn encode(&self) -> String {
        let mut records = vec![
            Record::Scene(self.scene.clone()),
            Record::Player(self.player),
            Record::Target(self.target),
            Record::Stats(
                self.stats.composure(),
                self.stats.crew_trust(),
                self.stats.threat(),
            ),
        ];
        records.extend(self.flags.iter().map(|f| Record::Flag(f.to_string())));
        records.extend(self.quests.iter().map(|q| Record::Quest {
            id: q.id.clone(),
            state: q.state,
            index: q.index,
        }));

        let mut out = String::new();
        for record in records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Commit to a live session and return it to free roam.
    ///
    /// Quests are matched by id; progress for unknown quests is dropped and
    /// quests absent from the snapshot keep their live state.
    pub fn apply(self, session: &mut SessionState) {
        session.scene = self.scene;
        session.player = self.player;
        session.target = self.target;
        session.stats = self.stats;
        session.flags = self.flags;
        for progress in self.quests {
            match session.quests.get_mut(&progress.id) {
                Some(quest) => quest.restore(progress.state, progress.index),
                None => tracing::debug!(quest = %progress.id, "dropping unknown quest from save"),
            }
        }
        session.return_to_free_roam();
    }
}
