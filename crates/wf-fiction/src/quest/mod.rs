//! Quest state machine with ordered objectives.

mod objective;
mod registry;
mod state;

pub use objective::Objective;
pub use registry::QuestRegistry;
pub use state::QuestState;

use serde::{Deserialize, Serialize};
use wf_core::{Chronicle, FlagSet, QuestId};

use crate::config::ObjectivePacing;

/// A quest: a forward-only state machine over an ordered objective list.
///
/// Runtime progress (`state`, `objective_index`) is not part of the content
/// description and always starts at `Locked` / `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique quest id.
    pub id: QuestId,
    /// Display title.
    pub title: String,
    /// Why the quest matters.
    pub purpose: String,
    /// Objectives, cleared strictly in order.
    pub objectives: Vec<Objective>,
    #[serde(skip)]
    state: QuestState,
    #[serde(skip)]
    objective_index: usize,
}

impl Quest {
    /// Create a locked quest with no objectives.
    pub fn new(id: impl Into<QuestId>, title: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            purpose: purpose.into(),
            objectives: Vec::new(),
            state: QuestState::Locked,
            objective_index: 0,
        }
    }

    /// Append an objective cleared by any of `flags`.
    pub fn with_objective<I, S>(mut self, text: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objectives.push(Objective::new(text, flags));
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> QuestState {
        self.state
    }

    /// Index of the first objective not yet cleared.
    pub fn objective_index(&self) -> usize {
        self.objective_index
    }

    /// The objective currently being pursued, if the quest is active.
    pub fn current_objective(&self) -> Option<&Objective> {
        match self.state {
            QuestState::Active => self.objectives.get(self.objective_index),
            _ => None,
        }
    }

    /// Move from `Locked` to `Active`. Returns false for any other state.
    pub fn start(&mut self, log: &mut Chronicle) -> bool {
        if self.state != QuestState::Locked {
            return false;
        }
        self.state = QuestState::Active;
        self.objective_index = 0;
        log.push(format!("QUEST STARTED // {}", self.title));
        tracing::info!(quest = %self.id, "quest started");
        true
    }

    /// Clear satisfied objectives in order and complete the quest when none
    /// remain. Returns how many objectives were cleared.
    pub fn progress(&mut self, flags: &FlagSet, pacing: ObjectivePacing, log: &mut Chronicle) -> usize {
        if self.state != QuestState::Active {
            return 0;
        }

        let mut cleared = 0;
        while let Some(objective) = self.objectives.get(self.objective_index) {
            if !objective.is_done(flags) {
                break;
            }
            if pacing == ObjectivePacing::Stepwise && cleared == 1 {
                break;
            }
            log.push(format!("OBJECTIVE CLEARED // {}", objective.text));
            self.objective_index += 1;
            cleared += 1;
        }

        if self.objective_index >= self.objectives.len() {
            self.state = QuestState::Completed;
            log.push(format!("QUEST COMPLETE // {}", self.title));
            tracing::info!(quest = %self.id, "quest completed");
        }
        cleared
    }

    /// Overwrite progress from persisted data.
    ///
    /// The index is clamped to the objective count, and a completed quest
    /// always points past its last objective.
    pub fn restore(&mut self, state: QuestState, objective_index: usize) {
        let len = self.objectives.len();
        self.state = state;
        self.objective_index = match state {
            QuestState::Completed => len,
            _ => objective_index.min(len),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol() -> Quest {
        Quest::new("null_bell_protocol", "Null Bell Protocol", "Purpose: test.")
            .with_objective("Authorize.", ["protocol_authorized"])
            .with_objective("Mark hatch.", ["trace_marked"])
            .with_objective("Recover page.", ["journal_page"])
    }

    fn flags(names: &[&str]) -> FlagSet {
        names.iter().copied().collect()
    }

    #[test]
    fn starts_locked() {
        let q = protocol();
        assert_eq!(q.state(), QuestState::Locked);
        assert_eq!(q.objective_index(), 0);
        assert!(q.current_objective().is_none());
    }

    #[test]
    fn start_only_from_locked() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        assert!(q.start(&mut log));
        assert!(!q.start(&mut log));
        assert_eq!(log.count_prefixed("QUEST STARTED // Null Bell Protocol"), 1);
        assert_eq!(q.current_objective().map(|o| o.text.as_str()), Some("Authorize."));
    }

    #[test]
    fn locked_quest_does_not_progress() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        assert_eq!(q.progress(&flags(&["protocol_authorized"]), ObjectivePacing::Cascade, &mut log), 0);
        assert_eq!(q.objective_index(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn cascade_clears_consecutive_objectives() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        q.start(&mut log);
        let f = flags(&["protocol_authorized", "trace_marked"]);
        assert_eq!(q.progress(&f, ObjectivePacing::Cascade, &mut log), 2);
        assert_eq!(q.objective_index(), 2);
        assert_eq!(q.state(), QuestState::Active);
    }

    #[test]
    fn objectives_are_never_skipped() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        q.start(&mut log);
        let f = flags(&["trace_marked", "journal_page"]);
        assert_eq!(q.progress(&f, ObjectivePacing::Cascade, &mut log), 0);
        assert_eq!(q.objective_index(), 0);
    }

    #[test]
    fn stepwise_clears_one_per_pass() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        q.start(&mut log);
        let f = flags(&["protocol_authorized", "trace_marked"]);
        assert_eq!(q.progress(&f, ObjectivePacing::Stepwise, &mut log), 1);
        assert_eq!(q.objective_index(), 1);
        assert_eq!(q.progress(&f, ObjectivePacing::Stepwise, &mut log), 1);
        assert_eq!(q.objective_index(), 2);
    }

    #[test]
    fn completes_when_all_cleared() {
        let mut q = protocol();
        let mut log = Chronicle::default();
        q.start(&mut log);
        let f = flags(&["protocol_authorized", "trace_marked", "journal_page"]);
        q.progress(&f, ObjectivePacing::Cascade, &mut log);
        assert_eq!(q.state(), QuestState::Completed);
        assert_eq!(q.objective_index(), 3);
        assert_eq!(log.last(), Some("QUEST COMPLETE // Null Bell Protocol"));

        assert_eq!(q.progress(&f, ObjectivePacing::Cascade, &mut log), 0);
        assert_eq!(log.count_prefixed("QUEST COMPLETE"), 1);
    }

    #[test]
    fn empty_quest_completes_on_first_pass() {
        let mut q = Quest::new("empty", "Empty", "");
        let mut log = Chronicle::default();
        q.start(&mut log);
        q.progress(&FlagSet::default(), ObjectivePacing::Cascade, &mut log);
        assert_eq!(q.state(), QuestState::Completed);
    }

    #[test]
    fn restore_clamps_index() {
        let mut q = protocol();
        q.restore(QuestState::Active, 99);
        assert_eq!(q.objective_index(), 3);
        q.restore(QuestState::Completed, 0);
        assert_eq!(q.objective_index(), 3);
        q.restore(QuestState::Locked, 1);
        assert_eq!((q.state(), q.objective_index()), (QuestState::Locked, 1));
    }

    #[test]
    fn runtime_progress_not_serialized() {
        let mut q = protocol();
        q.restore(QuestState::Active, 2);
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("objective_index"));
        let back: Quest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state(), QuestState::Locked);
        assert_eq!(back.objectives.len(), 3);
    }
}
