use wf_core::{Chronicle, FlagSet, QuestId};

use super::{Quest, QuestState};
use crate::config::ObjectivePacing;
use crate::error::{FictionError, FictionResult};

/// The live quests of a session, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestRegistry {
    quests: Vec<Quest>,
    pacing: ObjectivePacing,
}

impl QuestRegistry {
    /// Build a registry from content quests. Every quest starts locked.
    pub fn new(quests: &[Quest], pacing: ObjectivePacing) -> Self {
        let quests = quests
            .iter()
            .cloned()
            .map(|mut q| {
                q.restore(QuestState::Locked, 0);
                q
            })
            .collect();
        Self { quests, pacing }
    }

    /// Look up a quest by id.
    pub fn get(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == id)
    }

    /// Look up a quest by id, mutably.
    pub fn get_mut(&mut self, id: &QuestId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| &q.id == id)
    }

    /// Whether a quest with this id exists.
    pub fn contains(&self, id: &QuestId) -> bool {
        self.get(id).is_some()
    }

    /// Start a quest. Returns `Ok(false)` if it was already started.
    pub fn start(&mut self, id: &QuestId, log: &mut Chronicle) -> FictionResult<bool> {
        let quest = self
            .get_mut(id)
            .ok_or_else(|| FictionError::QuestNotFound(id.clone()))?;
        Ok(quest.start(log))
    }

    /// Run one progress pass over every quest. Returns objectives cleared.
    pub fn progress_all(&mut self, flags: &FlagSet, log: &mut Chronicle) -> usize {
        let pacing = self.pacing;
        self.quests
            .iter_mut()
            .map(|q| q.progress(flags, pacing, log))
            .sum()
    }

    /// Iterate quests in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    /// Number of quests.
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    /// Whether the registry holds no quests.
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Pacing used by [`progress_all`](Self::progress_all).
    pub fn pacing(&self) -> ObjectivePacing {
        self.pacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quests() -> Vec<Quest> {
        vec![
            Quest::new("q1", "First", "")
                .with_objective("a", ["a"])
                .with_objective("b", ["b"])
                .with_objective("c", ["c", "d"]),
            Quest::new("q2", "Second", "").with_objective("b", ["b"]),
        ]
    }

    #[test]
    fn unknown_quest_is_an_error() {
        let mut reg = QuestRegistry::new(&quests(), ObjectivePacing::Cascade);
        let mut log = Chronicle::default();
        let err = reg.start(&QuestId::new("ghost"), &mut log).unwrap_err();
        assert!(matches!(err, FictionError::QuestNotFound(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn start_and_progress() {
        let mut reg = QuestRegistry::new(&quests(), ObjectivePacing::Cascade);
        let mut log = Chronicle::default();
        assert!(reg.start(&QuestId::new("q1"), &mut log).unwrap());
        assert!(!reg.start(&QuestId::new("q1"), &mut log).unwrap());

        let flags: FlagSet = ["a", "b"].into_iter().collect();
        assert_eq!(reg.progress_all(&flags, &mut log), 2);
        assert_eq!(reg.get(&QuestId::new("q2")).unwrap().state(), QuestState::Locked);
    }

    #[test]
    fn registry_resets_progress() {
        let mut source = quests();
        source[0].restore(QuestState::Completed, 3);
        let reg = QuestRegistry::new(&source, ObjectivePacing::Cascade);
        assert!(reg.iter().all(|q| q.state() == QuestState::Locked));
        assert_eq!(reg.len(), 2);
    }

    proptest! {
        #[test]
        fn progress_is_monotonic(grants in proptest::collection::vec(0usize..5, 0..20), stepwise: bool) {
            let names = ["a", "b", "c", "d", "e"];
            let pacing = if stepwise { ObjectivePacing::Stepwise } else { ObjectivePacing::Cascade };
            let mut reg = QuestRegistry::new(&quests(), pacing);
            let mut log = Chronicle::default();
            let mut flags = FlagSet::default();
            reg.start(&QuestId::new("q1"), &mut log).unwrap();

            let mut last = (QuestState::Active, 0);
            for g in grants {
                flags.insert(names[g]);
                reg.progress_all(&flags, &mut log);
                let q = reg.get(&QuestId::new("q1")).unwrap();
                let now = (q.state(), q.objective_index());
                prop_assert!(now.0 >= last.0);
                prop_assert!(now.1 >= last.1);
                prop_assert!(now.1 <= q.objectives.len());
                if now.0 == QuestState::Completed {
                    prop_assert_eq!(now.1, q.objectives.len());
                }
                last = now;
            }
        }
    }
}
