//! Flat-text session persistence.
//!
//! A save file holds the scene, the two positions, the stats, one line per
//! flag, and one line per quest:
//!
//! ```text
//! scene control_room
//! player 820 500
//! target 820 500
//! stats 64 58 24
//! flag silent_scan
//! quest null_bell_protocol active 1
//! ```
//!
//! Loading stages the whole file first and only commits when the scene is
//! known to the current content, so a failed load never touches the session.

mod format;
mod snapshot;

pub use format::{IssueKind, LineIssue, Record, parse_line};
pub use snapshot::{QuestProgress, Snapshot};

use std::path::Path;

use crate::content::SceneTable;
use crate::error::{FictionError, FictionResult};
use crate::session::SessionState;

/// Where hosts save when no path is given.
pub const DEFAULT_SAVE_PATH: &str = "worldforge_save.txt";

/// Write the session to `path`, truncating any existing file.
pub fn write_snapshot(path: &Path, session: &SessionState) -> FictionResult<()> {
    let text = Snapshot::capture(session).encode();
    std::fs::write(path, text).map_err(|source| FictionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and decode a save file without touching any session.
///
/// Only I/O failures are errors; undecodable lines end up in
/// [`Snapshot::issues`].
pub fn read_snapshot(path: &Path, base: &SessionState) -> FictionResult<Snapshot> {
    let bytes = std::fs::read(path).map_err(|source| FictionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Snapshot::decode_bytes(&bytes, base))
}

/// Save and report the outcome in the chronicle.
pub fn save(path: &Path, session: &mut SessionState) -> bool {
    match write_snapshot(path, session) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "session saved");
            session.log(format!("SAVE COMPLETE // {}", path.display()));
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "save failed");
            session.log("SAVE FAILED // cannot write snapshot");
            false
        }
    }
}

/// Load into `session` if the saved scene is registered in `scenes`.
///
/// Skipped lines are logged as warnings. On failure the session is left
/// exactly as it was apart from the chronicle.
pub fn load(path: &Path, scenes: &SceneTable, session: &mut SessionState) -> bool {
    let snapshot = match read_snapshot(path, session) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(error = %err, "load failed");
            session.log("LOAD FAILED // save file missing");
            return false;
        }
    };

    for issue in &snapshot.issues {
        session.log(format!("LOAD WARNING // {issue}"));
    }

    if !scenes.contains(&snapshot.scene) {
        tracing::warn!(scene = %snapshot.scene, "save names an unknown scene");
        session.log("LOAD FAILED // scene not found in current build");
        return false;
    }

    snapshot.apply(session);
    tracing::info!(path = %path.display(), "session loaded");
    session.log("LOAD COMPLETE // command snapshot restored");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::content::ContentRegistry;
    use crate::quest::QuestState;
    use proptest::prelude::*;
    use wf_core::{CommandState, Position, QuestId};

    fn fresh(content: &ContentRegistry) -> SessionState {
        SessionState::new(content, &EngineConfig::default())
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.txt");
        let content = ContentRegistry::worldforge();

        let mut original = fresh(&content);
        original.scene = "abyss_archive".into();
        original.player = Position::new(214.0, 514.5);
        original.stats = CommandState::new(12, 99, 71);
        original.grant_flag("protocol_authorized");
        original.grant_flag("trace_marked");
        original
            .quests
            .start(&QuestId::new("null_bell_protocol"), &mut original.chronicle)
            .unwrap();
        original.progress_quests();

        assert!(save(&path, &mut original));
        assert_eq!(
            original.chronicle.last().map(str::to_owned),
            Some(format!("SAVE COMPLETE // {}", path.display()))
        );

        let mut restored = fresh(&content);
        assert!(load(&path, &content.scenes, &mut restored));
        assert_eq!(restored.scene, original.scene);
        assert_eq!(restored.player, original.player);
        assert_eq!(restored.stats, original.stats);
        assert_eq!(restored.flags, original.flags);
        for quest in original.quests.iter() {
            let back = restored.quests.get(&quest.id).unwrap();
            assert_eq!(
                (back.state(), back.objective_index()),
                (quest.state(), quest.objective_index())
            );
        }
        assert_eq!(restored.chronicle.last(), Some("LOAD COMPLETE // command snapshot restored"));

        let again = dir.path().join("again.txt");
        write_snapshot(&again, &restored).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            std::fs::read_to_string(&again).unwrap()
        );
    }

    #[test]
    fn unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentRegistry::worldforge();
        let mut s = fresh(&content);
        assert!(!save(&dir.path().join("missing/slot.txt"), &mut s));
        assert_eq!(s.chronicle.last(), Some("SAVE FAILED // cannot write snapshot"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentRegistry::worldforge();
        let mut s = fresh(&content);
        assert!(!load(&dir.path().join("nothing.txt"), &content.scenes, &mut s));
        assert_eq!(s.chronicle.last(), Some("LOAD FAILED // save file missing"));
    }

    #[test]
    fn unknown_scene_leaves_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.txt");
        std::fs::write(&path, "scene surface_dock\nstats 1 1 1\nflag a\nbogus\n").unwrap();
        let content = ContentRegistry::worldforge();
        let mut s = fresh(&content);
        s.grant_flag("lockdown");
        let before = (s.scene.clone(), s.stats, s.flags.clone());

        assert!(!load(&path, &content.scenes, &mut s));
        assert_eq!((s.scene.clone(), s.stats, s.flags.clone()), before);
        let tail: Vec<_> = s.chronicle.lines().rev().take(2).collect();
        assert_eq!(
            tail,
            vec![
                "LOAD FAILED // scene not found in current build",
                "LOAD WARNING // unknown token at line 4",
            ]
        );
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.txt");
        let mut bytes = b"scene engine_corridor\nstats 70 20 10\nflag bad".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"\nflag ok\n");
        std::fs::write(&path, bytes).unwrap();

        let content = ContentRegistry::worldforge();
        let mut s = fresh(&content);
        assert!(load(&path, &content.scenes, &mut s));
        assert_eq!(s.scene, "engine_corridor");
        assert_eq!(s.stats, CommandState::new(70, 20, 10));
        assert!(s.flags.contains("ok"));
        assert_eq!(s.flags.len(), 1);
        let tail: Vec<_> = s.chronicle.lines().rev().take(2).collect();
        assert_eq!(
            tail,
            vec![
                "LOAD COMPLETE // command snapshot restored",
                "LOAD WARNING // malformed record at line 3",
            ]
        );
    }

    #[test]
    fn completed_quest_loads_at_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.txt");
        std::fs::write(&path, "scene control_room\nquest signal_triangulation completed 0\n").unwrap();
        let content = ContentRegistry::worldforge();
        let mut s = fresh(&content);
        assert!(load(&path, &content.scenes, &mut s));
        let quest = s.quests.get(&QuestId::new("signal_triangulation")).unwrap();
        assert_eq!(quest.state(), QuestState::Completed);
        assert_eq!(quest.objective_index(), 3);
    }

    fn coord() -> impl Strategy<Value = f32> {
        -2000.0f32..2000.0
    }

    proptest! {
        #[test]
        fn generated_sessions_round_trip(
            scene in 0usize..3,
            player in (coord(), coord()),
            target in (coord(), coord()),
            stats in (-50i32..150, -50i32..150, -50i32..150),
            flags in proptest::collection::vec("[a-z_]{1,12}", 0..8),
            quests in proptest::collection::vec((0usize..3, 0usize..6), 2),
        ) {
            let content = ContentRegistry::worldforge();
            let mut original = fresh(&content);
            original.scene = content.scenes.iter().nth(scene).unwrap().id.clone();
            original.player = Position::new(player.0, player.1);
            original.target = Position::new(target.0, target.1);
            original.stats = CommandState::new(stats.0, stats.1, stats.2);
            for flag in &flags {
                original.flags.insert(flag);
            }
            let states = [QuestState::Locked, QuestState::Active, QuestState::Completed];
            let ids: Vec<_> = original.quests.iter().map(|q| q.id.clone()).collect();
            for (id, (state, index)) in ids.iter().zip(quests) {
                original.quests.get_mut(id).unwrap().restore(states[state], index);
            }

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("slot.txt");
            write_snapshot(&path, &original).unwrap();

            let mut restored = fresh(&content);
            prop_assert!(load(&path, &content.scenes, &mut restored));
            prop_assert_eq!(&restored.scene, &original.scene);
            prop_assert_eq!(restored.player, original.player);
            prop_assert_eq!(restored.target, original.target);
            prop_assert_eq!(restored.stats, original.stats);
            prop_assert_eq!(&restored.flags, &original.flags);
            for quest in original.quests.iter() {
                let back = restored.quests.get(&quest.id).unwrap();
                prop_assert_eq!(
                    (back.state(), back.objective_index()),
                    (quest.state(), quest.objective_index())
                );
            }
            prop_assert_eq!(
                restored.chronicle.last(),
                Some("LOAD COMPLETE // command snapshot restored")
            );
        }
    }
}
