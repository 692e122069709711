//! Scenario-based integration tests for `wf-fiction`.

use std::path::Path;

use wf_core::{CommandState, GameState, NodeId, Position, QuestId, SceneId};
use wf_fiction::choice::{self, ChoiceOutcome};
use wf_fiction::save;
use wf_fiction::{
    ContentRegistry, Engine, EngineConfig, ObjectivePacing, Quest, QuestState, Scene, SessionState,
};

fn engine() -> Engine {
    Engine::new(ContentRegistry::worldforge(), EngineConfig::default()).unwrap()
}

fn quest_progress(session: &SessionState, id: &str) -> (QuestState, usize) {
    let quest = session.quests.get(&QuestId::new(id)).unwrap();
    (quest.state(), quest.objective_index())
}

#[test]
fn scenario_a_silent_scan() {
    let mut e = engine();
    e.activate_hotspot(0);
    let outcome = e.choose(0).unwrap();

    assert_eq!(outcome, ChoiceOutcome::Chosen { next: Some(NodeId(2)) });
    assert_eq!(e.session().stats, CommandState::new(64, 58, 24));
    assert_eq!(e.session().active_node(), Some(NodeId(2)));
    assert_eq!(e.session().chronicle.count_prefixed("SYSTEM SHIFT // "), 1);
}

#[test]
fn scenario_b_locked_beacon() {
    let mut e = engine();
    e.session_mut().scene = SceneId::new("abyss_archive");
    e.activate_hotspot(1);
    let stats = e.session().stats;
    let flags = e.session().flags.len();

    assert_eq!(e.choose(0), Some(ChoiceOutcome::Locked));
    assert_eq!(e.session().stats, stats);
    assert_eq!(e.session().flags.len(), flags);
    assert_eq!(e.session().chronicle.count_prefixed("LOCKED CHOICE"), 1);
    assert_eq!(e.session().game_state(), GameState::Dialogue);
}

#[test]
fn scenario_c_stepwise_objectives() {
    let content = ContentRegistry::worldforge();
    let config = EngineConfig::default().with_objective_pacing(ObjectivePacing::Stepwise);
    let mut s = SessionState::new(&content, &config);
    s.grant_flag("trace_marked");

    s.quests
        .start(&QuestId::new("null_bell_protocol"), &mut s.chronicle)
        .unwrap();
    s.grant_flag("protocol_authorized");
    s.progress_quests();
    assert_eq!(quest_progress(&s, "null_bell_protocol"), (QuestState::Active, 1));

    s.progress_quests();
    assert_eq!(quest_progress(&s, "null_bell_protocol"), (QuestState::Active, 2));
}

#[test]
fn scenario_c_cascade_objectives() {
    let content = ContentRegistry::worldforge();
    let mut s = SessionState::new(&content, &EngineConfig::default());
    s.grant_flag("trace_marked");
    s.quests
        .start(&QuestId::new("null_bell_protocol"), &mut s.chronicle)
        .unwrap();
    s.grant_flag("protocol_authorized");
    s.progress_quests();

    assert_eq!(quest_progress(&s, "null_bell_protocol"), (QuestState::Active, 2));
    let cleared: Vec<_> = s
        .chronicle
        .lines()
        .filter(|l| l.starts_with("OBJECTIVE CLEARED"))
        .collect();
    assert_eq!(
        cleared,
        vec![
            "OBJECTIVE CLEARED // Authorize protocol at Cartography Lens.",
            "OBJECTIVE CLEARED // Investigate and mark hatch anomaly.",
        ]
    );
}

#[test]
fn scenario_d_quest_restored_by_id() {
    let mut content = ContentRegistry::worldforge();
    content
        .quests
        .push(Quest::new("q1", "Q1", "").with_objective("one", ["a"]).with_objective("two", ["x"]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("d.txt");
    let mut saved = SessionState::new(&content, &EngineConfig::default());
    saved.grant_flag("a");
    saved.grant_flag("b");
    saved.quests.start(&QuestId::new("q1"), &mut saved.chronicle).unwrap();
    saved.progress_quests();
    assert_eq!(quest_progress(&saved, "q1"), (QuestState::Active, 1));
    assert!(save::save(&path, &mut saved));

    let mut fresh = SessionState::new(&content, &EngineConfig::default());
    assert_eq!(quest_progress(&fresh, "q1"), (QuestState::Locked, 0));
    assert!(save::load(&path, &content.scenes, &mut fresh));
    assert_eq!(quest_progress(&fresh, "q1"), (QuestState::Active, 1));
    assert_eq!(fresh.flags.iter().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn scenario_e_unknown_scene_load_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("e.txt");
    std::fs::write(&path, "scene drowned_chapel\nplayer 1 2\nstats 0 0 100\nflag lockdown\n").unwrap();

    let mut e = engine();
    e.activate_hotspot(0);
    e.choose(0);
    let before = e.session().clone();

    assert!(!e.request_load(&path));
    let after = e.session();
    assert_eq!(after.scene, before.scene);
    assert_eq!(after.player, before.player);
    assert_eq!(after.stats, before.stats);
    assert_eq!(after.flags, before.flags);
    assert_eq!(after.active_node(), before.active_node());
    assert_eq!(
        after.chronicle.last(),
        Some("LOAD FAILED // scene not found in current build")
    );
}

#[test]
fn save_load_round_trip_through_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slot.txt");

    let mut e = engine();
    e.activate_hotspot(2);
    e.choose(0);
    e.click(Position::new(300.0, 600.0));
    e.tick(0.25);
    assert!(e.request_save(&path));
    let saved = e.session().clone();

    e.new_game();
    assert!(e.request_load(&path));
    let loaded = e.session();
    assert_eq!(loaded.scene, saved.scene);
    assert_eq!(loaded.player, saved.player);
    assert_eq!(loaded.target, saved.target);
    assert_eq!(loaded.stats, saved.stats);
    assert_eq!(loaded.flags, saved.flags);
    for quest in saved.quests.iter() {
        assert_eq!(
            quest_progress(loaded, quest.id.as_str()),
            (quest.state(), quest.objective_index())
        );
    }
}

#[test]
fn beacon_route_completes_signal_triangulation() {
    let mut e = engine();

    // Authorize the protocol at the Cartography Lens.
    e.activate_hotspot(3);
    e.choose(1);
    assert_eq!(quest_progress(e.session(), "null_bell_protocol"), (QuestState::Active, 1));

    // Authorizing twice is blocked.
    e.activate_hotspot(3);
    assert_eq!(e.choose(1), Some(ChoiceOutcome::Locked));
    e.choose(2);
    e.choose(1);

    e.session_mut().scene = SceneId::new("abyss_archive");
    e.activate_hotspot(1);
    assert_eq!(e.choose(0), Some(ChoiceOutcome::Chosen { next: Some(NodeId(16)) }));
    e.choose(0);
    e.choose(0);
    assert_eq!(quest_progress(e.session(), "signal_triangulation"), (QuestState::Active, 2));

    e.activate_hotspot(2);
    e.choose(2);
    e.choose(0);
    assert_eq!(quest_progress(e.session(), "signal_triangulation"), (QuestState::Completed, 3));
    assert!(e.session().chronicle.lines().any(|l| l == "QUEST COMPLETE // Signal Triangulation"));
}

#[test]
fn ambient_events_follow_flags_and_threat() {
    let mut e = engine();
    e.activate_hotspot(0);
    e.choose(0);
    e.choose(1);
    e.choose(1);
    assert!(e.session().flags.contains("silent_scan"));

    e.tick(8.0);
    assert!(e.session().flags.contains("event_hull_groan"));
    assert_eq!(e.session().stats.threat(), 26);

    e.tick(8.0);
    assert_eq!(
        e.session().chronicle.count_prefixed("AMBIENT // Hull groan"),
        1
    );
}

#[test]
fn dangling_hotspot_node_falls_back() {
    let mut content = ContentRegistry::worldforge();
    content.scenes.insert(Scene::new("control_room", "HOLLOW").with_hotspot(
        "Dead Console",
        wf_core::Rect::new(0.0, 0.0, 50.0, 50.0),
        wf_fiction::HotspotAction::Dialogue(NodeId(15)),
    ));
    let mut e = Engine::new(content, EngineConfig::default()).unwrap();
    assert!(!e.activate_hotspot(0));
    assert_eq!(e.session().game_state(), GameState::FreeRoam);
    assert_eq!(
        e.session().chronicle.last(),
        Some("CONTENT ERROR // dialogue node 15 not found")
    );
}

#[test]
fn activate_and_choose_directly() {
    let content = ContentRegistry::worldforge();
    let mut s = SessionState::new(&content, &EngineConfig::default());
    choice::activate(&content.dialogue, NodeId(7), &mut s).unwrap();
    choice::choose(&content.dialogue, NodeId(7), 0, &mut s).unwrap();
    assert_eq!(s.active_node(), Some(NodeId(8)));
    assert!(!save::load(Path::new("/nonexistent/save.txt"), &content.scenes, &mut s));
    assert_eq!(s.active_node(), Some(NodeId(8)));
}
