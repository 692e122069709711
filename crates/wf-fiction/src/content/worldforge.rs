//! The built-in "Worldforge" slice: a drowned command vessel in three rooms.

use wf_core::{NodeId, Position, Rect, SceneId};

use super::scene::{HotspotAction, Scene, SceneTable};
use super::{Codex, ContentRegistry};
use crate::ambient::AmbientEvent;
use crate::choice::{Choice, DialogueGraph, DialogueNode};
use crate::quest::Quest;

fn go(to: &str, x: f32, y: f32) -> HotspotAction {
    HotspotAction::Transition {
        to: SceneId::new(to),
        spawn: Position::new(x, y),
    }
}

fn talk(node: u32) -> HotspotAction {
    HotspotAction::Dialogue(NodeId(node))
}

fn scenes() -> SceneTable {
    SceneTable::new()
        .with_scene(
            Scene::new(
                "control_room",
                "CONTROL ROOM // pressure stable // sonar veil oscillating",
            )
            .with_hotspot("Command Console", Rect::new(955.0, 210.0, 190.0, 150.0), talk(1))
            .with_hotspot(
                "Bulkhead Door",
                Rect::new(64.0, 250.0, 106.0, 240.0),
                go("engine_corridor", 1104.0, 418.0),
            )
            .with_hotspot("Captain's Chair", Rect::new(514.0, 500.0, 220.0, 120.0), talk(4))
            .with_hotspot("Cartography Lens", Rect::new(768.0, 395.0, 168.0, 112.0), talk(11))
            .with_hotspot(
                "Archive Lift",
                Rect::new(1220.0, 452.0, 118.0, 170.0),
                go("abyss_archive", 214.0, 514.0),
            ),
        )
        .with_scene(
            Scene::new(
                "engine_corridor",
                "ENGINE CORRIDOR // emergency strips active // heat anomalies +2",
            )
            .with_hotspot(
                "Return to Control",
                Rect::new(1180.0, 260.0, 122.0, 220.0),
                go("control_room", 210.0, 420.0),
            )
            .with_hotspot("Maintenance Hatch", Rect::new(346.0, 264.0, 260.0, 168.0), talk(7))
            .with_hotspot("Crew Journal", Rect::new(640.0, 476.0, 192.0, 134.0), talk(10))
            .with_hotspot(
                "Archive Valve",
                Rect::new(94.0, 458.0, 138.0, 180.0),
                go("abyss_archive", 1020.0, 520.0),
            ),
        )
        .with_scene(
            Scene::new(
                "abyss_archive",
                "ABYSS ARCHIVE // lumen algae breathing // bell core synchronized",
            )
            .with_hotspot(
                "Return Corridor",
                Rect::new(102.0, 252.0, 118.0, 236.0),
                go("engine_corridor", 1084.0, 436.0),
            )
            .with_hotspot("Reliquary Bell", Rect::new(560.0, 250.0, 250.0, 214.0), talk(13))
            .with_hotspot("Rule Tablet", Rect::new(960.0, 420.0, 220.0, 160.0), talk(14)),
        )
}

fn bridge_nodes(graph: DialogueGraph) -> DialogueGraph {
    graph
        .with_node(
            1,
            DialogueNode::new("Ops AI", "Captain, sonar catches movement around the hull. Your order?")
                .with_choice(
                    Choice::new("Run a silent scan.")
                        .with_goto(2)
                        .with_flag("silent_scan")
                        .with_impact(4, 3, -6)
                        .with_consequence("Silent protocol stabilizes the crew feed."),
                )
                .with_choice(
                    Choice::new("Ping active sonar for certainty.")
                        .with_goto(3)
                        .with_flag("loud_scan")
                        .with_impact(-5, -2, 12)
                        .with_consequence("The ping echoes louder than expected across the hull."),
                )
                .with_choice(
                    Choice::new("Ignore it. Keep us dark.")
                        .with_flag("stay_dark")
                        .with_impact(-2, -4, 5)
                        .with_consequence("Crew channels fill with unresolved tension."),
                ),
        )
        .with_node(
            2,
            DialogueNode::new(
                "Ops AI",
                "Silent sweep complete. Heat signatures are fragmented, like memory pieces.",
            )
            .with_choice(Choice::new("Log threat and alert security.").with_flag("prep_security"))
            .with_choice(Choice::new("Open channel to crew deck.").with_goto(5)),
        )
        .with_node(
            3,
            DialogueNode::new("Ops AI", "Active ping echoed back. Response pattern was not mechanical.")
                .with_choice(
                    Choice::new("Seal all doors and run lockdown.")
                        .with_goto(6)
                        .with_flag("lockdown")
                        .with_impact(-1, 6, -4)
                        .with_consequence("Bulkhead integrity increases, crew compliance rises."),
                )
                .with_choice(
                    Choice::new("Keep pinging. I want a map.")
                        .with_flag("echo_mapping")
                        .with_impact(-4, -3, 8)
                        .with_consequence("Echo turbulence escalates outside the corridor grid."),
                ),
        )
        .with_node(
            4,
            DialogueNode::new("Inner Voice", "The chair is warm. Whoever left knew they would not return.")
                .with_choice(Choice::new("Sit for thirty seconds.").with_flag("memory_echo"))
                .with_choice(Choice::new("Step away before it speaks.").with_flag("refused_echo")),
        )
        .with_node(
            5,
            DialogueNode::new("Deck Chief", "Crew hears metal scratching in the vents. They want orders.")
                .with_choice(Choice::new("Arm all teams and pair up.").with_flag("crew_armed"))
                .with_choice(Choice::new("No panic. Hold position.").with_flag("crew_calm")),
        )
        .with_node(
            6,
            DialogueNode::new(
                "System",
                "LOCKDOWN INITIATED // Two forward seals reported partial closure.",
            )
            .with_choice(Choice::new("Route power into magnetic rails.").with_flag("reroute_power")),
        )
}

fn corridor_nodes(graph: DialogueGraph) -> DialogueGraph {
    graph
        .with_node(
            7,
            DialogueNode::new(
                "Mechanic",
                "Hatch wheel is stuck. Rust explains one thing, breathing explains another.",
            )
            .with_choice(
                Choice::new("Force it open.")
                    .with_goto(8)
                    .with_flag("force_hatch")
                    .with_impact(-4, -2, 10)
                    .with_consequence("Mechanical stress spikes near the hatch seam."),
            )
            .with_choice(
                Choice::new("Leave it sealed for now.")
                    .with_flag("hatch_delayed")
                    .with_impact(2, 1, -2)
                    .with_consequence("Delay buys stability but curiosity keeps rising."),
            ),
        )
        .with_node(
            8,
            DialogueNode::new(
                "Narrator",
                "The hatch opens two centimeters. Warm air exhales like a sleeping throat.",
            )
            .with_choice(Choice::new("Shine a light inside.").with_goto(9).with_flag("light_check"))
            .with_choice(Choice::new("Close it now.").with_flag("hatch_resealed")),
        )
        .with_node(
            9,
            DialogueNode::new(
                "Narrator",
                "Wet footprints continue inward, then stop mid-corridor with no turn.",
            )
            .with_choice(
                Choice::new("Mark anomaly and map path vectors.")
                    .with_flag("trace_marked")
                    .with_impact(2, 3, -1)
                    .with_consequence("Forensic trail logged into tactical routing."),
            ),
        )
        .with_node(
            10,
            DialogueNode::new(
                "Journal",
                "'Day 41. Hidden chamber appears when pressure bells align. Ringing can call rescue or predators.'",
            )
            .with_choice(Choice::new("Take torn blueprint page.").with_flag("journal_page"))
            .with_choice(Choice::new("Memorize entry and leave.").with_flag("journal_memorized")),
        )
}

fn charter_nodes(graph: DialogueGraph) -> DialogueGraph {
    graph
        .with_node(
            11,
            DialogueNode::new(
                "Cartographer",
                "Worldforge Charter awaiting command: review doctrine or authorize protocol.",
            )
            .with_choice(Choice::new("Read founding reasons.").with_goto(12))
            .with_choice(
                Choice::new("Authorize Null Bell Protocol.")
                    .with_flag("protocol_authorized")
                    .with_block("protocol_authorized")
                    .with_quest("null_bell_protocol")
                    .with_impact(-2, 5, 6)
                    .with_consequence("Protocol armed. Command burden increases."),
            )
            .with_choice(Choice::new("Show world rules.").with_goto(14)),
        )
        .with_node(
            12,
            DialogueNode::new(
                "Cartographer",
                "Founding reasons: preserve drowned memory, map hostile currents, forge command identity under pressure.",
            )
            .with_choice(Choice::new("Commit doctrine to command log.").with_flag("reasons_logged"))
            .with_choice(Choice::new("Then list world rules.").with_goto(14))
            .with_choice(Choice::new("Return to duty.")),
        )
        .with_node(
            13,
            DialogueNode::new(
                "Reliquary Bell",
                "The brass core hums with distant lungs. One strike broadcasts your position across the trench.",
            )
            .with_choice(
                Choice::new("Strike once and transmit beacon.")
                    .with_goto(16)
                    .with_flag("beacon_broadcast")
                    .with_requirement("protocol_authorized")
                    .with_quest("signal_triangulation")
                    .with_impact(-3, -1, 16)
                    .with_consequence("Beacon flare confirms your location to unknown listeners."),
            )
            .with_choice(
                Choice::new("Stay silent and profile resonance.")
                    .with_flag("bell_profiled")
                    .with_impact(3, 2, -3)
                    .with_consequence("Spectral profile captured with minimal exposure."),
            )
            .with_choice(
                Choice::new("Leave it untouched.")
                    .with_flag("bell_ignored")
                    .with_impact(1, -1, -1)
                    .with_consequence("Silence preserved, but actionable data remains low."),
            ),
        )
        .with_node(
            14,
            DialogueNode::new(
                "Archivist Tablet",
                "Rules: never ping twice, never open two hatches, never name the unknown, never waste heat, never flood with light.",
            )
            .with_choice(Choice::new("Seal rules into doctrine.").with_flag("world_rules_logged"))
            .with_choice(Choice::new("Understood. Move."))
            .with_choice(
                Choice::new("Run triangulation protocol on received signal.")
                    .with_goto(18)
                    .with_requirement("beacon_broadcast")
                    .with_impact(0, 2, 4)
                    .with_consequence("Archive math routes the foreign signal through old trench maps."),
            ),
        )
}

fn signal_nodes(graph: DialogueGraph) -> DialogueGraph {
    graph
        .with_node(
            16,
            DialogueNode::new(
                "System",
                "Beacon pulse sent. External reply arrived in 4.2 seconds from an unmapped source.",
            )
            .with_choice(
                Choice::new("Prepare to receive unknown contact.")
                    .with_goto(17)
                    .with_flag("prepare_contact")
                    .with_impact(-1, 1, 6)
                    .with_consequence("Open channel. An unknown cadence enters command audio."),
            )
            .with_choice(
                Choice::new("Cut exterior lights and wait.")
                    .with_flag("exterior_dark")
                    .with_impact(2, 0, -2)
                    .with_consequence("Exterior profile minimized; signal remains faint."),
            ),
        )
        .with_node(
            17,
            DialogueNode::new("Unknown Contact", "Designation requested. Provide protocol identity.")
                .with_choice(
                    Choice::new("Respond with numeric protocol only.")
                        .with_flag("contact_tagged")
                        .with_impact(2, 3, -1)
                        .with_consequence("Contact accepts numbered format and pauses."),
                )
                .with_choice(
                    Choice::new("Use crew names to establish trust.")
                        .with_flag("rule_break_name")
                        .with_impact(-4, 1, 10)
                        .with_consequence("Rule break logged. Contact audio sharpens."),
                )
                .with_choice(
                    Choice::new("Terminate channel immediately.")
                        .with_flag("channel_terminated")
                        .with_impact(1, -3, -3)
                        .with_consequence("Channel killed before identity exchange."),
                ),
        )
        .with_node(
            18,
            DialogueNode::new(
                "Triangulation Console",
                "Signal overlays reveal three impossible source points in one chamber.",
            )
            .with_choice(
                Choice::new("Tag all three sources as mirrored echo.")
                    .with_flag("triangulation_done")
                    .with_impact(1, 2, 1)
                    .with_consequence("Map layer updated: mirrored echo geometry confirmed."),
            )
            .with_choice(
                Choice::new("Discard data as sensor corruption.")
                    .with_flag("triangulation_discarded")
                    .with_impact(-2, -2, 3)
                    .with_consequence("Archive marks data unreliable. Crew disputes decision."),
            ),
        )
}

fn quests() -> Vec<Quest> {
    vec![
        Quest::new(
            "null_bell_protocol",
            "Null Bell Protocol",
            "Purpose: Decide whether humanity survives by silence or by signal.",
        )
        .with_objective("Authorize protocol at Cartography Lens.", ["protocol_authorized"])
        .with_objective("Investigate and mark hatch anomaly.", ["trace_marked"])
        .with_objective("Recover hidden blueprint fragment.", ["journal_page"])
        .with_objective("Commit strategy: lockdown or beacon.", ["lockdown", "beacon_broadcast"]),
        Quest::new(
            "signal_triangulation",
            "Signal Triangulation",
            "Purpose: Verify whether the reply is a rescue channel, mirrored echo, or hostile lure.",
        )
        .with_objective("Broadcast one sanctioned beacon pulse.", ["beacon_broadcast"])
        .with_objective(
            "Stabilize unknown-contact exchange.",
            ["contact_tagged", "channel_terminated"],
        )
        .with_objective(
            "Resolve triangulation inference in archive.",
            ["triangulation_done", "triangulation_discarded"],
        ),
    ]
}

fn ambient() -> Vec<AmbientEvent> {
    vec![
        AmbientEvent::new("hull_groan", "AMBIENT // Hull groan translated as low-frequency speech.")
            .requires("silent_scan")
            .grants("event_hull_groan")
            .min_threat(10),
        AmbientEvent::new("crew_prayer", "CREW FEED // Prayer loops detected in lower deck comms.")
            .requires("protocol_authorized")
            .grants("event_crew_prayer")
            .min_threat(20),
        AmbientEvent::new("cold_spike", "SENSOR // Sudden cold pocket intersects mapped corridor.")
            .requires("trace_marked")
            .grants("event_cold_spike")
            .min_threat(25),
        AmbientEvent::new("echo_shift", "SONAR // Returning echo now matches partial crew cadence.")
            .requires("beacon_broadcast")
            .grants("event_echo_shift")
            .min_threat(35),
    ]
}

fn codex() -> Codex {
    Codex::default()
        .with_reason("1. Preserve collective memory after surface data collapse.")
        .with_reason("2. Translate abyss signals into navigable command knowledge.")
        .with_reason("3. Forge leaders who stay human under pressure horror.")
        .with_rule("R1", "Never ping active sonar twice in one cycle.")
        .with_rule("R2", "Never open two sealed hatches simultaneously.")
        .with_rule("R3", "Unknown voices receive numbers, never names.")
        .with_rule("R4", "Heat is evidence; cold zones require confirmation.")
        .with_rule("R5", "Light is bait. Illuminate only what you must.")
        .with_rule("R6", "Every breach report is true until disproven.")
        .with_pillar("A. Rust Cathedral Geometry: sacred framing in industrial steel.")
        .with_pillar("B. Cyan vs Amber Lighting: bioluminescent cold against human warmth.")
        .with_pillar("C. Compression Horror: narrow corridors then abyssal volume reveal.")
        .with_pillar("D. Analog Imperfection: grain, scanlines, slight signal instability.")
        .with_pillar("E. Story-through-machines: every console acts as a character.")
}

pub(super) fn build() -> ContentRegistry {
    let dialogue = signal_nodes(charter_nodes(corridor_nodes(bridge_nodes(DialogueGraph::new()))));
    ContentRegistry {
        title: "Worldforge".to_string(),
        start_scene: SceneId::new("control_room"),
        start_position: Position::new(820.0, 500.0),
        opening_line: "WORLD READY // Doctrine loaded".to_string(),
        scenes: scenes(),
        dialogue,
        quests: quests(),
        ambient: ambient(),
        codex: codex(),
    }
}
