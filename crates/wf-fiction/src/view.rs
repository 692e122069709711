//! Read-only snapshot of a session for presentation.

use wf_core::{CommandState, GameState, NodeId, Position, QuestId, SceneId};

use crate::choice::is_unlocked;
use crate::content::ContentRegistry;
use crate::quest::QuestState;
use crate::session::SessionState;

/// One selectable choice as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Choice text.
    pub text: String,
    /// Whether the choice can be taken right now.
    pub unlocked: bool,
}

/// The active dialogue node.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView {
    /// Node id.
    pub node: NodeId,
    /// Speaker name.
    pub speaker: String,
    /// Narration line.
    pub line: String,
    /// Choices in display order.
    pub choices: Vec<ChoiceView>,
    /// Seconds left before the countdown picks for the player.
    pub countdown: Option<f32>,
}

/// One quest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestView {
    /// Quest id.
    pub id: QuestId,
    /// Title.
    pub title: String,
    /// Lifecycle state.
    pub state: QuestState,
    /// Current objective text while active.
    pub objective: Option<String>,
}

/// Everything presentation needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// Current scene.
    pub scene: SceneId,
    /// Scene status text.
    pub flavor: String,
    /// Hotspot labels in declaration order.
    pub hotspots: Vec<String>,
    /// Player position.
    pub player: Position,
    /// Walk target.
    pub target: Position,
    /// Interaction state.
    pub game_state: GameState,
    /// Fade level, 0 when no transition runs.
    pub fade: f32,
    /// The open dialogue, if any.
    pub dialogue: Option<DialogueView>,
    /// Command stats.
    pub stats: CommandState,
    /// Number of granted flags.
    pub flag_count: usize,
    /// Chronicle, oldest first.
    pub chronicle: Vec<String>,
    /// Quests in declaration order.
    pub quests: Vec<QuestView>,
}

impl SessionView {
    /// Build a view of `session` against its content.
    pub fn capture(content: &ContentRegistry, session: &SessionState) -> Self {
        let scene = content.scenes.get(&session.scene);
        let dialogue = session.active_node().and_then(|id| {
            let node = content.dialogue.get(id)?;
            Some(DialogueView {
                node: id,
                speaker: node.speaker.clone(),
                line: node.line.clone(),
                choices: node
                    .choices
                    .iter()
                    .map(|c| ChoiceView {
                        text: c.text.clone(),
                        unlocked: is_unlocked(c, &session.flags),
                    })
                    .collect(),
                countdown: node
                    .timeout
                    .map(|t| (t.seconds - session.dialogue_elapsed()).max(0.0)),
            })
        });

        Self {
            scene: session.scene.clone(),
            flavor: scene.map(|s| s.flavor.clone()).unwrap_or_default(),
            hotspots: scene
                .map(|s| s.hotspots.iter().map(|h| h.label.clone()).collect())
                .unwrap_or_default(),
            player: session.player,
            target: session.target,
            game_state: session.game_state(),
            fade: session.transition().map_or(0.0, |t| t.level()),
            dialogue,
            stats: session.stats,
            flag_count: session.flags.len(),
            chronicle: session.chronicle.lines().map(str::to_owned).collect(),
            quests: session
                .quests
                .iter()
                .map(|q| QuestView {
                    id: q.id.clone(),
                    title: q.title.clone(),
                    state: q.state(),
                    objective: q.current_objective().map(|o| o.text.clone()),
                })
                .collect(),
        }
    }
}
