//! The mutable state of one playthrough.

use wf_core::{Chronicle, CommandState, FlagSet, GameState, NodeId, Position, SceneId};

use crate::config::EngineConfig;
use crate::content::ContentRegistry;
use crate::error::FictionError;
use crate::quest::QuestRegistry;
use crate::transition::Transition;

/// Full narrative state of a session.
///
/// The data fields are public so hosts and persistence can read and restore
/// them directly. The interaction state (active node, game state, pending
/// transition) only changes through the engine's intents.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current scene.
    pub scene: SceneId,
    /// Player position.
    pub player: Position,
    /// Where the player is walking to.
    pub target: Position,
    /// Granted flags.
    pub flags: FlagSet,
    /// Live quests.
    pub quests: QuestRegistry,
    /// Command stats.
    pub stats: CommandState,
    /// Player-facing narration.
    pub chronicle: Chronicle,
    active_node: Option<NodeId>,
    game_state: GameState,
    dialogue_elapsed: f32,
    transition: Option<Transition>,
}

impl SessionState {
    /// Start a fresh session from content and configuration.
    pub fn new(content: &ContentRegistry, config: &EngineConfig) -> Self {
        let mut chronicle = Chronicle::new(config.chronicle_capacity);
        chronicle.push(content.opening_line.as_str());
        Self {
            scene: content.start_scene.clone(),
            player: content.start_position,
            target: content.start_position,
            flags: FlagSet::new(),
            quests: QuestRegistry::new(&content.quests, config.objective_pacing),
            stats: config.initial_stats,
            chronicle,
            active_node: None,
            game_state: GameState::FreeRoam,
            dialogue_elapsed: 0.0,
            transition: None,
        }
    }

    /// The dialogue node being shown, if any.
    pub fn active_node(&self) -> Option<NodeId> {
        self.active_node
    }

    /// Coarse interaction state.
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// The scene change in progress, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Seconds the active node has been waiting.
    pub fn dialogue_elapsed(&self) -> f32 {
        self.dialogue_elapsed
    }

    /// Append a chronicle line.
    pub fn log(&mut self, line: impl Into<String>) {
        self.chronicle.push(line);
    }

    /// Grant a flag, logging `FLAG GAINED` the first time only.
    pub fn grant_flag(&mut self, flag: &str) -> bool {
        let added = self.flags.insert(flag);
        if added {
            self.chronicle.push(format!("FLAG GAINED // {flag}"));
            tracing::debug!(flag, "flag granted");
        }
        added
    }

    /// Run one progress pass over every quest.
    pub fn progress_quests(&mut self) -> usize {
        self.quests.progress_all(&self.flags, &mut self.chronicle)
    }

    /// Tell the player why something did nothing.
    pub fn report(&mut self, err: &FictionError) {
        tracing::warn!(error = %err, "content error");
        self.chronicle.push(format!("CONTENT ERROR // {err}"));
    }

    pub(crate) fn enter_dialogue(&mut self, node: NodeId) {
        self.active_node = Some(node);
        self.game_state = GameState::Dialogue;
        self.dialogue_elapsed = 0.0;
    }

    pub(crate) fn return_to_free_roam(&mut self) {
        self.active_node = None;
        self.game_state = GameState::FreeRoam;
        self.dialogue_elapsed = 0.0;
        self.transition = None;
    }

    pub(crate) fn begin_transition(&mut self, transition: Transition) {
        tracing::debug!(to = %transition.to, "transition started");
        self.active_node = None;
        self.game_state = GameState::Transition;
        self.transition = Some(transition);
    }

    pub(crate) fn transition_mut(&mut self) -> Option<&mut Transition> {
        self.transition.as_mut()
    }

    /// Add `dt` to the dialogue timer and return the new total.
    pub(crate) fn wait_in_dialogue(&mut self, dt: f32) -> f32 {
        self.dialogue_elapsed += dt;
        self.dialogue_elapsed
    }

    pub(crate) fn restart_dialogue_timer(&mut self) {
        self.dialogue_elapsed = 0.0;
    }
}
