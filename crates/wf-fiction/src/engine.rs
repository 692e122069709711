use std::path::Path;

use wf_core::{GameState, Position};

use crate::ambient::AmbientScheduler;
use crate::choice::{self, ChoiceOutcome};
use crate::config::EngineConfig;
use crate::content::{ContentRegistry, HotspotAction, Scene};
use crate::error::{FictionError, FictionResult};
use crate::save;
use crate::session::SessionState;
use crate::transition::{FadeStep, Transition};
use crate::view::SessionView;

/// The host-facing narrative engine.
///
/// Owns the content, the configuration, the live session, and the ambient
/// scheduler. Hosts drive it with [`tick`](Self::tick) and the intent
/// methods and read it back through [`view`](Self::view). Intents never
/// fail: content errors become `CONTENT ERROR` chronicle lines.
pub struct Engine {
    content: ContentRegistry,
    config: EngineConfig,
    session: SessionState,
    ambient: AmbientScheduler,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("title", &self.content.title)
            .field("scene", &self.session.scene)
            .field("game_state", &self.session.game_state())
            .finish()
    }
}

impl Engine {
    /// Create an engine and start a new game.
    ///
    /// Fails if the content's start scene is not registered.
    pub fn new(content: ContentRegistry, config: EngineConfig) -> FictionResult<Self> {
        if !content.scenes.contains(&content.start_scene) {
            return Err(FictionError::SceneNotFound(content.start_scene.clone()));
        }
        let session = SessionState::new(&content, &config);
        let ambient = AmbientScheduler::from_config(&config);
        tracing::debug!(title = %content.title, scene = %session.scene, "engine ready");
        Ok(Self {
            content,
            config,
            session,
            ambient,
        })
    }

    /// The content this engine runs.
    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live session.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The live session, mutably.
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// The scene the player is in.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.content.scenes.get(&self.session.scene)
    }

    /// Throw away the session and start over.
    pub fn new_game(&mut self) {
        self.session = SessionState::new(&self.content, &self.config);
        self.ambient.reset();
        tracing::info!("new game");
    }

    /// Advance time by `dt` seconds.
    ///
    /// Runs ambient events, quest progress, the dialogue countdown, the
    /// scene fade, and walking, always in that order.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.ambient
            .advance(dt, &self.content.ambient, &mut self.session);
        self.session.progress_quests();
        self.tick_countdown(dt);
        self.tick_transition(dt);
        self.tick_walk(dt);
    }

    /// Activate hotspot `index` of the current scene (zero-based).
    ///
    /// Returns whether the hotspot was found and acted on.
    pub fn activate_hotspot(&mut self, index: usize) -> bool {
        let result = self.try_activate_hotspot(index);
        self.settle(result).is_some()
    }

    /// Handle a click at a world position.
    ///
    /// Moves the walk target there, or to the centre of the first hotspot
    /// under the point and activates it. Returns whether a hotspot was hit.
    pub fn click(&mut self, point: Position) -> bool {
        if let Err(err) = self.require(GameState::FreeRoam) {
            self.settle::<()>(Err(err));
            return false;
        }
        let hit = self
            .current_scene()
            .and_then(|scene| scene.hotspot_at(point))
            .map(|(index, _)| index);
        match hit {
            Some(index) => self.activate_hotspot(index),
            None => {
                self.session.target = point;
                false
            }
        }
    }

    /// Pick choice `index` (zero-based) of the active dialogue node.
    pub fn choose(&mut self, index: usize) -> Option<ChoiceOutcome> {
        let result = self.try_choose(index);
        self.settle(result)
    }

    /// Save to `path`, logging the outcome.
    pub fn request_save(&mut self, path: &Path) -> bool {
        save::save(path, &mut self.session)
    }

    /// Load from `path`, logging the outcome.
    pub fn request_load(&mut self, path: &Path) -> bool {
        save::load(path, &self.content.scenes, &mut self.session)
    }

    /// Read-only snapshot for presentation.
    pub fn view(&self) -> SessionView {
        SessionView::capture(&self.content, &self.session)
    }

    fn require(&self, state: GameState) -> FictionResult<()> {
        let current = self.session.game_state();
        if current == state {
            Ok(())
        } else {
            Err(FictionError::NotAvailable(current.label()))
        }
    }

    /// Turn an intent result into chronicle lines where the player should
    /// hear about it.
    fn settle<T>(&mut self, result: FictionResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(FictionError::NotAvailable(state)) => {
                tracing::debug!(state, "intent ignored");
                None
            }
            Err(err) => {
                self.session.report(&err);
                None
            }
        }
    }

    fn try_activate_hotspot(&mut self, index: usize) -> FictionResult<()> {
        self.require(GameState::FreeRoam)?;
        let scene = self
            .current_scene()
            .ok_or_else(|| FictionError::SceneNotFound(self.session.scene.clone()))?;
        let hotspot = scene
            .hotspots
            .get(index)
            .ok_or(FictionError::HotspotNotFound(index))?;
        let action = hotspot.action.clone();
        let center = hotspot.area.center();
        tracing::debug!(hotspot = %hotspot.label, "hotspot activated");

        self.session.target = center;
        match action {
            HotspotAction::Dialogue(node) => {
                choice::activate(&self.content.dialogue, node, &mut self.session)?;
            }
            HotspotAction::Transition { to, spawn } => {
                self.session.begin_transition(Transition::new(to, spawn));
            }
            HotspotAction::StartQuest(quest) => {
                self.session
                    .quests
                    .start(&quest, &mut self.session.chronicle)?;
                self.session.progress_quests();
            }
            HotspotAction::GrantFlag(flag) => {
                self.session.grant_flag(&flag);
                self.session.progress_quests();
            }
        }
        Ok(())
    }

    fn try_choose(&mut self, index: usize) -> FictionResult<ChoiceOutcome> {
        self.require(GameState::Dialogue)?;
        let node = self
            .session
            .active_node()
            .ok_or(FictionError::NotAvailable(GameState::FreeRoam.label()))?;
        let result = choice::choose(&self.content.dialogue, node, index, &mut self.session);
        if matches!(result, Err(FictionError::DialogueNotFound(_))) {
            self.session.return_to_free_roam();
        }
        result
    }

    fn tick_countdown(&mut self, dt: f32) {
        if self.session.game_state() != GameState::Dialogue {
            return;
        }
        let Some(node) = self.session.active_node() else {
            return;
        };
        let Some(countdown) = self.content.dialogue.get(node).and_then(|n| n.timeout) else {
            return;
        };
        if self.session.wait_in_dialogue(dt) < countdown.seconds {
            return;
        }
        tracing::debug!(node = %node, choice = countdown.choice, "countdown expired");
        self.session.restart_dialogue_timer();
        self.choose(countdown.choice);
    }

    fn tick_transition(&mut self, dt: f32) {
        let fade_seconds = self.config.fade_seconds;
        let Some(transition) = self.session.transition_mut() else {
            return;
        };
        match transition.advance(dt, fade_seconds) {
            FadeStep::Fading => {}
            FadeStep::Swap => {
                let to = transition.to.clone();
                let spawn = transition.spawn;
                if self.content.scenes.contains(&to) {
                    tracing::info!(scene = %to, "entered scene");
                    self.session.scene = to;
                    self.session.player = spawn;
                    self.session.target = spawn;
                } else {
                    tracing::warn!(scene = %to, "transition target missing");
                    self.session.log("TRANSITION FAILED // target scene missing");
                }
            }
            FadeStep::Done => self.session.return_to_free_roam(),
        }
    }

    fn tick_walk(&mut self, dt: f32) {
        if self.session.game_state() != GameState::FreeRoam {
            return;
        }
        let from = self.session.player;
        let to = self.session.target;
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let dist = dx.hypot(dy);
        if dist <= 1.0 {
            return;
        }
        let step = self.config.walk_speed * dt;
        self.session.player = if step >= dist {
            to
        } else {
            Position::new(from.x + dx / dist * step, from.y + dy / dist * step)
        };
    }
}
