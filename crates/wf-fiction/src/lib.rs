//! Narrative engine for Worldforge.
//!
//! Drives a branching dialogue graph gated by write-once flags, a quest
//! state machine with ordered objectives, three bounded command stats, a
//! periodic ambient event scheduler, and flat-text save files. Hosts talk to
//! the [`Engine`]: they tick it with elapsed time, forward discrete intents
//! (hotspot, click, choice, save, load), and read a [`SessionView`] back.

/// Periodic ambient narration.
pub mod ambient;
/// Dialogue nodes, choice gating, and choice resolution.
pub mod choice;
/// Engine tunables.
pub mod config;
/// Static content tables and the built-in slice.
pub mod content;
/// The host-facing engine.
pub mod engine;
/// Error types for the narrative engine.
pub mod error;
/// Quests and objectives.
pub mod quest;
/// Save-file encoding and loading.
pub mod save;
/// Mutable session state.
pub mod session;
/// Scene fades.
pub mod transition;
/// Read-only presentation snapshot.
pub mod view;

pub use ambient::{AmbientEvent, AmbientScheduler};
pub use choice::{Choice, ChoiceOutcome, DialogueGraph, DialogueNode, is_unlocked};
pub use config::{EngineConfig, ObjectivePacing};
pub use content::{ContentIssue, ContentRegistry, HotspotAction, Scene, SceneTable};
pub use engine::Engine;
pub use error::{FictionError, FictionResult};
pub use quest::{Objective, Quest, QuestRegistry, QuestState};
pub use save::{DEFAULT_SAVE_PATH, Snapshot};
pub use session::SessionState;
pub use view::SessionView;
