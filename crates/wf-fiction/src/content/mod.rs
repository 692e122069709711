//! Static content tables: scenes, dialogue, quests, ambient events.
//!
//! A [`ContentRegistry`] is built once and passed by reference into the
//! session; nothing in it changes while a game runs. The built-in slice is
//! [`ContentRegistry::worldforge`]; other content can be loaded from JSON.

mod codex;
mod scene;
mod validate;
mod worldforge;

pub use codex::{Codex, WorldRule};
pub use scene::{Hotspot, HotspotAction, Scene, SceneTable};
pub use validate::{ContentIssue, validate};

use std::path::Path;

use serde::{Deserialize, Serialize};
use wf_core::{Position, QuestId, SceneId};

use crate::ambient::AmbientEvent;
use crate::choice::DialogueGraph;
use crate::error::{FictionError, FictionResult};
use crate::quest::Quest;

/// Everything a session needs to know about the world it runs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRegistry {
    /// Display title.
    pub title: String,
    /// Scene a new game starts in.
    pub start_scene: SceneId,
    /// Player position at the start of a new game.
    pub start_position: Position,
    /// First chronicle line of a new game.
    #[serde(default)]
    pub opening_line: String,
    /// Registered scenes.
    pub scenes: SceneTable,
    /// Dialogue nodes keyed by id.
    pub dialogue: DialogueGraph,
    /// Quest definitions in declaration order.
    #[serde(default)]
    pub quests: Vec<Quest>,
    /// Ambient events in priority order.
    #[serde(default)]
    pub ambient: Vec<AmbientEvent>,
    /// Background reading.
    #[serde(default, skip_serializing_if = "Codex::is_empty")]
    pub codex: Codex,
}

impl ContentRegistry {
    /// The built-in Worldforge slice.
    pub fn worldforge() -> Self {
        worldforge::build()
    }

    /// Decode content from JSON.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode content as pretty-printed JSON.
    pub fn to_json(&self) -> FictionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read content from a JSON file.
    pub fn from_path(path: &Path) -> FictionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| FictionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            scenes = content.scenes.len(),
            nodes = content.dialogue.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Look up a quest definition.
    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == id)
    }

    /// Whether a quest with this id is defined.
    pub fn has_quest(&self, id: &QuestId) -> bool {
        self.quest(id).is_some()
    }

    /// Check cross references. See [`validate`].
    pub fn validate(&self) -> Vec<ContentIssue> {
        validate(self)
    }
}
