//! Scenes and their interactive hotspots.

use serde::{Deserialize, Serialize};
use wf_core::{NodeId, Position, QuestId, Rect, SceneId};

/// What a hotspot does when activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotAction {
    /// Open a dialogue node.
    Dialogue(NodeId),
    /// Fade to another scene and place the player at `spawn`.
    Transition {
        /// Target scene.
        to: SceneId,
        /// Player position in the target scene.
        spawn: Position,
    },
    /// Start a quest.
    StartQuest(QuestId),
    /// Grant a flag.
    GrantFlag(String),
}

/// A clickable region of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Label shown to the player.
    pub label: String,
    /// Clickable area in world space.
    pub area: Rect,
    /// Effect of activation.
    pub action: HotspotAction,
}

impl Hotspot {
    /// Create a hotspot.
    pub fn new(label: impl Into<String>, area: Rect, action: HotspotAction) -> Self {
        Self {
            label: label.into(),
            area,
            action,
        }
    }
}

/// A location the player can stand in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene id.
    pub id: SceneId,
    /// One-line status text shown on entry.
    #[serde(default)]
    pub flavor: String,
    /// Hotspots in declaration order.
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Scene {
    /// Create a scene without hotspots.
    pub fn new(id: impl Into<SceneId>, flavor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            flavor: flavor.into(),
            hotspots: Vec::new(),
        }
    }

    /// Add a hotspot.
    pub fn with_hotspot(mut self, label: &str, area: Rect, action: HotspotAction) -> Self {
        self.hotspots.push(Hotspot::new(label, area, action));
        self
    }

    /// The first hotspot containing `point`, with its index.
    pub fn hotspot_at(&self, point: Position) -> Option<(usize, &Hotspot)> {
        self.hotspots
            .iter()
            .enumerate()
            .find(|(_, h)| h.area.contains(point))
    }
}

/// The registered scenes, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneTable {
    scenes: Vec<Scene>,
}

impl SceneTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene, replacing any scene with the same id.
    pub fn insert(&mut self, scene: Scene) {
        match self.scenes.iter_mut().find(|s| s.id == scene.id) {
            Some(existing) => *existing = scene,
            None => self.scenes.push(scene),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.insert(scene);
        self
    }

    /// Look up a scene.
    pub fn get(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| &s.id == id)
    }

    /// Whether a scene is registered.
    pub fn contains(&self, id: &SceneId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate scenes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene is registered.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Scene {
        Scene::new("room", "ROOM")
            .with_hotspot("Big", Rect::new(0.0, 0.0, 100.0, 100.0), HotspotAction::Dialogue(NodeId(1)))
            .with_hotspot(
                "Small",
                Rect::new(10.0, 10.0, 10.0, 10.0),
                HotspotAction::GrantFlag("small".into()),
            )
    }

    #[test]
    fn first_hotspot_wins() {
        let scene = room();
        let (index, hit) = scene.hotspot_at(Position::new(15.0, 15.0)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(hit.label, "Big");
        assert!(scene.hotspot_at(Position::new(150.0, 15.0)).is_none());
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut table = SceneTable::new().with_scene(room());
        table.insert(Scene::new("room", "REPLACED"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&SceneId::new("room")).unwrap().flavor, "REPLACED");
    }

    #[test]
    fn actions_serialize_externally_tagged() {
        let action = HotspotAction::Transition {
            to: SceneId::new("engine_corridor"),
            spawn: Position::new(1104.0, 418.0),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"transition":{"to":"engine_corridor","spawn":{"x":1104.0,"y":418.0}}}"#
        );
        let node: HotspotAction = serde_json::from_str(r#"{"dialogue":7}"#).unwrap();
        assert_eq!(node, HotspotAction::Dialogue(NodeId(7)));
    }
}
