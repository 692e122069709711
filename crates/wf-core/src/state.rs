use std::fmt;

use serde::{Deserialize, Serialize};

/// What the player is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Walking the scene; hotspots can be activated.
    #[default]
    FreeRoam,
    /// A dialogue node is active; only choices are accepted.
    Dialogue,
    /// A scene change is fading out or in.
    Transition,
}

impl GameState {
    /// Lower-case label, e.g. `free roam`.
    pub fn label(self) -> &'static str {
        match self {
            Self::FreeRoam => "free roam",
            Self::Dialogue => "dialogue",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
