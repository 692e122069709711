//! Quest lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a quest sits in its forward-only lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestState {
    /// Not yet started.
    #[default]
    Locked,
    /// Started; objectives are being tracked.
    Active,
    /// Every objective is cleared. Terminal.
    Completed,
}

impl QuestState {
    /// Token used in save files.
    pub fn token(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parse a save-file token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "locked" => Some(Self::Locked),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for QuestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Locked => "Locked",
            Self::Active => "Active",
            Self::Completed => "Completed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        for state in [QuestState::Locked, QuestState::Active, QuestState::Completed] {
            assert_eq!(QuestState::from_token(state.token()), Some(state));
        }
        assert_eq!(QuestState::from_token("Active"), None);
        assert_eq!(QuestState::from_token("done"), None);
    }

    #[test]
    fn lifecycle_order() {
        assert!(QuestState::Locked < QuestState::Active);
        assert!(QuestState::Active < QuestState::Completed);
    }

    #[test]
    fn display_label() {
        assert_eq!(QuestState::Completed.to_string(), "Completed");
    }
}
