use serde::{Deserialize, Serialize};

/// A numbered rule of the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRule {
    /// Short code, e.g. `R3`.
    pub code: String,
    /// Rule text.
    pub text: String,
}

/// Background reading available to the player at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codex {
    /// Why the world exists.
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Rules the crew lives by.
    #[serde(default)]
    pub rules: Vec<WorldRule>,
    /// Design pillars.
    #[serde(default)]
    pub pillars: Vec<String>,
}

impl Codex {
    /// Add a founding reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Add a world rule.
    pub fn with_rule(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push(WorldRule {
            code: code.into(),
            text: text.into(),
        });
        self
    }

    /// Add a design pillar.
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.pillars.push(pillar.into());
        self
    }

    /// Whether the codex has no entries.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty() && self.rules.is_empty() && self.pillars.is_empty()
    }
}
