use serde::{Deserialize, Serialize};
use wf_core::FlagSet;

fn default_fire_once() -> bool {
    true
}

/// A precondition-gated narration line injected by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientEvent {
    /// Unique event id.
    pub id: String,
    /// Chronicle line logged when the event fires.
    pub line: String,
    /// Flag that must be present for the event to fire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_flag: Option<String>,
    /// Flag granted when the event fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants_flag: Option<String>,
    /// Minimum threat for the event to fire.
    #[serde(default)]
    pub min_threat: i32,
    /// Whether the event fires at most once.
    #[serde(default = "default_fire_once")]
    pub fire_once: bool,
}

impl AmbientEvent {
    /// Create an ungated, fire-once event.
    pub fn new(id: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            line: line.into(),
            requires_flag: None,
            grants_flag: None,
            min_threat: 0,
            fire_once: true,
        }
    }

    /// Require a flag.
    pub fn requires(mut self, flag: impl Into<String>) -> Self {
        self.requires_flag = Some(flag.into());
        self
    }

    /// Grant a flag on firing.
    pub fn grants(mut self, flag: impl Into<String>) -> Self {
        self.grants_flag = Some(flag.into());
        self
    }

    /// Set the threat threshold.
    pub fn min_threat(mut self, threat: i32) -> Self {
        self.min_threat = threat;
        self
    }

    /// Allow the event to fire repeatedly.
    pub fn repeating(mut self) -> Self {
        self.fire_once = false;
        self
    }

    /// Whether a fire-once event has already left its mark in `flags`.
    pub fn is_spent(&self, flags: &FlagSet) -> bool {
        self.fire_once
            && self
                .grants_flag
                .as_deref()
                .is_some_and(|f| flags.contains(f))
    }

    /// Whether the flag and threat preconditions hold.
    pub fn is_ready(&self, flags: &FlagSet, threat: i32) -> bool {
        let required = self
            .requires_flag
            .as_deref()
            .is_none_or(|f| f.is_empty() || flags.contains(f));
        required && threat >= self.min_threat
    }
}
