//! Dialogue nodes and choice structures.

use serde::{Deserialize, Serialize};
use wf_core::{NodeId, QuestId, StatDelta};

use super::gate::Gate;

/// A countdown that picks a choice on the player's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    /// Seconds the node waits before auto-advancing.
    pub seconds: f32,
    /// Index of the choice taken on expiry.
    pub choice: usize,
}

/// One node of the dialogue graph. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Who speaks the line.
    pub speaker: String,
    /// The line of narration.
    pub line: String,
    /// Available choices, in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Optional auto-advance timer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Countdown>,
}

impl DialogueNode {
    /// Create a node with the given speaker and line.
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
            choices: Vec::new(),
            timeout: None,
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Auto-pick `choice` after `seconds`.
    pub fn with_timeout(mut self, seconds: f32, choice: usize) -> Self {
        self.timeout = Some(Countdown { seconds, choice });
        self
    }
}

/// A single selectable branch of a dialogue node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
    /// Node to continue with, or `None` to return to free roam.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<NodeId>,
    /// Flag granted when picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<String>,
    /// Flags gating this choice.
    #[serde(flatten)]
    pub gate: Gate,
    /// Quest activated when picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_quest: Option<QuestId>,
    /// Stat adjustments applied when picked.
    #[serde(default, skip_serializing_if = "StatDelta::is_zero")]
    pub impact: StatDelta,
    /// Narration appended to the chronicle when picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
}

impl Choice {
    /// Create a choice that returns to free roam and changes nothing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            goto: None,
            set_flag: None,
            gate: Gate::open(),
            start_quest: None,
            impact: StatDelta::default(),
            consequence: None,
        }
    }

    /// Continue with another node.
    pub fn with_goto(mut self, node: u32) -> Self {
        self.goto = Some(NodeId(node));
        self
    }

    /// Grant a flag when picked.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.set_flag = Some(flag.into());
        self
    }

    /// Require a flag for the choice to be unlocked.
    pub fn with_requirement(mut self, flag: impl Into<String>) -> Self {
        self.gate.requires = Some(flag.into());
        self
    }

    /// Lock the choice once a flag is present.
    pub fn with_block(mut self, flag: impl Into<String>) -> Self {
        self.gate.blocks_if = Some(flag.into());
        self
    }

    /// Activate a quest when picked.
    pub fn with_quest(mut self, quest: impl Into<QuestId>) -> Self {
        self.start_quest = Some(quest.into());
        self
    }

    /// Shift the command stats when picked.
    pub fn with_impact(mut self, composure: i32, crew_trust: i32, threat: i32) -> Self {
        self.impact = StatDelta::new(composure, crew_trust, threat);
        self
    }

    /// Append a consequence line when picked.
    pub fn with_consequence(mut self, line: impl Into<String>) -> Self {
        self.consequence = Some(line.into());
        self
    }
}
