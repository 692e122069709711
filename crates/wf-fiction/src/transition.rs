//! Scene fades.

use wf_core::{Position, SceneId};

/// Which half of a fade is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Darkening the old scene.
    Out,
    /// Revealing the new scene.
    In,
}

/// What a fade step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FadeStep {
    Fading,
    /// The screen just reached full black; swap scenes now.
    Swap,
    Done,
}

/// A pending scene change.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Target scene.
    pub to: SceneId,
    /// Player position in the target scene.
    pub spawn: Position,
    phase: FadePhase,
    level: f32,
}

impl Transition {
    /// Start fading out towards `to`.
    pub fn new(to: SceneId, spawn: Position) -> Self {
        Self {
            to,
            spawn,
            phase: FadePhase::Out,
            level: 0.0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Fade level from 0 (clear) to 1 (black).
    pub fn level(&self) -> f32 {
        self.level
    }

    pub(crate) fn advance(&mut self, dt: f32, fade_seconds: f32) -> FadeStep {
        let step = if fade_seconds > 0.0 { dt / fade_seconds } else { 1.0 };
        match self.phase {
            FadePhase::Out => {
                self.level = (self.level + step).min(1.0);
                if self.level >= 1.0 {
                    self.phase = FadePhase::In;
                    return FadeStep::Swap;
                }
                FadeStep::Fading
            }
            FadePhase::In => {
                self.level = (self.level - step).max(0.0);
                if self.level <= 0.0 {
                    return FadeStep::Done;
                }
                FadeStep::Fading
            }
        }
    }
}
