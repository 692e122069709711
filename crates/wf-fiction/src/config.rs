//! Configuration for an engine run.

use serde::{Deserialize, Serialize};
use wf_core::CommandState;

/// How far one progress pass may advance a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectivePacing {
    /// Clear every consecutive satisfied objective in one pass.
    #[default]
    Cascade,
    /// Clear at most one objective per pass.
    Stepwise,
}

/// Tunables for the narrative engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Seconds between ambient event checks.
    pub ambient_interval: f32,
    /// Threat added whenever an ambient event fires.
    pub ambient_threat_bump: i32,
    /// Maximum chronicle length.
    pub chronicle_capacity: usize,
    /// Quest progress pacing.
    pub objective_pacing: ObjectivePacing,
    /// Seconds for each half (out, in) of a scene fade.
    pub fade_seconds: f32,
    /// Command stats at the start of a new game.
    pub initial_stats: CommandState,
    /// Free-roam walking speed in world units per second.
    pub walk_speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ambient_interval: 8.0,
            ambient_threat_bump: 2,
            chronicle_capacity: 16,
            objective_pacing: ObjectivePacing::Cascade,
            fade_seconds: 1.0,
            initial_stats: CommandState::default(),
            walk_speed: 180.0,
        }
    }
}

impl EngineConfig {
    /// Set the ambient check interval (values at or below zero fall back to 0.1s).
    pub fn with_ambient_interval(mut self, seconds: f32) -> Self {
        self.ambient_interval = if seconds > 0.0 { seconds } else { 0.1 };
        self
    }

    /// Set the threat bump applied by ambient events.
    pub fn with_ambient_threat_bump(mut self, bump: i32) -> Self {
        self.ambient_threat_bump = bump;
        self
    }

    /// Set the chronicle capacity (minimum 1).
    pub fn with_chronicle_capacity(mut self, capacity: usize) -> Self {
        self.chronicle_capacity = capacity.max(1);
        self
    }

    /// Set the quest progress pacing.
    pub fn with_objective_pacing(mut self, pacing: ObjectivePacing) -> Self {
        self.objective_pacing = pacing;
        self
    }

    /// Set the fade duration per direction (negative values become zero).
    pub fn with_fade_seconds(mut self, seconds: f32) -> Self {
        self.fade_seconds = seconds.max(0.0);
        self
    }

    /// Set the starting command stats.
    pub fn with_initial_stats(mut self, stats: CommandState) -> Self {
        self.initial_stats = stats;
        self
    }

    /// Set the walking speed (negative values become zero).
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert!((cfg.ambient_interval - 8.0).abs() < f32::EPSILON);
        assert_eq!(cfg.ambient_threat_bump, 2);
        assert_eq!(cfg.chronicle_capacity, 16);
        assert_eq!(cfg.objective_pacing, ObjectivePacing::Cascade);
        assert_eq!(cfg.initial_stats, CommandState::new(60, 55, 30));
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_ambient_interval(2.5)
            .with_ambient_threat_bump(5)
            .with_chronicle_capacity(40)
            .with_objective_pacing(ObjectivePacing::Stepwise)
            .with_fade_seconds(0.5);
        assert!((cfg.ambient_interval - 2.5).abs() < f32::EPSILON);
        assert_eq!(cfg.ambient_threat_bump, 5);
        assert_eq!(cfg.chronicle_capacity, 40);
        assert_eq!(cfg.objective_pacing, ObjectivePacing::Stepwise);
        assert!((cfg.fade_seconds - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn degenerate_values_clamped() {
        let cfg = EngineConfig::default()
            .with_ambient_interval(0.0)
            .with_chronicle_capacity(0)
            .with_fade_seconds(-1.0)
            .with_walk_speed(-5.0);
        assert!(cfg.ambient_interval > 0.0);
        assert_eq!(cfg.chronicle_capacity, 1);
        assert_eq!(cfg.fade_seconds, 0.0);
        assert_eq!(cfg.walk_speed, 0.0);
    }
}
