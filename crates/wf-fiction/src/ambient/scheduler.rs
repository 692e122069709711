use std::collections::BTreeSet;

use super::AmbientEvent;
use crate::config::EngineConfig;
use crate::session::SessionState;

/// Periodic ambient event trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientScheduler {
    interval: f32,
    threat_bump: i32,
    elapsed: f32,
    fired: BTreeSet<String>,
}

impl AmbientScheduler {
    /// Create a scheduler from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            interval: config.ambient_interval,
            threat_bump: config.ambient_threat_bump,
            elapsed: 0.0,
            fired: BTreeSet::new(),
        }
    }

    /// Seconds accumulated since the last check.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Forget accumulated time and fired events.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fired.clear();
    }

    /// Advance the timer by `dt` and, at an interval boundary, fire the first
    /// eligible event. The timer restarts at every boundary whether or not
    /// anything fired. Returns the id of the fired event.
    pub fn advance(
        &mut self,
        dt: f32,
        events: &[AmbientEvent],
        session: &mut SessionState,
    ) -> Option<String> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed = 0.0;

        let event = events.iter().find(|e| {
            !e.is_spent(&session.flags)
                && !(e.fire_once && self.fired.contains(&e.id))
                && e.is_ready(&session.flags, session.stats.threat())
        })?;

        session.log(event.line.clone());
        if let Some(flag) = &event.grants_flag {
            session.flags.insert(flag);
        }
        session.stats.apply_delta(0, 0, self.threat_bump);
        if event.fire_once {
            self.fired.insert(event.id.clone());
        }
        tracing::debug!(event = %event.id, threat = session.stats.threat(), "ambient event fired");
        Some(event.id.clone())
    }
}
