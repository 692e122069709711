use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest value any command stat can take.
pub const STAT_MIN: i32 = 0;
/// Highest value any command stat can take.
pub const STAT_MAX: i32 = 100;

fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Signed adjustments to the three command stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatDelta {
    /// Change to composure.
    #[serde(default)]
    pub composure: i32,
    /// Change to crew trust.
    #[serde(default)]
    pub crew_trust: i32,
    /// Change to threat.
    #[serde(default)]
    pub threat: i32,
}

impl StatDelta {
    /// Create a delta from its three components.
    pub const fn new(composure: i32, crew_trust: i32, threat: i32) -> Self {
        Self {
            composure,
            crew_trust,
            threat,
        }
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.composure == 0 && self.crew_trust == 0 && self.threat == 0
    }
}

impl fmt::Display for StatDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C:{:+} T:{:+} TH:{:+}",
            self.composure, self.crew_trust, self.threat
        )
    }
}

/// The player's command standing: three stats, each kept within
/// [`STAT_MIN`]..=[`STAT_MAX`] after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandState {
    composure: i32,
    crew_trust: i32,
    threat: i32,
}

impl Default for CommandState {
    fn default() -> Self {
        Self {
            composure: 60,
            crew_trust: 55,
            threat: 30,
        }
    }
}

impl CommandState {
    /// Create a command state, clamping each stat into range.
    pub fn new(composure: i32, crew_trust: i32, threat: i32) -> Self {
        Self {
            composure: clamp_stat(composure),
            crew_trust: clamp_stat(crew_trust),
            threat: clamp_stat(threat),
        }
    }

    /// Current composure.
    pub fn composure(&self) -> i32 {
        self.composure
    }

    /// Current crew trust.
    pub fn crew_trust(&self) -> i32 {
        self.crew_trust
    }

    /// Current threat.
    pub fn threat(&self) -> i32 {
        self.threat
    }

    /// Apply a delta, clamping each stat independently.
    ///
    /// Returns the shift that actually took effect, which is zero for any
    /// component pushed against a bound it already sat on.
    pub fn apply(&mut self, delta: StatDelta) -> StatDelta {
        let before = *self;
        self.composure = clamp_stat(self.composure.saturating_add(delta.composure));
        self.crew_trust = clamp_stat(self.crew_trust.saturating_add(delta.crew_trust));
        self.threat = clamp_stat(self.threat.saturating_add(delta.threat));
        StatDelta::new(
            self.composure - before.composure,
            self.crew_trust - before.crew_trust,
            self.threat - before.threat,
        )
    }

    /// Apply three deltas and report whether any stat changed.
    pub fn apply_delta(&mut self, composure: i32, crew_trust: i32, threat: i32) -> bool {
        !self
            .apply(StatDelta::new(composure, crew_trust, threat))
            .is_zero()
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "composure {} / crew trust {} / threat {}",
            self.composure, self.crew_trust, self.threat
        )
    }
}
