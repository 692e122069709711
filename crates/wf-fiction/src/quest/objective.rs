use serde::{Deserialize, Serialize};
use wf_core::FlagSet;

/// One milestone of a quest, cleared by any of its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    /// Narration shown while the objective is current.
    pub text: String,
    /// Flags that clear this objective; any one suffices.
    pub done_by: Vec<String>,
}

impl Objective {
    /// Create an objective cleared by any of `flags`.
    pub fn new<I, S>(text: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            done_by: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any clearing flag is present.
    pub fn is_done(&self, flags: &FlagSet) -> bool {
        self.done_by.iter().any(|f| flags.contains(f))
    }
}
