use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of lines a chronicle keeps.
pub const DEFAULT_CAPACITY: usize = 16;

/// The player-facing narration log.
///
/// Lines are kept oldest-first; once `capacity` is exceeded the oldest lines
/// are evicted. Empty lines are never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronicle {
    lines: VecDeque<String>,
    capacity: usize,
    #[serde(default)]
    pushed: usize,
}

impl Default for Chronicle {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Chronicle {
    /// Create an empty chronicle holding at most `capacity` lines (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
            pushed: 0,
        }
    }

    /// Append a line, evicting the oldest lines if over capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            return;
        }
        tracing::trace!(%line, "chronicle");
        self.lines.push_back(line);
        self.pushed = self.pushed.wrapping_add(1);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Iterate over the lines, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.lines.iter().map(String::as_str)
    }

    /// The most recent line, if any.
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the chronicle holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of lines kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of lines ever pushed, including evicted ones.
    pub fn pushed(&self) -> usize {
        self.pushed
    }

    /// Lines pushed after the chronicle had seen `mark` pushes that are
    /// still held, oldest first.
    pub fn since(&self, mark: usize) -> impl Iterator<Item = &str> {
        let fresh = self.pushed.saturating_sub(mark).min(self.lines.len());
        self.lines
            .iter()
            .skip(self.lines.len() - fresh)
            .map(String::as_str)
    }

    /// Count lines that start with the given prefix.
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.lines.iter().filter(|l| l.starts_with(prefix)).count()
    }
}
