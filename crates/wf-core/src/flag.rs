use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of narrative facts granted so far.
///
/// Flags are case-sensitive, write-once, and never removed during a session.
/// The empty string is never a flag: inserting it is ignored. Iteration is
/// sorted, which keeps save files stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
    flags: BTreeSet<String>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a flag. Returns `true` only when the flag was newly added.
    pub fn insert(&mut self, flag: &str) -> bool {
        if flag.is_empty() {
            return false;
        }
        if self.flags.contains(flag) {
            return false;
        }
        self.flags.insert(flag.to_string())
    }

    /// Check whether a flag has been granted.
    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Number of granted flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flag has been granted yet.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate over the flags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for FlagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_first_grant_only() {
        let mut flags = FlagSet::new();
        assert!(flags.insert("silent_scan"));
        assert!(!flags.insert("silent_scan"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn empty_flag_is_ignored() {
        let mut flags = FlagSet::new();
        assert!(!flags.insert(""));
        assert!(flags.is_empty());
        assert!(!flags.contains(""));
    }

    #[test]
    fn flags_are_case_sensitive() {
        let flags: FlagSet = ["Lockdown"].into_iter().collect();
        assert!(flags.contains("Lockdown"));
        assert!(!flags.contains("lockdown"));
    }

    #[test]
    fn iteration_is_sorted() {
        let flags: FlagSet = ["trace_marked", "beacon_broadcast", "lockdown"]
            .into_iter()
            .collect();
        let listed: Vec<_> = flags.iter().collect();
        assert_eq!(listed, vec!["beacon_broadcast", "lockdown", "trace_marked"]);
    }
}
