//! Flag gates deciding whether a choice can be picked.

use serde::{Deserialize, Serialize};
use wf_core::FlagSet;

use super::dialogue::Choice;

/// A requires/blocks pair of flags.
///
/// Both halves are independent: the gate is open only when the required flag
/// (if any) is present and the blocking flag (if any) is absent. An empty
/// string counts as no flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Flag that must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    /// Flag whose presence closes the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_if: Option<String>,
}

impl Gate {
    /// A gate that is always open.
    pub fn open() -> Self {
        Self::default()
    }

    /// Evaluate the gate against the granted flags.
    pub fn is_open(&self, flags: &FlagSet) -> bool {
        let missing = non_empty(&self.requires).is_some_and(|f| !flags.contains(f));
        let blocked = non_empty(&self.blocks_if).is_some_and(|f| flags.contains(f));
        !missing && !blocked
    }
}

fn non_empty(flag: &Option<String>) -> Option<&str> {
    flag.as_deref().filter(|f| !f.is_empty())
}

/// Whether a choice may be picked with the given flags.
pub fn is_unlocked(choice: &Choice, flags: &FlagSet) -> bool {
    choice.gate.is_open(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gate(requires: Option<&str>, blocks_if: Option<&str>) -> Gate {
        Gate {
            requires: requires.map(str::to_string),
            blocks_if: blocks_if.map(str::to_string),
        }
    }

    #[test]
    fn open_gate() {
        assert!(Gate::open().is_open(&FlagSet::new()));
    }

    #[test]
    fn requirement_needs_flag() {
        let g = gate(Some("protocol_authorized"), None);
        assert!(!g.is_open(&FlagSet::new()));
        let flags: FlagSet = ["protocol_authorized"].into_iter().collect();
        assert!(g.is_open(&flags));
    }

    #[test]
    fn blocker_closes_gate() {
        let g = gate(None, Some("protocol_authorized"));
        assert!(g.is_open(&FlagSet::new()));
        let flags: FlagSet = ["protocol_authorized"].into_iter().collect();
        assert!(!g.is_open(&flags));
    }

    #[test]
    fn empty_strings_mean_no_gate() {
        assert!(gate(Some(""), Some("")).is_open(&FlagSet::new()));
    }

    #[test]
    fn choice_uses_its_gate() {
        let choice = Choice::new("Strike once.").with_requirement("protocol_authorized");
        assert!(!is_unlocked(&choice, &FlagSet::new()));
    }

    const NAMES: &[&str] = &["", "a", "b", "c"];

    proptest! {
        #[test]
        fn gate_law(
            req in 0usize..4, blk in 0usize..4,
            has_a: bool, has_b: bool, has_c: bool,
        ) {
            let mut flags = FlagSet::new();
            for (name, present) in [("a", has_a), ("b", has_b), ("c", has_c)] {
                if present {
                    flags.insert(name);
                }
            }
            let g = gate(Some(NAMES[req]), Some(NAMES[blk]));
            let requires_ok = NAMES[req].is_empty() || flags.contains(NAMES[req]);
            let blocks_ok = NAMES[blk].is_empty() || !flags.contains(NAMES[blk]);
            prop_assert_eq!(g.is_open(&flags), requires_ok && blocks_ok);
        }
    }
}
