//! Turning a picked choice into session changes.

use wf_core::NodeId;

use super::gate::is_unlocked;
use super::graph::DialogueGraph;
use crate::error::{FictionError, FictionResult};
use crate::session::SessionState;

/// Chronicle line recorded when a locked choice is attempted.
pub const LOCKED_LINE: &str = "LOCKED CHOICE // requirement or rule block active";

/// What happened when a choice was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The choice is gated; nothing changed except one chronicle line.
    Locked,
    /// The choice was resolved.
    Chosen {
        /// The node now active, or `None` when back in free roam.
        next: Option<NodeId>,
    },
}

/// Make `node` the active dialogue node.
///
/// A node missing from the graph returns the session to free roam and is
/// reported as [`FictionError::DialogueNotFound`].
pub fn activate(
    graph: &DialogueGraph,
    node: NodeId,
    session: &mut SessionState,
) -> FictionResult<()> {
    if !graph.contains(node) {
        session.return_to_free_roam();
        return Err(FictionError::DialogueNotFound(node));
    }
    tracing::debug!(node = %node, "dialogue activated");
    session.enter_dialogue(node);
    Ok(())
}

/// Resolve choice `index` of `node`.
///
/// Locked choices only log [`LOCKED_LINE`]. Unlocked choices log the
/// exchange, grant their flag, shift the stats, append the consequence,
/// start their quest, re-evaluate every quest, and move to the next node.
pub fn choose(
    graph: &DialogueGraph,
    node_id: NodeId,
    index: usize,
    session: &mut SessionState,
) -> FictionResult<ChoiceOutcome> {
    let node = graph.node(node_id)?;
    let choice = node
        .choices
        .get(index)
        .ok_or(FictionError::InvalidChoice {
            node: node_id,
            index,
        })?;

    if !is_unlocked(choice, &session.flags) {
        tracing::debug!(node = %node_id, index, "locked choice attempted");
        session.log(LOCKED_LINE);
        return Ok(ChoiceOutcome::Locked);
    }

    session.log(format!("{}: {}", node.speaker, node.line));
    session.log(format!("YOU: {}", choice.text));

    if let Some(flag) = &choice.set_flag {
        session.grant_flag(flag);
    }

    let shift = session.stats.apply(choice.impact);
    if !shift.is_zero() {
        session.log(format!("SYSTEM SHIFT // {shift}"));
    }

    if let Some(line) = &choice.consequence {
        session.log(line.clone());
    }

    if let Some(quest) = &choice.start_quest {
        let started = session.quests.start(quest, &mut session.chronicle);
        if let Err(err) = started {
            session.report(&err);
        }
    }

    session.progress_quests();

    match choice.goto {
        Some(next) => {
            if let Err(err) = activate(graph, next, session) {
                session.report(&err);
            }
        }
        None => session.return_to_free_roam(),
    }

    tracing::debug!(node = %node_id, index, next = ?session.active_node(), "choice resolved");
    Ok(ChoiceOutcome::Chosen {
        next: session.active_node(),
    })
}
