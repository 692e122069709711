//! Core narrative data for Worldforge.
//!
//! This crate holds the leaf types every other part of the engine builds on:
//! the write-once [`FlagSet`], the bounded [`CommandState`] stats, the
//! FIFO-evicting [`Chronicle`], and the typed identifiers used to key
//! dialogue nodes, quests, and scenes. Nothing here knows about dialogue
//! graphs or persistence.

/// Bounded, order-preserving narration log.
pub mod chronicle;
/// Write-once narrative flags.
pub mod flag;
/// Opaque positions and rectangles passed through from presentation.
pub mod geometry;
/// Strongly-typed content identifiers.
pub mod id;
/// Coarse interaction state of a session.
pub mod state;
/// The three bounded command stats.
pub mod stats;

pub use chronicle::Chronicle;
pub use flag::FlagSet;
pub use geometry::{Position, Rect};
pub use id::{NodeId, QuestId, SceneId};
pub use state::GameState;
pub use stats::{CommandState, STAT_MAX, STAT_MIN, StatDelta};
