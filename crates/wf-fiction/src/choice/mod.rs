//! Choice engine for the dialogue graph.
//!
//! This module provides dialogue nodes, flag gates on choices, and the
//! resolution rules that turn a picked choice into session changes.

mod dialogue;
mod gate;
mod graph;
mod resolve;

pub use dialogue::{Choice, Countdown, DialogueNode};
pub use gate::{Gate, is_unlocked};
pub use graph::DialogueGraph;
pub use resolve::{ChoiceOutcome, LOCKED_LINE, activate, choose};
