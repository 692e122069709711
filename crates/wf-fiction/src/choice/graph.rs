//! The dialogue graph: an arena of nodes keyed by [`NodeId`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wf_core::NodeId;

use super::dialogue::DialogueNode;
use crate::error::{FictionError, FictionResult};

/// All dialogue nodes of a piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueGraph {
    nodes: BTreeMap<NodeId, DialogueNode>,
}

impl DialogueGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, replacing any node with the same id.
    pub fn insert(&mut self, id: u32, node: DialogueNode) {
        self.nodes.insert(NodeId(id), node);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_node(mut self, id: u32, node: DialogueNode) -> Self {
        self.insert(id, node);
        self
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&DialogueNode> {
        self.nodes.get(&id)
    }

    /// Look up a node, treating absence as a content error.
    pub fn node(&self, id: NodeId) -> FictionResult<&DialogueNode> {
        self.get(id).ok_or(FictionError::DialogueNotFound(id))
    }

    /// Whether the graph holds a node with this id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate over nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DialogueNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
