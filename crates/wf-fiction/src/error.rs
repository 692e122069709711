//! Error types for the fiction engine.

use std::path::PathBuf;

use thiserror::Error;
use wf_core::{NodeId, QuestId, SceneId};

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while running a session.
///
/// None of these are fatal: the engine turns each into a chronicle line and
/// falls back to a safe state.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A dialogue node referenced by content does not exist.
    #[error("dialogue node {0} not found")]
    DialogueNotFound(NodeId),

    /// The choice index is out of range for the node.
    #[error("node {node} has no choice {index}")]
    InvalidChoice {
        /// The node the choice was made on.
        node: NodeId,
        /// The requested choice index.
        index: usize,
    },

    /// A quest id referenced by content does not exist.
    #[error("quest not found: {0}")]
    QuestNotFound(QuestId),

    /// A scene id is not registered in the scene table.
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),

    /// The current scene has no hotspot at this index.
    #[error("no hotspot {0} in this scene")]
    HotspotNotFound(usize),

    /// The intent is not accepted in the current game state.
    #[error("not available during {0}")]
    NotAvailable(&'static str),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Content tables could not be decoded.
    #[error("invalid content: {0}")]
    Content(#[from] serde_json::Error),
}
