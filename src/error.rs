//! Error types.
//!
//! Every error here is fatal to the render call that raised it. Nothing is
//! retried and no partial tree is rolled back.

use crate::engine::NodeId;

/// Failures reported by the host tree primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("invalid tag name '{tag}'")]
    InvalidTagName { tag: String },
    #[error("invalid attribute name '{name}'")]
    InvalidAttributeName { name: String },
    #[error("node {node} is not an element")]
    NotAnElement { node: NodeId },
    #[error("node {node} is not a text node")]
    NotText { node: NodeId },
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("node {node} has no parent")]
    Detached { node: NodeId },
}

/// Failures that abort a render call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("malformed element: {reason}")]
    MalformedElement { reason: String },
    #[error(transparent)]
    Host(#[from] HostError),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
