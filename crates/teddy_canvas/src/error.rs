//! Error types for host tree mutation.

use thiserror::Error;

use crate::node::HostId;

/// Errors raised by [`HostTree`](crate::HostTree) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The id does not resolve to a live host node
    #[error("Unknown host node: {0}")]
    UnknownNode(HostId),

    /// The operation needs an element but got another node kind
    #[error("Host node {0} is not an element")]
    NotAnElement(HostId),

    /// `child` is not a direct child of `parent`
    #[error("Host node {child} is not a child of {parent}")]
    NotAChild { parent: HostId, child: HostId },

    /// Inserting `child` under `parent` would create a cycle
    #[error("Cannot insert host node {child} under its own descendant {parent}")]
    HierarchyRequest { parent: HostId, child: HostId },

    /// The property is not on the direct-assignment allow-list
    #[error("Unknown host property: {0}")]
    UnknownProperty(String),
}

/// Result type for host tree operations.
pub type HostResult<T> = Result<T, HostError>;
