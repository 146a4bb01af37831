//! Error types for rendering.

use teddy_canvas::{HostError, HostId};
use teddy_relief::InstanceId;
use thiserror::Error;

/// Errors that can occur while rendering or updating
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Re-render requested for an instance without `base` and `dom`
    #[error("Component instance {instance} is not mounted")]
    UnmountedInstance { instance: InstanceId },

    /// A node that is not a primitive, fragment, component or element
    #[error("Invalid node descriptor: {reason}")]
    InvalidNode { reason: String },

    /// The instance id does not resolve
    #[error("Unknown component instance: {0}")]
    UnknownInstance(InstanceId),

    /// The target id does not resolve
    #[error("Unknown host node: {0}")]
    UnknownHostNode(HostId),

    /// A host tree mutation failed
    #[error(transparent)]
    Host(#[from] HostError),

    /// Queued state updates kept producing more updates
    #[error("State updates exceeded {limit} passes in one flush")]
    UpdateLimit { limit: usize },

    /// Several subtrees failed during one pass
    #[error("{} subtrees failed to render", .0.len())]
    Aggregate(Vec<RenderError>),
}

impl RenderError {
    pub(crate) fn invalid_node(reason: impl Into<String>) -> Self {
        RenderError::InvalidNode {
            reason: reason.into(),
        }
    }

    /// Fold the failures of one pass into a single error.
    pub(crate) fn aggregate(mut errors: Vec<RenderError>) -> RenderError {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            RenderError::Aggregate(errors)
        }
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate() {
        let single = RenderError::aggregate(vec![RenderError::UnknownHostNode(1)]);
        assert_eq!(single, RenderError::UnknownHostNode(1));

        let many = RenderError::aggregate(vec![
            RenderError::UnknownHostNode(1),
            RenderError::invalid_node("stray marker"),
        ]);
        assert_eq!(many.to_string(), "2 subtrees failed to render");
    }

    #[test]
    fn test_messages() {
        let err = RenderError::UnmountedInstance {
            instance: InstanceId(4),
        };
        assert_eq!(err.to_string(), "Component instance #4 is not mounted");
        assert_eq!(
            RenderError::from(HostError::UnknownNode(9)).to_string(),
            "Unknown host node: 9"
        );
    }
}
