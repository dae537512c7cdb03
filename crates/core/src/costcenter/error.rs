//! Hierarchy error types.

use hesab_shared::types::CostCenterId;
use thiserror::Error;

/// Errors that can occur during hierarchy validation and traversal.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Cost center not found in the loaded node set.
    #[error("Cost center not found: {0}")]
    NodeNotFound(CostCenterId),

    /// A node cannot be its own parent.
    #[error("Cost center cannot be its own parent")]
    SelfParent,

    /// The proposed parent is a descendant of the node being updated.
    #[error("Circular reference: {parent} is a descendant of {node}")]
    CircularReference {
        /// The node whose parent was being changed.
        node: CostCenterId,
        /// The proposed parent.
        parent: CostCenterId,
    },

    /// A parent chain exceeded the depth bound or revisited a node.
    ///
    /// Treated as evidence of a preexisting cycle in stored data; the walk
    /// aborts instead of looping.
    #[error("Corrupt hierarchy detected while walking from {0}")]
    CorruptHierarchy(CostCenterId),
}

impl HierarchyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) => "COST_CENTER_NOT_FOUND",
            Self::SelfParent => "SELF_PARENT",
            Self::CircularReference { .. } => "CIRCULAR_REFERENCE",
            Self::CorruptHierarchy(_) => "CORRUPT_HIERARCHY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let id = CostCenterId::new();
        assert_eq!(HierarchyError::SelfParent.error_code(), "SELF_PARENT");
        assert_eq!(
            HierarchyError::NodeNotFound(id).error_code(),
            "COST_CENTER_NOT_FOUND"
        );
        assert_eq!(
            HierarchyError::CircularReference {
                node: id,
                parent: CostCenterId::new()
            }
            .error_code(),
            "CIRCULAR_REFERENCE"
        );
    }
}
