//! Cost center domain types.

use hesab_shared::types::{CostCenterId, UserId};
use serde::{Deserialize, Serialize};

/// A node in the cost center hierarchy.
///
/// The parent link is a weak back-reference; the nested form exists only in
/// memory (see [`CostCenterTreeNode`]) and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenter {
    /// Unique identifier.
    pub id: CostCenterId,
    /// Unique code used for sibling ordering (e.g., "WH-01").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent node, or None for a root.
    pub parent_id: Option<CostCenterId>,
    /// Whether postings may be tagged to this node.
    pub is_active: bool,
    /// Actor who created the node.
    pub created_by: UserId,
    /// Actor who last updated the node.
    pub updated_by: Option<UserId>,
}

impl CostCenter {
    /// Returns true if this node has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A cost center with its nested children, built on demand from flat rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenterTreeNode {
    /// The node itself.
    #[serde(flatten)]
    pub cost_center: CostCenter,
    /// Child nodes in ascending code order.
    pub children: Vec<CostCenterTreeNode>,
}
