//! Cost center hierarchy and traversal.
//!
//! Cost centers are stored as flat parent-pointer rows and assembled into a
//! forest on demand. Every traversal bounds its iteration, since the stored
//! hierarchy is mutable external data that could already contain a cycle.

pub mod error;
pub mod tree;
pub mod types;

pub use error::HierarchyError;
pub use tree::{
    ancestors, build_tree, descendants, validate_new_parent, MAX_HIERARCHY_DEPTH,
};
pub use types::{CostCenter, CostCenterTreeNode};
