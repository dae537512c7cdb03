//! Tree building and traversal over flat parent-pointer rows.

use std::collections::{HashMap, HashSet};

use hesab_shared::types::CostCenterId;

use super::error::HierarchyError;
use super::types::{CostCenter, CostCenterTreeNode};

/// Maximum parent-chain length any walk will follow.
///
/// Organizational trees are a handful of levels deep in practice; a chain
/// longer than this means the stored data already contains a cycle.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Builds the nested forest from flat rows.
///
/// Two passes: index the rows by id, then attach each row to its parent's
/// child list, or to the root list when it has no parent or its parent is
/// missing from the input (e.g., an inactive parent filtered out upstream).
/// Input is sorted by `code` first, so siblings come out in code order at
/// every level.
#[must_use]
pub fn build_tree(nodes: &[CostCenter]) -> Vec<CostCenterTreeNode> {
    let mut sorted: Vec<&CostCenter> = nodes.iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(&b.code));

    let ids: HashSet<CostCenterId> = sorted.iter().map(|n| n.id).collect();

    let mut children_of: HashMap<CostCenterId, Vec<&CostCenter>> = HashMap::new();
    let mut roots: Vec<&CostCenter> = Vec::new();

    for node in &sorted {
        match node.parent_id {
            Some(parent_id) if ids.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(node);
            }
            _ => roots.push(node),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &children_of, 0))
        .collect()
}

/// Assembles a subtree, capping depth so a corrupted parent chain cannot
/// recurse forever. Nodes past the cap are emitted as leaves.
fn assemble(
    node: &CostCenter,
    children_of: &HashMap<CostCenterId, Vec<&CostCenter>>,
    depth: usize,
) -> CostCenterTreeNode {
    let children = if depth >= MAX_HIERARCHY_DEPTH {
        Vec::new()
    } else {
        children_of
            .get(&node.id)
            .map(|kids| {
                kids.iter()
                    .map(|kid| assemble(kid, children_of, depth + 1))
                    .collect()
            })
            .unwrap_or_default()
    };

    CostCenterTreeNode {
        cost_center: node.clone(),
        children,
    }
}

/// Walks the parent chain upward from `id`, returning ancestors
/// nearest-first and excluding the node itself.
///
/// # Errors
///
/// - `NodeNotFound` if `id` is not in the node set.
/// - `CorruptHierarchy` if the chain revisits a node or exceeds
///   [`MAX_HIERARCHY_DEPTH`].
pub fn ancestors(
    nodes: &[CostCenter],
    id: CostCenterId,
) -> Result<Vec<CostCenter>, HierarchyError> {
    let by_id: HashMap<CostCenterId, &CostCenter> = nodes.iter().map(|n| (n.id, n)).collect();
    let start = by_id.get(&id).ok_or(HierarchyError::NodeNotFound(id))?;

    let mut chain = Vec::new();
    let mut visited: HashSet<CostCenterId> = HashSet::from([id]);
    let mut current = start.parent_id;

    while let Some(parent_id) = current {
        if !visited.insert(parent_id) || chain.len() >= MAX_HIERARCHY_DEPTH {
            return Err(HierarchyError::CorruptHierarchy(id));
        }

        // A dangling parent pointer ends the chain; the node is treated as
        // a root by build_tree, so ancestry stops there too.
        let Some(parent) = by_id.get(&parent_id) else {
            break;
        };

        chain.push((*parent).clone());
        current = parent.parent_id;
    }

    Ok(chain)
}

/// Collects every descendant of `id` depth-first, top-down, as a flat list.
///
/// Implemented with an explicit stack; the hierarchy depth is unbounded in
/// principle and recursion depth must not depend on it. Children are pushed
/// in reverse code order so they pop in code order.
///
/// # Errors
///
/// - `NodeNotFound` if `id` is not in the node set.
/// - `CorruptHierarchy` if a node is reached twice (preexisting cycle).
pub fn descendants(
    nodes: &[CostCenter],
    id: CostCenterId,
) -> Result<Vec<CostCenter>, HierarchyError> {
    if !nodes.iter().any(|n| n.id == id) {
        return Err(HierarchyError::NodeNotFound(id));
    }

    let mut children_of: HashMap<CostCenterId, Vec<&CostCenter>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = node.parent_id {
            children_of.entry(parent_id).or_default().push(node);
        }
    }
    for kids in children_of.values_mut() {
        kids.sort_by(|a, b| a.code.cmp(&b.code));
    }

    let mut result = Vec::new();
    let mut visited: HashSet<CostCenterId> = HashSet::from([id]);
    let mut stack: Vec<&CostCenter> = Vec::new();

    if let Some(kids) = children_of.get(&id) {
        for kid in kids.iter().rev() {
            stack.push(kid);
        }
    }

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id) {
            return Err(HierarchyError::CorruptHierarchy(id));
        }
        result.push(node.clone());

        if let Some(kids) = children_of.get(&node.id) {
            for kid in kids.iter().rev() {
                stack.push(kid);
            }
        }
    }

    Ok(result)
}

/// Validates relinking `node_id` under `new_parent_id`.
///
/// Walks upward from the proposed parent through parent links; reaching the
/// node's own id means the parent is one of its descendants and the relink
/// would close a cycle. The walk is bounded, so corrupted stored data
/// aborts defensively instead of looping.
///
/// # Errors
///
/// - `SelfParent` if the node names itself.
/// - `NodeNotFound` if the proposed parent is not in the node set.
/// - `CircularReference` if the proposed parent descends from the node.
/// - `CorruptHierarchy` if the walk exceeds the depth bound or revisits a node.
pub fn validate_new_parent(
    nodes: &[CostCenter],
    node_id: CostCenterId,
    new_parent_id: CostCenterId,
) -> Result<(), HierarchyError> {
    if node_id == new_parent_id {
        return Err(HierarchyError::SelfParent);
    }

    let by_id: HashMap<CostCenterId, &CostCenter> = nodes.iter().map(|n| (n.id, n)).collect();
    if !by_id.contains_key(&new_parent_id) {
        return Err(HierarchyError::NodeNotFound(new_parent_id));
    }

    let mut visited: HashSet<CostCenterId> = HashSet::new();
    let mut current = Some(new_parent_id);
    let mut steps = 0usize;

    while let Some(current_id) = current {
        if current_id == node_id {
            return Err(HierarchyError::CircularReference {
                node: node_id,
                parent: new_parent_id,
            });
        }

        if !visited.insert(current_id) || steps >= MAX_HIERARCHY_DEPTH {
            return Err(HierarchyError::CorruptHierarchy(new_parent_id));
        }
        steps += 1;

        current = by_id.get(&current_id).and_then(|n| n.parent_id);
    }

    Ok(())
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
