use super::*;
use hesab_shared::types::UserId;

fn node(code: &str, parent: Option<CostCenterId>) -> CostCenter {
    CostCenter {
        id: CostCenterId::new(),
        code: code.to_string(),
        name: format!("Cost center {code}"),
        description: None,
        parent_id: parent,
        is_active: true,
        created_by: UserId::new(),
        updated_by: None,
    }
}

/// A(1, root) -> B(2), C(3); B -> D(4).
fn sample_forest() -> Vec<CostCenter> {
    let a = node("1", None);
    let b = node("2", Some(a.id));
    let c = node("3", Some(a.id));
    let d = node("4", Some(b.id));
    vec![a, b, c, d]
}

#[test]
fn test_build_tree_single_root_code_order() {
    let nodes = sample_forest();
    let tree = build_tree(&nodes);

    assert_eq!(tree.len(), 1);
    let root = &tree[0];
    assert_eq!(root.cost_center.code, "1");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].cost_center.code, "2");
    assert_eq!(root.children[1].cost_center.code, "3");
    assert_eq!(root.children[0].children[0].cost_center.code, "4");
}

#[test]
fn test_build_tree_sorts_unsorted_input() {
    let mut nodes = sample_forest();
    nodes.reverse();
    let tree = build_tree(&nodes);

    assert_eq!(tree[0].children[0].cost_center.code, "2");
    assert_eq!(tree[0].children[1].cost_center.code, "3");
}

#[test]
fn test_build_tree_orphan_becomes_root() {
    // Parent not present in the input (e.g., filtered out as inactive).
    let missing_parent = CostCenterId::new();
    let orphan = node("9", Some(missing_parent));
    let root = node("1", None);

    let tree = build_tree(&[root, orphan]);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].cost_center.code, "1");
    assert_eq!(tree[1].cost_center.code, "9");
}

#[test]
fn test_build_tree_empty() {
    assert!(build_tree(&[]).is_empty());
}

#[test]
fn test_ancestors_nearest_first() {
    let nodes = sample_forest();
    let d_id = nodes[3].id;

    let chain = ancestors(&nodes, d_id).unwrap();
    let codes: Vec<&str> = chain.iter().map(|n| n.code.as_str()).collect();
    assert_eq!(codes, ["2", "1"]);
}

#[test]
fn test_ancestors_of_root_is_empty() {
    let nodes = sample_forest();
    assert!(ancestors(&nodes, nodes[0].id).unwrap().is_empty());
}

#[test]
fn test_ancestors_missing_node() {
    let nodes = sample_forest();
    assert!(matches!(
        ancestors(&nodes, CostCenterId::new()),
        Err(HierarchyError::NodeNotFound(_))
    ));
}

#[test]
fn test_ancestors_detects_cycle_in_stored_data() {
    // Corrupt two nodes into a parent cycle.
    let mut a = node("1", None);
    let b = node("2", Some(a.id));
    a.parent_id = Some(b.id);
    let c = node("3", Some(b.id));

    assert!(matches!(
        ancestors(&[a, b, c.clone()], c.id),
        Err(HierarchyError::CorruptHierarchy(_))
    ));
}

#[test]
fn test_descendants_depth_first_top_down() {
    let nodes = sample_forest();
    let a_id = nodes[0].id;

    let found = descendants(&nodes, a_id).unwrap();
    let codes: Vec<&str> = found.iter().map(|n| n.code.as_str()).collect();
    // B before its subtree, C after B's subtree.
    assert_eq!(codes, ["2", "4", "3"]);
}

#[test]
fn test_descendants_of_leaf_is_empty() {
    let nodes = sample_forest();
    let c_id = nodes[2].id;
    assert!(descendants(&nodes, c_id).unwrap().is_empty());
}

#[test]
fn test_validate_new_parent_accepts_unrelated_node() {
    let nodes = sample_forest();
    let c_id = nodes[2].id;
    let b_id = nodes[1].id;
    assert!(validate_new_parent(&nodes, c_id, b_id).is_ok());
}

#[test]
fn test_validate_new_parent_rejects_self() {
    let nodes = sample_forest();
    let a_id = nodes[0].id;
    assert!(matches!(
        validate_new_parent(&nodes, a_id, a_id),
        Err(HierarchyError::SelfParent)
    ));
}

#[test]
fn test_validate_new_parent_rejects_descendant() {
    let nodes = sample_forest();
    let a_id = nodes[0].id;
    let d_id = nodes[3].id;
    assert!(matches!(
        validate_new_parent(&nodes, a_id, d_id),
        Err(HierarchyError::CircularReference { .. })
    ));
}

#[test]
fn test_validate_new_parent_rejects_missing_parent() {
    let nodes = sample_forest();
    let a_id = nodes[0].id;
    assert!(matches!(
        validate_new_parent(&nodes, a_id, CostCenterId::new()),
        Err(HierarchyError::NodeNotFound(_))
    ));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    /// Generates a random forest of up to 40 nodes; each node picks a parent
    /// among earlier nodes (or none), so the result is always acyclic.
    fn forest_strategy() -> impl Strategy<Value = Vec<CostCenter>> {
        proptest::collection::vec(proptest::option::of(0usize..100), 1..40).prop_map(
            |parent_picks| {
                let mut nodes: Vec<CostCenter> = Vec::with_capacity(parent_picks.len());
                for (i, pick) in parent_picks.into_iter().enumerate() {
                    let parent_id = match pick {
                        Some(p) if i > 0 => Some(nodes[p % i].id),
                        _ => None,
                    };
                    nodes.push(node(&format!("{i:03}"), parent_id));
                }
                nodes
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// *For any* forest, ancestry and descent are inverse relations:
        /// x is a descendant of n iff n is an ancestor of x.
        #[test]
        fn prop_ancestors_and_descendants_are_inverse(nodes in forest_strategy()) {
            for n in &nodes {
                let down = descendants(&nodes, n.id).unwrap();
                for x in &down {
                    let up = ancestors(&nodes, x.id).unwrap();
                    prop_assert!(
                        up.iter().any(|a| a.id == n.id),
                        "{} should be an ancestor of {}",
                        n.code,
                        x.code
                    );
                }
            }
        }

        /// *For any* forest, relinking a node under any of its descendants
        /// is rejected, and relinking under a non-descendant other node
        /// succeeds.
        #[test]
        fn prop_descendant_parent_rejected(nodes in forest_strategy()) {
            for n in &nodes {
                let down = descendants(&nodes, n.id).unwrap();
                let down_ids: std::collections::HashSet<_> =
                    down.iter().map(|d| d.id).collect();

                for x in &down {
                    let result = validate_new_parent(&nodes, n.id, x.id);
                    let circular = matches!(result, Err(HierarchyError::CircularReference { .. }));
                    prop_assert!(circular, "expected CircularReference, got {result:?}");
                }

                for other in &nodes {
                    if other.id != n.id && !down_ids.contains(&other.id) {
                        prop_assert!(validate_new_parent(&nodes, n.id, other.id).is_ok());
                    }
                }
            }
        }

        /// *For any* forest, every node appears exactly once in the built tree.
        #[test]
        fn prop_build_tree_preserves_nodes(nodes in forest_strategy()) {
            let tree = build_tree(&nodes);

            let mut seen = 0usize;
            let mut stack: Vec<&CostCenterTreeNode> = tree.iter().collect();
            while let Some(tn) = stack.pop() {
                seen += 1;
                for child in &tn.children {
                    prop_assert_eq!(
                        child.cost_center.parent_id,
                        Some(tn.cost_center.id)
                    );
                }
                stack.extend(tn.children.iter());
            }
            prop_assert_eq!(seen, nodes.len());
        }
    }
}
