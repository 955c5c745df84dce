//! Tests for the pure forest operations (query, mutation, counting)

use chrono::Utc;
use rstest::{fixture, rstest};

use famtree::domain::forest::{
    add_child, collect_node_ids, count_nodes, delete_node, find_node, find_parent, update_node,
    ParentLookup,
};
use famtree::domain::{FamilyNode, NodePatch};

fn node(id: &str, sons: Vec<FamilyNode>) -> FamilyNode {
    let now = Utc::now();
    FamilyNode {
        id: id.to_string(),
        dni: 1,
        name: id.to_string(),
        description: None,
        custom_fields: Vec::new(),
        sons,
        birthdate: now,
        created_at: now,
    }
}

/// a
/// ├── b
/// │   └── d
/// └── c
/// e
#[fixture]
fn forest() -> Vec<FamilyNode> {
    vec![
        node("a", vec![node("b", vec![node("d", vec![])]), node("c", vec![])]),
        node("e", vec![]),
    ]
}

/// Six levels deep: r0 → r1 → r2 → r3 → r4 → r5
#[fixture]
fn deep_forest() -> Vec<FamilyNode> {
    let mut current = node("r5", vec![]);
    for depth in (0..5).rev() {
        current = node(&format!("r{depth}"), vec![current]);
    }
    vec![current]
}

// ============================================================
// Query
// ============================================================

#[rstest]
fn given_node_at_root_when_finding_then_returns_it(forest: Vec<FamilyNode>) {
    let found = find_node(&forest, "a").expect("a is a root");
    assert_eq!(found.id, "a");
}

#[rstest]
#[case("b")]
#[case("c")]
#[case("d")]
fn given_nested_node_when_finding_then_returns_it(forest: Vec<FamilyNode>, #[case] id: &str) {
    let found = find_node(&forest, id).expect("node exists");
    assert_eq!(found.id, id);
}

#[rstest]
fn given_absent_id_when_finding_then_returns_none(forest: Vec<FamilyNode>) {
    assert!(find_node(&forest, "z").is_none());
}

#[rstest]
fn given_deep_tree_when_finding_then_depth_does_not_matter(deep_forest: Vec<FamilyNode>) {
    assert_eq!(find_node(&deep_forest, "r0").map(|n| n.id.as_str()), Some("r0"));
    assert_eq!(find_node(&deep_forest, "r1").map(|n| n.id.as_str()), Some("r1"));
    assert_eq!(find_node(&deep_forest, "r5").map(|n| n.id.as_str()), Some("r5"));
}

#[rstest]
fn given_root_child_when_looking_up_parent_then_returns_root_sentinel(forest: Vec<FamilyNode>) {
    assert_eq!(find_parent(&forest, "a"), ParentLookup::Root);
    assert_eq!(find_parent(&forest, "e"), ParentLookup::Root);
}

#[rstest]
fn given_nested_child_when_looking_up_parent_then_returns_parent_node(forest: Vec<FamilyNode>) {
    match find_parent(&forest, "d") {
        ParentLookup::Parent(parent) => assert_eq!(parent.id, "b"),
        other => panic!("expected Parent(b), got {:?}", other),
    }
}

#[rstest]
fn given_absent_child_when_looking_up_parent_then_returns_not_found(forest: Vec<FamilyNode>) {
    assert_eq!(find_parent(&forest, "z"), ParentLookup::NotFound);
}

#[rstest]
fn given_forest_when_collecting_ids_then_preorder_at_every_depth(forest: Vec<FamilyNode>) {
    assert_eq!(collect_node_ids(&forest), vec!["a", "b", "d", "c", "e"]);
}

#[test]
fn given_empty_forest_when_collecting_ids_then_empty() {
    assert!(collect_node_ids(&[]).is_empty());
}

// ============================================================
// Counting
// ============================================================

#[test]
fn given_empty_forest_when_counting_then_zero() {
    assert_eq!(count_nodes(&[]), 0);
}

#[test]
fn given_nested_forest_when_counting_then_counts_all_depths() {
    // [{A, sons:[{B, sons:[{D}]}, {C}]}] -> 4
    let forest = vec![node(
        "A",
        vec![node("B", vec![node("D", vec![])]), node("C", vec![])],
    )];
    assert_eq!(count_nodes(&forest), 4);
}

// ============================================================
// Update
// ============================================================

#[rstest]
fn given_partial_patch_when_updating_then_other_fields_unchanged(forest: Vec<FamilyNode>) {
    let patch = NodePatch {
        name: Some("Updated".to_string()),
        ..Default::default()
    };
    let result = update_node(forest, "b", &patch);

    let updated = find_node(&result, "b").expect("b still present");
    assert_eq!(updated.name, "Updated");
    assert_eq!(updated.dni, 1);
    assert_eq!(updated.sons.len(), 1, "children untouched");
    assert_eq!(find_node(&result, "a").map(|n| n.name.as_str()), Some("a"));
}

#[rstest]
fn given_absent_id_when_updating_then_forest_unchanged(forest: Vec<FamilyNode>) {
    let before = forest.clone();
    let patch = NodePatch {
        name: Some("ghost".to_string()),
        ..Default::default()
    };
    assert_eq!(update_node(forest, "z", &patch), before);
}

// ============================================================
// Delete
// ============================================================

#[test]
fn given_root_with_children_when_deleting_then_subtree_goes_too() {
    // deleting A removes B as well, B is not promoted to root
    let forest = vec![node("A", vec![node("B", vec![])])];
    assert!(delete_node(forest, "A").is_empty());
}

#[rstest]
fn given_mid_depth_node_when_deleting_then_only_its_subtree_is_removed(forest: Vec<FamilyNode>) {
    let result = delete_node(forest, "b");
    assert!(find_node(&result, "b").is_none());
    assert!(find_node(&result, "d").is_none(), "descendant deleted too");
    assert_eq!(collect_node_ids(&result), vec!["a", "c", "e"]);
}

#[rstest]
fn given_absent_id_when_deleting_then_forest_unchanged(forest: Vec<FamilyNode>) {
    let before = forest.clone();
    assert_eq!(delete_node(forest, "z"), before);
}

#[rstest]
fn given_any_delete_when_counting_then_never_grows(forest: Vec<FamilyNode>) {
    let before = count_nodes(&forest);
    let after_present = count_nodes(&delete_node(forest.clone(), "b"));
    let after_absent = count_nodes(&delete_node(forest, "z"));

    assert!(after_present < before);
    assert_eq!(after_absent, before, "equality only when the id is absent");
}

// ============================================================
// Add child
// ============================================================

#[test]
fn given_existing_parent_when_adding_child_then_appended_last() {
    let forest = vec![node("A", vec![node("B", vec![])])];
    let result = add_child(forest, "A", node("C", vec![]));

    let parent = find_node(&result, "A").expect("parent present");
    let child_ids: Vec<_> = parent.sons.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(child_ids, vec!["B", "C"], "new child becomes last sibling");
}

#[rstest]
fn given_nested_parent_when_adding_child_then_count_grows_by_subtree(forest: Vec<FamilyNode>) {
    let before = count_nodes(&forest);
    let subtree = node("x", vec![node("y", vec![])]);

    let result = add_child(forest, "d", subtree);
    assert_eq!(count_nodes(&result), before + 2);
    assert_eq!(
        find_node(&result, "d").map(|n| n.sons.len()),
        Some(1),
        "subtree hangs under d"
    );
}

#[rstest]
fn given_absent_parent_when_adding_child_then_forest_unchanged(forest: Vec<FamilyNode>) {
    let before = forest.clone();
    assert_eq!(add_child(forest, "z", node("x", vec![])), before);
}
