//! Pure tree operations over a family forest.
//!
//! Every function here is a pure value transformation: it consumes or borrows
//! a forest and returns the result without touching storage. Collaborators
//! (the service layer) are responsible for loading the family document first
//! and persisting the returned forest as a whole-document replace afterwards.
//!
//! Absent ids are handled as silent no-ops, never as errors; callers that
//! need not-found semantics check existence with [`find_node`] up front.

use crate::domain::entities::{FamilyNode, NodePatch};

/// Result of looking up a node's immediate parent.
///
/// "The child is a root" (its parent is the family itself, not a node) is
/// deliberately distinct from "the child id does not exist anywhere".
#[derive(Debug, PartialEq)]
pub enum ParentLookup<'a> {
    /// The child is a root-level node
    Root,
    /// The child hangs under this node
    Parent(&'a FamilyNode),
    /// No node with the child id exists in the forest
    NotFound,
}

/// Find a node by id anywhere in the forest.
///
/// Pre-order depth-first: a node is checked before its descendants, first
/// match wins. Ids are unique across the forest, so at most one node matches.
pub fn find_node<'a>(forest: &'a [FamilyNode], id: &str) -> Option<&'a FamilyNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.sons, id) {
            return Some(found);
        }
    }
    None
}

/// Find the immediate parent of the node with `child_id`.
pub fn find_parent<'a>(forest: &'a [FamilyNode], child_id: &str) -> ParentLookup<'a> {
    if forest.iter().any(|node| node.id == child_id) {
        return ParentLookup::Root;
    }
    match parent_below(forest, child_id) {
        Some(parent) => ParentLookup::Parent(parent),
        None => ParentLookup::NotFound,
    }
}

fn parent_below<'a>(nodes: &'a [FamilyNode], child_id: &str) -> Option<&'a FamilyNode> {
    for node in nodes {
        if node.sons.iter().any(|son| son.id == child_id) {
            return Some(node);
        }
        if let Some(found) = parent_below(&node.sons, child_id) {
            return Some(found);
        }
    }
    None
}

/// Collect every node id at every depth, in pre-order.
pub fn collect_node_ids(forest: &[FamilyNode]) -> Vec<String> {
    let mut ids = Vec::new();
    push_ids(forest, &mut ids);
    ids
}

fn push_ids(nodes: &[FamilyNode], ids: &mut Vec<String>) {
    for node in nodes {
        ids.push(node.id.clone());
        push_ids(&node.sons, ids);
    }
}

/// Count all nodes across all depths. An empty forest counts 0.
pub fn count_nodes(forest: &[FamilyNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.sons))
        .sum()
}

/// Merge `patch` into the node matching `id`, leaving everything else as is.
///
/// Fields absent from the patch are unchanged. Silent no-op when no node
/// matches.
pub fn update_node(forest: Vec<FamilyNode>, id: &str, patch: &NodePatch) -> Vec<FamilyNode> {
    forest
        .into_iter()
        .map(|mut node| {
            if node.id == id {
                patch.apply(&mut node);
            } else {
                node.sons = update_node(node.sons, id, patch);
            }
            node
        })
        .collect()
}

/// Remove the node matching `id` together with its entire subtree.
///
/// Children are deleted along with their ancestor, never promoted to the
/// grandparent. Every sibling list is filtered independently, which deletes
/// at any depth in a single traversal. Silent no-op when `id` is absent.
pub fn delete_node(forest: Vec<FamilyNode>, id: &str) -> Vec<FamilyNode> {
    forest
        .into_iter()
        .filter(|node| node.id != id)
        .map(|mut node| {
            node.sons = delete_node(node.sons, id);
            node
        })
        .collect()
}

/// Append `child` to the end of the `sons` of the node matching `parent_id`.
///
/// Existing sibling order is preserved; the new child becomes last. Silent
/// no-op when the parent is absent — callers verify parent existence first.
pub fn add_child(forest: Vec<FamilyNode>, parent_id: &str, child: FamilyNode) -> Vec<FamilyNode> {
    let mut pending = Some(child);
    attach_child(forest, parent_id, &mut pending)
}

fn attach_child(
    nodes: Vec<FamilyNode>,
    parent_id: &str,
    pending: &mut Option<FamilyNode>,
) -> Vec<FamilyNode> {
    nodes
        .into_iter()
        .map(|mut node| {
            if pending.is_some() {
                if node.id == parent_id {
                    if let Some(child) = pending.take() {
                        node.sons.push(child);
                    }
                } else {
                    node.sons = attach_child(node.sons, parent_id, pending);
                }
            }
            node
        })
        .collect()
}

/// Relocate the node matching `active_id` (with its whole subtree) so that it
/// becomes the sibling immediately following the node matching `over_id`.
///
/// The moved node adopts `over_id`'s parent, or becomes a root when `over_id`
/// is a root. Descendants of the moved node are carried along untouched.
///
/// No-op cases, each returning a forest equal to the input:
/// - `active_id == over_id` (self-move),
/// - `active_id` not present,
/// - `over_id` not locatable once `active_id` is detached (e.g. `over_id`
///   sits inside the moved subtree) — the original forest is restored rather
///   than dropping the detached node.
pub fn move_node(forest: Vec<FamilyNode>, active_id: &str, over_id: &str) -> Vec<FamilyNode> {
    if active_id == over_id {
        return forest;
    }

    // Kept so the forest can be restored when the splice target is lost.
    let original = forest.clone();
    let before = count_nodes(&original);

    let mut captured = None;
    let detached = detach_node(forest, active_id, &mut captured);
    let Some(moved) = captured else {
        return detached;
    };

    let mut pending = Some(moved);
    let spliced = splice_after(detached, over_id, &mut pending);
    if pending.is_some() {
        return original;
    }

    debug_assert_eq!(count_nodes(&spliced), before);
    spliced
}

/// Filter out the node matching `id` at every level, capturing it at most
/// once. Subtrees are not descended into after the capture.
fn detach_node(
    nodes: Vec<FamilyNode>,
    id: &str,
    captured: &mut Option<FamilyNode>,
) -> Vec<FamilyNode> {
    let mut result = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        if captured.is_none() && node.id == id {
            *captured = Some(node);
            continue;
        }
        if captured.is_none() {
            node.sons = detach_node(node.sons, id, captured);
        }
        result.push(node);
    }
    result
}

/// Insert the pending node immediately after the node matching `over_id`,
/// in that node's own sibling sequence. Exactly one insertion happens even
/// if traversal could in theory meet `over_id` again.
fn splice_after(
    nodes: Vec<FamilyNode>,
    over_id: &str,
    pending: &mut Option<FamilyNode>,
) -> Vec<FamilyNode> {
    let mut result = Vec::with_capacity(nodes.len() + 1);
    for mut node in nodes {
        let is_target = node.id == over_id;
        if pending.is_some() && !is_target {
            node.sons = splice_after(node.sons, over_id, pending);
        }
        result.push(node);
        if is_target {
            if let Some(moved) = pending.take() {
                result.push(moved);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn find_checks_node_before_descendants() {
        let forest = vec![node("a", vec![node("b", vec![])])];
        assert_eq!(find_node(&forest, "a").map(|n| n.id.as_str()), Some("a"));
        assert_eq!(find_node(&forest, "b").map(|n| n.id.as_str()), Some("b"));
        assert!(find_node(&forest, "z").is_none());
    }

    #[test]
    fn parent_lookup_distinguishes_root_from_absent() {
        let forest = vec![node("a", vec![node("b", vec![])])];
        assert_eq!(find_parent(&forest, "a"), ParentLookup::Root);
        assert!(matches!(
            find_parent(&forest, "b"),
            ParentLookup::Parent(p) if p.id == "a"
        ));
        assert_eq!(find_parent(&forest, "z"), ParentLookup::NotFound);
    }

    #[test]
    fn delete_removes_whole_subtree() {
        let forest = vec![node("a", vec![node("b", vec![])])];
        assert!(delete_node(forest, "a").is_empty());
    }

    #[test]
    fn add_child_appends_exactly_once() {
        let forest = vec![node("a", vec![node("a2", vec![])]), node("b", vec![])];
        let result = add_child(forest, "b", node("c", vec![]));
        assert_eq!(count_nodes(&result), 4);
        assert_eq!(result[1].sons.len(), 1);
        assert_eq!(result[1].sons[0].id, "c");
    }
}
