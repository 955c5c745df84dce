//! Family aggregate service
//!
//! Orchestrates the pure tree core against the document store: every
//! mutating operation loads the family, runs exactly one core operation on
//! `family.sons`, and persists the resulting forest as a whole-document
//! replace. Not-found outcomes become explicit errors here; the core itself
//! stays no-op based.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::forest::{self, ParentLookup};
use crate::domain::{Family, FamilyDraft, FamilyNode, FamilyPatch, NodeDraft, NodePatch};
use crate::infrastructure::FamilyStore;

/// Owned form of a parent lookup, suitable for returning to callers.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeParent {
    /// The node is a root; its parent is the family itself
    Root,
    /// The immediate parent node
    Node(FamilyNode),
}

/// Service managing family documents and their member forests.
pub struct FamilyService {
    store: Arc<dyn FamilyStore>,
}

impl FamilyService {
    pub fn new(store: Arc<dyn FamilyStore>) -> Self {
        Self { store }
    }

    /// Create a family document. Returns the generated id.
    pub fn create_family(&self, draft: FamilyDraft) -> ApplicationResult<String> {
        draft.validate()?;
        let family = draft.into_family();
        self.store.save(&family)?;
        debug!("create_family: id={}", family.id);
        Ok(family.id)
    }

    /// Load a family or fail with not-found.
    pub fn get_family(&self, id: &str) -> ApplicationResult<Family> {
        self.store
            .load(id)?
            .ok_or_else(|| ApplicationError::FamilyNotFound { id: id.to_string() })
    }

    /// All stored families.
    pub fn list_families(&self) -> ApplicationResult<Vec<Family>> {
        Ok(self.store.list()?)
    }

    /// Apply a partial update to the family record itself.
    pub fn update_family(&self, id: &str, patch: FamilyPatch) -> ApplicationResult<()> {
        patch.validate()?;
        let mut family = self.get_family(id)?;
        patch.apply(&mut family);
        self.store.save(&family)?;
        Ok(())
    }

    /// Delete the family document (forest included).
    pub fn delete_family(&self, id: &str) -> ApplicationResult<()> {
        // Load first so a missing family surfaces as not-found.
        self.get_family(id)?;
        self.store.delete(id)?;
        Ok(())
    }

    /// The family's forest of member nodes.
    pub fn forest(&self, family_id: &str) -> ApplicationResult<Vec<FamilyNode>> {
        Ok(self.get_family(family_id)?.sons)
    }

    /// A single member node by id, at any depth.
    pub fn get_node(&self, family_id: &str, node_id: &str) -> ApplicationResult<FamilyNode> {
        let family = self.get_family(family_id)?;
        forest::find_node(&family.sons, node_id)
            .cloned()
            .ok_or_else(|| node_not_found(family_id, node_id))
    }

    /// The immediate parent of a node, distinguishing root from not-found.
    pub fn parent_of(&self, family_id: &str, node_id: &str) -> ApplicationResult<NodeParent> {
        let family = self.get_family(family_id)?;
        match forest::find_parent(&family.sons, node_id) {
            ParentLookup::Root => Ok(NodeParent::Root),
            ParentLookup::Parent(parent) => Ok(NodeParent::Node(parent.clone())),
            ParentLookup::NotFound => Err(node_not_found(family_id, node_id)),
        }
    }

    /// Attach a new root-level node. Returns the generated node id.
    pub fn add_root_node(&self, family_id: &str, draft: NodeDraft) -> ApplicationResult<String> {
        draft.validate()?;
        let mut family = self.get_family(family_id)?;
        let node = draft.into_node();
        let id = node.id.clone();
        family.sons.push(node);
        self.store.save(&family)?;
        debug!("add_root_node: family={} node={}", family_id, id);
        Ok(id)
    }

    /// Attach a new node under an existing parent. Returns the generated id.
    ///
    /// The parent is verified before the core operation so a missing parent
    /// is an error here instead of the core's silent no-op.
    pub fn add_child_node(
        &self,
        family_id: &str,
        parent_id: &str,
        draft: NodeDraft,
    ) -> ApplicationResult<String> {
        draft.validate()?;
        let mut family = self.get_family(family_id)?;

        if forest::find_node(&family.sons, parent_id).is_none() {
            return Err(ApplicationError::ParentNotFound {
                family_id: family_id.to_string(),
                parent_id: parent_id.to_string(),
            });
        }

        let node = draft.into_node();
        let id = node.id.clone();
        family.sons = forest::add_child(std::mem::take(&mut family.sons), parent_id, node);
        self.store.save(&family)?;
        debug!(
            "add_child_node: family={} parent={} node={}",
            family_id, parent_id, id
        );
        Ok(id)
    }

    /// Apply a partial update to a node. Existence is verified first.
    pub fn update_node(
        &self,
        family_id: &str,
        node_id: &str,
        patch: NodePatch,
    ) -> ApplicationResult<()> {
        patch.validate()?;
        let mut family = self.get_family(family_id)?;

        if forest::find_node(&family.sons, node_id).is_none() {
            return Err(node_not_found(family_id, node_id));
        }

        family.sons = forest::update_node(std::mem::take(&mut family.sons), node_id, &patch);
        self.store.save(&family)?;
        Ok(())
    }

    /// Delete a node and its entire subtree. Existence is verified first.
    pub fn delete_node(&self, family_id: &str, node_id: &str) -> ApplicationResult<()> {
        let mut family = self.get_family(family_id)?;

        if forest::find_node(&family.sons, node_id).is_none() {
            return Err(node_not_found(family_id, node_id));
        }

        family.sons = forest::delete_node(std::mem::take(&mut family.sons), node_id);
        self.store.save(&family)?;
        Ok(())
    }

    /// Move a node (with its subtree) to sit immediately after another node,
    /// adopting that node's parent. Both ids are verified up front; moving a
    /// node after one of its own descendants is rejected rather than letting
    /// the core fall back to its restore path.
    pub fn move_node(
        &self,
        family_id: &str,
        active_id: &str,
        over_id: &str,
    ) -> ApplicationResult<()> {
        if active_id == over_id {
            return Ok(());
        }
        let mut family = self.get_family(family_id)?;

        let active = forest::find_node(&family.sons, active_id)
            .ok_or_else(|| node_not_found(family_id, active_id))?;
        if forest::find_node(std::slice::from_ref(active), over_id).is_some() {
            return Err(ApplicationError::MoveIntoOwnSubtree {
                active_id: active_id.to_string(),
                over_id: over_id.to_string(),
            });
        }
        if forest::find_node(&family.sons, over_id).is_none() {
            return Err(node_not_found(family_id, over_id));
        }

        family.sons = forest::move_node(std::mem::take(&mut family.sons), active_id, over_id);
        self.store.save(&family)?;
        debug!(
            "move_node: family={} active={} over={}",
            family_id, active_id, over_id
        );
        Ok(())
    }

    /// Total member count across all depths.
    pub fn count_members(&self, family_id: &str) -> ApplicationResult<usize> {
        let family = self.get_family(family_id)?;
        Ok(forest::count_nodes(&family.sons))
    }

    /// Every member id, in pre-order.
    pub fn member_ids(&self, family_id: &str) -> ApplicationResult<Vec<String>> {
        let family = self.get_family(family_id)?;
        Ok(forest::collect_node_ids(&family.sons))
    }
}

fn node_not_found(family_id: &str, node_id: &str) -> ApplicationError {
    ApplicationError::NodeNotFound {
        family_id: family_id.to_string(),
        node_id: node_id.to_string(),
    }
}
