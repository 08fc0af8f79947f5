//! The action plan arena and its hierarchy store operations.
//!
//! [`ActionPlan`] is an immutable value: every operation borrows the current
//! plan and returns a new one, leaving the input untouched. Nodes live in a
//! flat, persistent ordered map keyed by [`NodeId`] with child id lists per
//! node, so cloning a plan to keep an undo snapshot shares structure instead
//! of copying the tree.
//!
//! ```text
//!   roots: [A1, A2]
//!   nodes: { A1 -> Action{children: [T3, T4]},
//!            T3 -> Task{parent: A1, children: [S5]},
//!            S5 -> Subtask{parent: T3, dependencies: [T4]}, ... }
//! ```
//!
//! ## Submodules
//!
//! - [`hierarchy`]: add, update, delete, move and reorder operations
//! - [`dependencies`]: dependency edits guarded by the cycle validator
//! - [`document`]: conversion to and from persisted [`PlanDocument`]s
//! - [`queries`]: derived read helpers (flatten, progress, summaries)
//!
//! # Examples
//!
//! ```rust
//! use actionplan_core::{ActionPlan, models::NodePath};
//!
//! let (plan, launch) = ActionPlan::new().add_action("Launch")?;
//! let (plan, design) = plan.add_task(launch, "Design")?;
//! let (plan, build) = plan.add_task(launch, "Build")?;
//!
//! let plan = plan.add_dependency(&NodePath::Task(launch, build), design)?;
//! assert!(plan.node(build)?.depends_on(design));
//!
//! // The reverse edge would close a cycle and is refused.
//! assert!(plan.add_dependency(&NodePath::Task(launch, design), build).is_err());
//! # Ok::<(), actionplan_core::PlanError>(())
//! ```
//!
//! [`PlanDocument`]: crate::models::PlanDocument

use im::OrdMap;

use crate::{
    error::{PlanError, Result},
    models::{Node, NodeId, NodeKind, NodePath},
};

pub mod dependencies;
pub mod document;
pub mod hierarchy;
pub mod queries;

#[cfg(test)]
mod tests;

pub use hierarchy::Direction;

/// What happens to dependency references when their target is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingPolicy {
    /// Leave references to deleted nodes in place
    #[default]
    Keep,
    /// Strip deleted ids from every remaining dependency set
    Prune,
}

/// Canonical Action tree: a flat arena of nodes plus the ordered Action ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPlan {
    nodes: OrdMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self {
            nodes: OrdMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of nodes across all levels.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Looks a node up by id, anywhere in the tree.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Like [`ActionPlan::get`] but reports a missing node as an error.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(PlanError::NodeNotFound { id })
    }

    /// Action ids in their user-defined order.
    pub fn action_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Actions in their user-defined order.
    pub fn actions(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots.iter().filter_map(move |id| self.nodes.get(id))
    }

    /// Children of a node in their stored order.
    pub fn children(&self, id: NodeId) -> Result<Vec<&Node>> {
        let node = self.node(id)?;
        Ok(node
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .collect())
    }

    /// Every node, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// The id the next created node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    /// Resolves a path to the id of the node it names.
    ///
    /// Every segment must exist, sit at the level its position implies and
    /// be a child of the previous segment.
    ///
    /// # Errors
    ///
    /// * `PlanError::NodeNotFound` - a segment names no node
    /// * `PlanError::WrongKind` - a segment names a node at another level
    /// * `PlanError::NotAChild` - a segment is not under the previous one
    pub fn resolve(&self, path: &NodePath) -> Result<NodeId> {
        let levels = [NodeKind::Action, NodeKind::Task, NodeKind::Subtask];
        let mut parent: Option<NodeId> = None;

        for (id, expected) in path.segments().into_iter().zip(levels) {
            let node = self.node(id)?;
            if node.kind != expected {
                return Err(PlanError::WrongKind {
                    id,
                    expected,
                    actual: node.kind,
                });
            }
            if let Some(parent_id) = parent {
                if node.parent != Some(parent_id) {
                    return Err(PlanError::NotAChild {
                        id,
                        parent: parent_id,
                    });
                }
            }
            parent = Some(id);
        }

        Ok(path.leaf())
    }

    /// Builds the full path of a node from its parent links.
    pub fn path_of(&self, id: NodeId) -> Result<NodePath> {
        let node = self.node(id)?;
        match (node.kind, node.parent) {
            (NodeKind::Action, _) => Ok(NodePath::Action(id)),
            (NodeKind::Task, Some(action)) => Ok(NodePath::Task(action, id)),
            (NodeKind::Subtask, Some(task)) => {
                let action = self.node(task)?.parent.ok_or(PlanError::NodeNotFound { id: task })?;
                Ok(NodePath::Subtask(action, task, id))
            }
            (_, None) => Err(PlanError::invalid_document(format!(
                "{} {id} has no parent",
                node.kind
            ))),
        }
    }

    /// Ids of a node and all of its descendants, parents before children.
    pub fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.node(id)?;
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(ids)
    }

    fn allocate_id(&mut self) -> Result<NodeId> {
        let id = NodeId(self.next_id);
        if id > NodeId::MAX {
            return Err(PlanError::IdsExhausted);
        }
        self.next_id += 1;
        Ok(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(PlanError::NodeNotFound { id })
    }

    /// The ordered sibling list a node belongs to.
    fn siblings_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>> {
        let parent = self.node(id)?.parent;
        match parent {
            None => Ok(&mut self.roots),
            Some(parent) => Ok(&mut self.node_mut(parent)?.children),
        }
    }
}
