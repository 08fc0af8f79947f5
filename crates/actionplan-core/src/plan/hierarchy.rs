//! Structural operations: add, update, delete, move and reorder.

use std::{collections::HashSet, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ActionPlan, DanglingPolicy};
use crate::{
    error::{PlanError, Result},
    models::{FieldUpdate, Node, NodeId, NodeKind, NodePath},
};

/// Direction for swapping a node with its neighbouring sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!("Invalid direction: {s}")),
        }
    }
}

impl ActionPlan {
    /// Appends a new Action with default fields and no Tasks.
    ///
    /// # Errors
    ///
    /// * `PlanError::IdsExhausted` - every node id has been used
    pub fn add_action(&self, name: impl Into<String>) -> Result<(ActionPlan, NodeId)> {
        let mut next = self.clone();
        let id = next.allocate_id()?;
        next.nodes.insert(id, Node::new(id, NodeKind::Action, None, name));
        next.roots.push(id);
        Ok((next, id))
    }

    /// Appends a new Task under an Action.
    ///
    /// # Errors
    ///
    /// * `PlanError::NodeNotFound` - no Action with that id
    /// * `PlanError::WrongKind` - the id names a Task or Subtask
    pub fn add_task(&self, action: NodeId, name: impl Into<String>) -> Result<(ActionPlan, NodeId)> {
        self.add_child(&NodePath::Action(action), name)
    }

    /// Appends a new Subtask under a Task of an Action.
    ///
    /// # Errors
    ///
    /// * `PlanError::NodeNotFound` - the Action or Task does not exist
    /// * `PlanError::NotAChild` - the Task belongs to another Action
    pub fn add_subtask(
        &self,
        action: NodeId,
        task: NodeId,
        name: impl Into<String>,
    ) -> Result<(ActionPlan, NodeId)> {
        self.add_child(&NodePath::Task(action, task), name)
    }

    /// Appends a child one level below the node at `parent`.
    pub fn add_child(&self, parent: &NodePath, name: impl Into<String>) -> Result<(ActionPlan, NodeId)> {
        let parent_id = self.resolve(parent)?;
        let kind = parent.kind().child_kind().ok_or_else(|| {
            PlanError::invalid_input("parent").with_reason("Subtasks cannot contain children")
        })?;

        let mut next = self.clone();
        let id = next.allocate_id()?;
        next.nodes.insert(id, Node::new(id, kind, Some(parent_id), name));
        next.node_mut(parent_id)?.children.push(id);
        Ok((next, id))
    }

    /// Sets one field on the node at `path`.
    ///
    /// # Errors
    ///
    /// * Path resolution errors, see [`ActionPlan::resolve`]
    /// * `PlanError::InvalidInput` - the field does not apply to this node
    pub fn update_field(&self, path: &NodePath, update: FieldUpdate) -> Result<ActionPlan> {
        let id = self.resolve(path)?;
        let mut next = self.clone();
        update.apply(next.node_mut(id)?)?;
        Ok(next)
    }

    /// Removes the node at `path` together with its subtree.
    ///
    /// References to the removed ids held by other nodes are left in place;
    /// see [`ActionPlan::delete_node_with`] to prune them as well.
    pub fn delete_node(&self, path: &NodePath) -> Result<ActionPlan> {
        self.delete_node_with(path, DanglingPolicy::Keep)
    }

    /// Removes the node at `path` and its subtree, applying `policy` to
    /// dependency references that pointed into the removed subtree.
    pub fn delete_node_with(&self, path: &NodePath, policy: DanglingPolicy) -> Result<ActionPlan> {
        let id = self.resolve(path)?;
        let removed = self.subtree(id)?;

        let mut next = self.clone();
        next.siblings_mut(id)?.retain(|sibling| *sibling != id);
        for node_id in &removed {
            next.nodes.remove(node_id);
        }

        if policy == DanglingPolicy::Prune {
            let removed: HashSet<NodeId> = removed.into_iter().collect();
            next.strip_dependencies(|dep| removed.contains(&dep));
        }

        Ok(next)
    }

    /// Swaps the node at `path` with its previous or next sibling.
    ///
    /// Moving the first node up or the last node down returns an unchanged
    /// plan.
    pub fn move_sibling(&self, path: &NodePath, direction: Direction) -> Result<ActionPlan> {
        let id = self.resolve(path)?;
        let mut next = self.clone();
        let siblings = next.siblings_mut(id)?;

        let index = siblings
            .iter()
            .position(|sibling| *sibling == id)
            .ok_or(PlanError::NodeNotFound { id })?;
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|target| *target < siblings.len()),
        };

        match target {
            Some(target) => {
                siblings.swap(index, target);
                Ok(next)
            }
            None => Ok(self.clone()),
        }
    }

    /// Reorders the Actions to match `ordered`, which must be a permutation
    /// of the current Action ids.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidInput` - `ordered` has missing, extra or repeated ids
    pub fn reorder_actions(&self, ordered: &[NodeId]) -> Result<ActionPlan> {
        let current: HashSet<NodeId> = self.roots.iter().copied().collect();
        let proposed: HashSet<NodeId> = ordered.iter().copied().collect();

        if ordered.len() != self.roots.len() || proposed.len() != ordered.len() || proposed != current
        {
            return Err(PlanError::invalid_input("order").with_reason(format!(
                "Expected a permutation of the {} action ids",
                self.roots.len()
            )));
        }

        let mut next = self.clone();
        next.roots = ordered.to_vec();
        Ok(next)
    }

    /// Overwrites both dates of a node in place.
    pub(crate) fn set_dates(&mut self, id: NodeId, start: Date, finish: Date) -> Result<()> {
        let node = self.node_mut(id)?;
        node.start_date = Some(start);
        node.finish_date = Some(finish);
        Ok(())
    }

    /// Removes every dependency id matching `predicate` from all nodes.
    pub(crate) fn strip_dependencies<F>(&mut self, predicate: F)
    where
        F: Fn(NodeId) -> bool,
    {
        let affected: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| node.dependencies.iter().any(|dep| predicate(*dep)))
            .map(|node| node.id)
            .collect();

        for id in affected {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.dependencies.retain(|dep| !predicate(*dep));
            }
        }
    }
}
