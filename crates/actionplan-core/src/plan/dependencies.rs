//! Dependency edits, guarded by the cycle check in [`crate::graph`].

use super::ActionPlan;
use crate::{
    error::{PlanError, Result},
    graph::DependencyGraph,
    models::{NodeId, NodePath},
};

impl ActionPlan {
    /// Whether the node `from` may depend on `to` without closing a cycle.
    pub fn can_add_dependency(&self, from: NodeId, to: NodeId) -> bool {
        DependencyGraph::from(self).can_add_dependency(from, to)
    }

    /// Makes the node at `path` depend on `dependency`.
    ///
    /// Adding an edge that is already present returns an equal plan.
    ///
    /// # Errors
    ///
    /// * Path resolution errors, see [`ActionPlan::resolve`]
    /// * `PlanError::NodeNotFound` - `dependency` names no node
    /// * `PlanError::CircularDependency` - the edge would close a cycle,
    ///   including a node depending on itself
    pub fn add_dependency(&self, path: &NodePath, dependency: NodeId) -> Result<ActionPlan> {
        let from = self.resolve(path)?;
        self.node(dependency)?;

        if !self.can_add_dependency(from, dependency) {
            return Err(PlanError::CircularDependency {
                from,
                to: dependency,
            });
        }

        let mut next = self.clone();
        let node = next.node_mut(from)?;
        if !node.dependencies.contains(&dependency) {
            node.dependencies.push(dependency);
        }
        Ok(next)
    }

    /// Drops `dependency` from the node at `path`.
    ///
    /// Removal cannot create a cycle and is idempotent; the target does not
    /// need to exist, so dangling references can be removed one by one.
    pub fn remove_dependency(&self, path: &NodePath, dependency: NodeId) -> Result<ActionPlan> {
        let from = self.resolve(path)?;
        let mut next = self.clone();
        next.node_mut(from)?
            .dependencies
            .retain(|dep| *dep != dependency);
        Ok(next)
    }

    /// Dependency references whose target no longer exists, as
    /// `(node, missing dependency)` pairs.
    pub fn dangling_dependencies(&self) -> Vec<(NodeId, NodeId)> {
        let mut dangling = Vec::new();
        for node in self.nodes() {
            for dep in &node.dependencies {
                if !self.contains(*dep) {
                    dangling.push((node.id, *dep));
                }
            }
        }
        dangling
    }

    /// Removes every dangling dependency reference.
    pub fn prune_dangling_dependencies(&self) -> ActionPlan {
        let mut next = self.clone();
        next.strip_dependencies(|dep| !self.contains(dep));
        next
    }

    /// Every node `id` could newly depend on without creating a cycle, in
    /// display order. Existing dependencies are left out.
    pub fn dependency_candidates(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let node = self.node(id)?;
        let graph = DependencyGraph::from(self);

        Ok(self
            .flatten()
            .into_iter()
            .map(|entry| entry.id)
            .filter(|candidate| !node.depends_on(*candidate))
            .filter(|candidate| graph.can_add_dependency(id, *candidate))
            .collect())
    }
}
