//! Dependency graph validation.
//!
//! The dependency relation is a directed graph over the single global id
//! space: an edge `u -> v` means "u depends on v". Tree position plays no
//! part, so a Task may depend on a Subtask of another Action. The graph must
//! stay acyclic, which is checked before any edge is added: `u -> v` is safe
//! exactly when `v` cannot already reach `u`.
//!
//! References to ids that no longer exist are tolerated; they simply have no
//! outgoing edges.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{models::NodeId, plan::ActionPlan};

/// Read-only adjacency view of the dependency relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<NodeId, Vec<NodeId>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(from, to)` pairs, meaning `from` depends on `to`.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.insert_edge(from, to);
        }
        graph
    }

    /// Records an edge without checking it. Duplicate edges are ignored.
    pub fn insert_edge(&mut self, from: NodeId, to: NodeId) {
        let targets = self.edges.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Direct dependencies of a node.
    pub fn dependencies_of(&self, id: NodeId) -> &[NodeId] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `target` is reachable from `start` by following dependency
    /// edges. A node always reaches itself.
    pub fn reaches(&self, start: NodeId, target: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(
                self.dependencies_of(current)
                    .iter()
                    .filter(|next| !visited.contains(*next)),
            );
        }

        false
    }

    /// Whether `from` may start depending on `to` without closing a cycle.
    ///
    /// Self-dependencies are always refused.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::{graph::DependencyGraph, models::NodeId};
    ///
    /// let (a, b, c) = (NodeId(1), NodeId(2), NodeId(3));
    /// let graph = DependencyGraph::from_edges([(a, b), (b, c)]);
    ///
    /// assert!(graph.can_add_dependency(a, c));
    /// assert!(!graph.can_add_dependency(c, a));
    /// assert!(!graph.can_add_dependency(b, b));
    /// ```
    pub fn can_add_dependency(&self, from: NodeId, to: NodeId) -> bool {
        !self.reaches(to, from)
    }

    pub fn is_acyclic(&self) -> bool {
        self.find_cycle().is_none()
    }

    /// Finds one cycle, returned as the ids along it in edge order.
    pub fn find_cycle(&self) -> Option<Vec<NodeId>> {
        let mut finder = CycleFinder {
            graph: self,
            state: HashMap::new(),
            path: Vec::new(),
        };
        self.edges
            .keys()
            .find_map(|start| finder.visit(*start))
    }
}

impl From<&ActionPlan> for DependencyGraph {
    fn from(plan: &ActionPlan) -> Self {
        Self {
            edges: plan
                .nodes()
                .filter(|node| !node.dependencies.is_empty())
                .map(|node| (node.id, node.dependencies.clone()))
                .collect(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Finished,
}

struct CycleFinder<'a> {
    graph: &'a DependencyGraph,
    state: HashMap<NodeId, Visit>,
    path: Vec<NodeId>,
}

impl CycleFinder<'_> {
    fn visit(&mut self, id: NodeId) -> Option<Vec<NodeId>> {
        match self.state.get(&id) {
            Some(Visit::Finished) => return None,
            Some(Visit::InProgress) => {
                let start = self.path.iter().position(|node| *node == id).unwrap_or(0);
                return Some(self.path[start..].to_vec());
            }
            None => {}
        }

        self.state.insert(id, Visit::InProgress);
        self.path.push(id);
        let graph = self.graph;
        for next in graph.dependencies_of(id) {
            if let Some(cycle) = self.visit(*next) {
                return Some(cycle);
            }
        }
        self.path.pop();
        self.state.insert(id, Visit::Finished);
        None
    }
}
