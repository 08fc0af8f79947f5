//! Stable depth-first topological ordering of sibling nodes.

use std::collections::HashMap;

use crate::models::NodeId;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Orders `siblings` so that every node comes after the siblings it depends
/// on, where `dependencies_of` yields a node's direct dependencies.
///
/// Only edges between members of `siblings` count; dependencies on nodes
/// elsewhere are ignored. Nodes are visited in sibling order and so are
/// their dependencies, which keeps independent nodes in their original
/// relative order.
///
/// On a cycle, returns the ids along it instead.
///
/// # Examples
///
/// ```rust
/// use actionplan_core::{graph::DependencyGraph, models::NodeId, schedule::topo};
///
/// let (a, b, c) = (NodeId(1), NodeId(2), NodeId(3));
/// let graph = DependencyGraph::from_edges([(a, c)]);
///
/// let order = topo::stable_order(&[a, b, c], |id| graph.dependencies_of(id));
/// assert_eq!(order, Ok(vec![c, a, b]));
/// ```
pub fn stable_order<'g, F>(siblings: &[NodeId], dependencies_of: F) -> Result<Vec<NodeId>, Vec<NodeId>>
where
    F: Fn(NodeId) -> &'g [NodeId],
{
    let mut sorter = Sorter {
        siblings,
        dependencies_of,
        marks: HashMap::with_capacity(siblings.len()),
        stack: Vec::new(),
        order: Vec::with_capacity(siblings.len()),
    };
    for id in siblings {
        sorter.visit(*id)?;
    }
    Ok(sorter.order)
}

struct Sorter<'s, F> {
    siblings: &'s [NodeId],
    dependencies_of: F,
    marks: HashMap<NodeId, Mark>,
    stack: Vec<NodeId>,
    order: Vec<NodeId>,
}

impl<'g, F> Sorter<'_, F>
where
    F: Fn(NodeId) -> &'g [NodeId],
{
    fn visit(&mut self, id: NodeId) -> Result<(), Vec<NodeId>> {
        match self.marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = self.stack.iter().position(|n| *n == id).unwrap_or(0);
                return Err(self.stack[start..].to_vec());
            }
            None => {}
        }

        self.marks.insert(id, Mark::Visiting);
        self.stack.push(id);

        let dependencies = (self.dependencies_of)(id);
        let siblings = self.siblings;
        for dep in siblings.iter().filter(|sibling| dependencies.contains(*sibling)) {
            self.visit(*dep)?;
        }

        self.stack.pop();
        self.marks.insert(id, Mark::Done);
        self.order.push(id);
        Ok(())
    }
}
