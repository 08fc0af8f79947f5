//! Conversion between the arena and persisted [`PlanDocument`]s.

use super::ActionPlan;
use crate::{
    error::{PlanError, Result},
    graph::DependencyGraph,
    models::{Node, NodeId, NodeKind, NodeRecord, PlanDocument, Priority},
};

impl ActionPlan {
    /// Nested records for every Action, in display order.
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.roots
            .iter()
            .filter_map(|id| self.to_record(*id))
            .collect()
    }

    /// The whole plan in persisted form.
    pub fn to_document(&self) -> PlanDocument {
        PlanDocument {
            next_id: Some(self.next_id),
            actions: self.to_records(),
        }
    }

    fn to_record(&self, id: NodeId) -> Option<NodeRecord> {
        let node = self.nodes.get(&id)?;
        Some(NodeRecord {
            id: node.id,
            name: node.name.clone(),
            status: Some(node.status),
            completed: None,
            priority: node.priority,
            start_date: node.start_date,
            finish_date: node.finish_date,
            dependencies: node.dependencies.clone(),
            assignees: node.assignees.clone(),
            description: node.description.clone(),
            metadata: node.metadata.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.to_record(*child))
                .collect(),
        })
    }

    /// Rebuilds a plan from persisted records.
    ///
    /// Missing fields take their defaults. The document must describe a
    /// three-level tree with globally unique ids and an acyclic dependency
    /// relation.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidDocument` - nesting too deep, duplicate ids, ids
    ///   past [`NodeId::MAX`] or a dependency cycle
    pub fn from_document(document: PlanDocument) -> Result<ActionPlan> {
        let mut plan = ActionPlan::new();
        for record in document.actions {
            let id = record.id;
            plan.load_record(record, None, NodeKind::Action)?;
            plan.roots.push(id);
        }

        let highest = plan.nodes.keys().map(|id| id.0).max().unwrap_or(0);
        let counter = highest
            .checked_add(1)
            .ok_or_else(|| PlanError::invalid_document("id space exhausted"))?;
        plan.next_id = document.next_id.unwrap_or(0).max(counter).max(1);
        if plan.next_id > NodeId::MAX.0 + 1 {
            return Err(PlanError::invalid_document(format!(
                "id counter {} is past the largest node id {}",
                plan.next_id,
                NodeId::MAX
            )));
        }

        if let Some(cycle) = DependencyGraph::from(&plan).find_cycle() {
            let members: Vec<String> = cycle.iter().map(ToString::to_string).collect();
            return Err(PlanError::invalid_document(format!(
                "dependency cycle between nodes {}",
                members.join(" -> ")
            )));
        }

        Ok(plan)
    }

    /// Convenience wrapper over [`ActionPlan::from_document`] for bare
    /// Action record lists.
    pub fn from_records(actions: Vec<NodeRecord>) -> Result<ActionPlan> {
        Self::from_document(PlanDocument {
            next_id: None,
            actions,
        })
    }

    fn load_record(&mut self, record: NodeRecord, parent: Option<NodeId>, kind: NodeKind) -> Result<()> {
        let id = record.id;
        if id > NodeId::MAX {
            return Err(PlanError::invalid_document(format!(
                "node id {id} is past the largest node id {}",
                NodeId::MAX
            )));
        }
        if self.nodes.contains_key(&id) {
            return Err(PlanError::invalid_document(format!("duplicate node id {id}")));
        }

        let child_kind = match (kind.child_kind(), record.children.is_empty()) {
            (Some(child_kind), _) => Some(child_kind),
            (None, true) => None,
            (None, false) => {
                return Err(PlanError::invalid_document(format!(
                    "subtask {id} cannot have children"
                )));
            }
        };

        let mut dependencies = Vec::with_capacity(record.dependencies.len());
        for dep in &record.dependencies {
            if !dependencies.contains(dep) {
                dependencies.push(*dep);
            }
        }

        let status = record.resolved_status();
        let node = Node {
            id,
            kind,
            parent,
            name: record.name,
            status,
            priority: kind
                .has_priority()
                .then(|| record.priority.unwrap_or(Priority::Medium)),
            start_date: record.start_date,
            finish_date: record.finish_date,
            dependencies,
            children: record.children.iter().map(|child| child.id).collect(),
            assignees: record.assignees,
            description: record.description,
            metadata: record.metadata,
        };
        self.nodes.insert(id, node);

        if let Some(child_kind) = child_kind {
            for child in record.children {
                self.load_record(child, Some(id), child_kind)?;
            }
        }
        Ok(())
    }
}
