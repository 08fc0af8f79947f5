//! Derived, read-only helpers for presentation layers.

use super::ActionPlan;
use crate::{
    error::Result,
    models::{ActionSummary, FlatNode, NodeId, NodeKind, NodePath},
};

impl ActionPlan {
    /// Lists every node in display order: each Action, then its Tasks, each
    /// Task followed by its Subtasks.
    pub fn flatten(&self) -> Vec<FlatNode> {
        let mut flat = Vec::with_capacity(self.len());
        for action in self.actions() {
            let action_path = NodePath::Action(action.id);
            flat.push(FlatNode {
                id: action.id,
                name: action.name.clone(),
                kind: NodeKind::Action,
                path: action_path,
            });
            for task in self.children(action.id).unwrap_or_default() {
                flat.push(FlatNode {
                    id: task.id,
                    name: task.name.clone(),
                    kind: NodeKind::Task,
                    path: NodePath::Task(action.id, task.id),
                });
                for subtask in self.children(task.id).unwrap_or_default() {
                    flat.push(FlatNode {
                        id: subtask.id,
                        name: subtask.name.clone(),
                        kind: NodeKind::Subtask,
                        path: NodePath::Subtask(action.id, task.id, subtask.id),
                    });
                }
            }
        }
        flat
    }

    /// Share of completed children, `round(100 * completed / total)`.
    ///
    /// Nodes without children report 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::{ActionPlan, models::{FieldUpdate, NodePath, Status}};
    ///
    /// let (plan, action) = ActionPlan::new().add_action("Ship")?;
    /// let (plan, a) = plan.add_task(action, "a")?;
    /// let (plan, _) = plan.add_task(action, "b")?;
    /// let (plan, _) = plan.add_task(action, "c")?;
    /// assert_eq!(plan.percent_complete(action)?, 0);
    ///
    /// let plan = plan.update_field(&NodePath::Task(action, a), FieldUpdate::Status(Status::Completed))?;
    /// assert_eq!(plan.percent_complete(action)?, 33);
    /// # Ok::<(), actionplan_core::PlanError>(())
    /// ```
    pub fn percent_complete(&self, id: NodeId) -> Result<u8> {
        let children = self.children(id)?;
        let total = children.len() as u32;
        let completed = children.iter().filter(|child| child.is_completed()).count() as u32;
        Ok(rounded_percent(completed, total))
    }

    /// One summary per Action, in display order.
    pub fn action_summaries(&self) -> Vec<ActionSummary> {
        self.actions()
            .map(|action| {
                let tasks = self.children(action.id).unwrap_or_default();
                let total_tasks = tasks.len() as u32;
                let completed_tasks = tasks.iter().filter(|task| task.is_completed()).count() as u32;
                let total_subtasks = tasks.iter().map(|task| task.children.len() as u32).sum();

                ActionSummary {
                    id: action.id,
                    name: action.name.clone(),
                    status: action.status,
                    priority: action.priority,
                    start_date: action.start_date,
                    finish_date: action.finish_date,
                    total_tasks,
                    completed_tasks,
                    total_subtasks,
                    percent_complete: rounded_percent(completed_tasks, total_tasks),
                }
            })
            .collect()
    }
}

fn rounded_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (u64::from(completed), u64::from(total));
    ((200 * completed + total) / (2 * total)).min(100) as u8
}
