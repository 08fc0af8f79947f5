//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use super::datetime::DateRange;
use crate::{
    models::{ActionSummary, FlatNode, Status, StoredPlanInfo},
    plan::ActionPlan,
};

/// Whole plan as a markdown outline: one section per Action, Tasks and
/// Subtasks as a nested list.
pub struct PlanOutline<'a> {
    pub name: &'a str,
    pub plan: &'a ActionPlan,
}

impl<'a> PlanOutline<'a> {
    pub fn new(name: &'a str, plan: &'a ActionPlan) -> Self {
        Self { name, plan }
    }
}

impl fmt::Display for PlanOutline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        if self.plan.action_ids().is_empty() {
            return writeln!(f, "No actions in this plan.");
        }

        for action in self.plan.actions() {
            writeln!(
                f,
                "## {}. {} ({})",
                action.id,
                action.name,
                action.status.with_icon()
            )?;
            writeln!(f)?;
            if let Some(priority) = action.priority {
                writeln!(f, "- **Priority**: {priority}")?;
            }
            writeln!(
                f,
                "- **Window**: {}",
                DateRange(&action.start_date, &action.finish_date)
            )?;
            let percent = self.plan.percent_complete(action.id).unwrap_or(0);
            writeln!(f, "- **Progress**: {percent}%")?;
            if !action.dependencies.is_empty() {
                let deps: Vec<String> =
                    action.dependencies.iter().map(ToString::to_string).collect();
                writeln!(f, "- **Depends on**: {}", deps.join(", "))?;
            }
            if let Some(description) = &action.description {
                writeln!(f)?;
                writeln!(f, "{description}")?;
            }
            writeln!(f)?;

            let tasks = self.plan.children(action.id).unwrap_or_default();
            if tasks.is_empty() {
                writeln!(f, "No tasks yet.")?;
                writeln!(f)?;
                continue;
            }
            for task in tasks {
                writeln!(f, "- {task}")?;
                for subtask in self.plan.children(task.id).unwrap_or_default() {
                    writeln!(f, "  - {subtask}")?;
                }
            }
            writeln!(f)?;
        }

        let dangling = self.plan.dangling_dependencies();
        if !dangling.is_empty() {
            writeln!(f, "## Dangling dependencies")?;
            writeln!(f)?;
            for (node, missing) in dangling {
                writeln!(f, "- {node} depends on deleted node {missing}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Every node as one markdown table row, in display order.
pub struct PlanTable<'a>(pub &'a ActionPlan);

impl fmt::Display for PlanTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No actions in this plan.");
        }

        writeln!(f, "| Path | Name | Status | Priority | Start | Finish | Depends on |")?;
        writeln!(f, "|------|------|--------|----------|-------|--------|------------|")?;
        for flat in self.0.flatten() {
            let Some(node) = self.0.get(flat.id) else {
                continue;
            };
            let deps: Vec<String> = node.dependencies.iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "| `{}` | {}{} | {} | {} | {} | {} | {} |",
                flat.path,
                "· ".repeat(flat.depth()),
                node.name,
                node.status,
                node.priority.map(|p| p.as_str()).unwrap_or("-"),
                node.start_date.map(|d| d.to_string()).unwrap_or_default(),
                node.finish_date.map(|d| d.to_string()).unwrap_or_default(),
                deps.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Tasks grouped into one column per status.
pub struct StatusBoard<'a>(pub &'a ActionPlan);

impl fmt::Display for StatusBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = [
            Status::NotStarted,
            Status::InProgress,
            Status::Blocked,
            Status::Completed,
        ];

        for status in columns {
            writeln!(f, "## {}", status.with_icon())?;
            writeln!(f)?;
            let mut empty = true;
            for action in self.0.actions() {
                for task in self.0.children(action.id).unwrap_or_default() {
                    if task.status == status {
                        writeln!(f, "- {} › {} (ID: {})", action.name, task.name, task.id)?;
                        empty = false;
                    }
                }
            }
            if empty {
                writeln!(f, "Nothing here.")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying stored plans.
pub struct StoredPlans(pub Vec<StoredPlanInfo>);

impl StoredPlans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoredPlanInfo> {
        self.0.iter()
    }
}

impl fmt::Display for StoredPlans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying per-Action progress summaries.
pub struct ActionSummaries(pub Vec<ActionSummary>);

impl fmt::Display for ActionSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No actions found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Nodes a dependency picker may offer, indented by level.
pub struct Candidates(pub Vec<FlatNode>);

impl fmt::Display for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No nodes can be added as dependencies.")
        } else {
            for node in &self.0 {
                write!(f, "{node}")?;
            }
            Ok(())
        }
    }
}
