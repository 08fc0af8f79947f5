//! Display implementations for domain models.
//!
//! Enumerations print their canonical text form; records print as markdown
//! fragments that the collection wrappers assemble into full documents.

use std::fmt;

use super::datetime::{DateRange, LocalDateTime};
use crate::models::{ActionSummary, FlatNode, Node, NodeKind, Priority, Status, StoredPlanInfo};

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}. {}** ({})", self.id, self.name, self.status.with_icon())?;
        if let Some(priority) = self.priority {
            write!(f, " `{priority}`")?;
        }
        if self.start_date.is_some() || self.finish_date.is_some() {
            write!(f, " {}", DateRange(&self.start_date, &self.finish_date))?;
        }
        if !self.dependencies.is_empty() {
            let deps: Vec<String> = self.dependencies.iter().map(ToString::to_string).collect();
            write!(f, " · depends on {}", deps.join(", "))?;
        }
        if !self.assignees.is_empty() {
            write!(f, " · @{}", self.assignees.join(" @"))?;
        }
        Ok(())
    }
}

impl fmt::Display for FlatNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}- {} {} `{}`",
            "  ".repeat(self.depth()),
            self.kind,
            self.name,
            self.path
        )
    }
}

impl fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) {}% ({}/{})",
            self.name, self.id, self.percent_complete, self.completed_tasks, self.total_tasks
        )?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        if let Some(priority) = self.priority {
            writeln!(f, "- **Priority**: {priority}")?;
        }
        writeln!(
            f,
            "- **Window**: {}",
            DateRange(&self.start_date, &self.finish_date)
        )?;
        writeln!(f, "- **Subtasks**: {}", self.total_subtasks)?;
        writeln!(f)
    }
}

impl fmt::Display for StoredPlanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f, "- **Undo snapshots**: {}", self.snapshot_count)?;
        writeln!(f)
    }
}
