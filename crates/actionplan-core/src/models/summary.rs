//! Read-only derived views over a plan.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{NodeId, NodeKind, NodePath, Priority, Status};

/// Flattened entry used to build dependency pickers and flat listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub path: NodePath,
}

impl FlatNode {
    pub fn depth(&self) -> usize {
        self.kind.depth()
    }
}

/// Summary information about an Action with task statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub id: NodeId,
    pub name: String,
    pub status: Status,
    pub priority: Option<Priority>,
    pub start_date: Option<Date>,
    pub finish_date: Option<Date>,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Total number of subtasks across all tasks
    pub total_subtasks: u32,
    /// `round(100 * completed / total)`, 0 without tasks
    pub percent_complete: u8,
}
