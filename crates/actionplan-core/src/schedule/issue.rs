use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::NodeId;

/// One reason an autopilot run could not commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScheduleIssue {
    /// The Action lacks a start or finish date
    MissingWindow { action: NodeId, name: String },
    /// The Action's finish date precedes its start date
    InvertedWindow {
        action: NodeId,
        name: String,
        start: Date,
        finish: Date,
    },
    /// Children of `parent` depend on each other in a loop
    CyclicDependency {
        parent: NodeId,
        members: Vec<(NodeId, String)>,
    },
    /// A node's computed finish falls after its parent's window
    ExceedsWindow {
        node: NodeId,
        name: String,
        finish: Date,
        limit: Date,
    },
}

impl ScheduleIssue {
    /// The node the issue is reported against.
    pub fn node(&self) -> NodeId {
        match self {
            ScheduleIssue::MissingWindow { action, .. }
            | ScheduleIssue::InvertedWindow { action, .. } => *action,
            ScheduleIssue::CyclicDependency { parent, .. } => *parent,
            ScheduleIssue::ExceedsWindow { node, .. } => *node,
        }
    }
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleIssue::MissingWindow { action, name } => write!(
                f,
                "Action {action} '{name}' needs both a start and a finish date"
            ),
            ScheduleIssue::InvertedWindow {
                action,
                name,
                start,
                finish,
            } => write!(
                f,
                "Action {action} '{name}' finishes ({finish}) before it starts ({start})"
            ),
            ScheduleIssue::CyclicDependency { parent, members } => {
                let names: Vec<String> = members
                    .iter()
                    .map(|(id, name)| format!("{id} '{name}'"))
                    .collect();
                write!(
                    f,
                    "Circular dependency under node {parent}: {}",
                    names.join(" -> ")
                )
            }
            ScheduleIssue::ExceedsWindow {
                node,
                name,
                finish,
                limit,
            } => write!(
                f,
                "Node {node} '{name}' would finish on {finish}, after its window ends on {limit}"
            ),
        }
    }
}
