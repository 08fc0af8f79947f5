//! Presentation state kept next to, never inside, the plan.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{models::NodeId, plan::ActionPlan};

/// Which presentation a host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Board,
    Table,
    Gantt,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::List => "list",
            ViewMode::Board => "board",
            ViewMode::Table => "table",
            ViewMode::Gantt => "gantt",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "board" => Ok(ViewMode::Board),
            "table" => Ok(ViewMode::Table),
            "gantt" => Ok(ViewMode::Gantt),
            _ => Err(format!("Invalid view mode: {s}")),
        }
    }
}

/// Expand/collapse state, active view and drag source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub expanded: BTreeSet<NodeId>,
    pub drag_source: Option<NodeId>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Flips the expansion of a node and returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Expands every node that has children.
    pub fn expand_all(&mut self, plan: &ActionPlan) {
        self.expanded = plan
            .nodes()
            .filter(|node| !node.children.is_empty())
            .map(|node| node.id)
            .collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Forgets ids that no longer exist in `plan`, including a stale drag
    /// source.
    pub fn retain_existing(&mut self, plan: &ActionPlan) {
        self.expanded.retain(|id| plan.contains(*id));
        if self.drag_source.is_some_and(|id| !plan.contains(id)) {
            self.drag_source = None;
        }
    }
}
