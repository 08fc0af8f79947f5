//! Node model: the arena record shared by Actions, Tasks and Subtasks.

use std::{collections::BTreeMap, fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Priority, Status};

/// Opaque node identifier, unique across the whole plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Largest id a plan hands out. The id counter one past it still fits
    /// the signed integer column it is stored in.
    pub const MAX: NodeId = NodeId(i64::MAX as u64 - 1);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(NodeId)
            .map_err(|_| format!("Invalid node id: {s}"))
    }
}

/// Level of a node in the fixed three-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Action,
    Task,
    Subtask,
}

impl NodeKind {
    /// Kind of the nodes this kind may contain, if any.
    pub fn child_kind(&self) -> Option<NodeKind> {
        match self {
            NodeKind::Action => Some(NodeKind::Task),
            NodeKind::Task => Some(NodeKind::Subtask),
            NodeKind::Subtask => None,
        }
    }

    /// Zero-based depth in the tree.
    pub fn depth(&self) -> usize {
        match self {
            NodeKind::Action => 0,
            NodeKind::Task => 1,
            NodeKind::Subtask => 2,
        }
    }

    /// Whether nodes of this kind carry a priority.
    pub fn has_priority(&self) -> bool {
        !matches!(self, NodeKind::Subtask)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Action => "action",
            NodeKind::Task => "task",
            NodeKind::Subtask => "subtask",
        }
    }
}

/// A single Action, Task or Subtask stored in the plan arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier, immutable after creation
    pub id: NodeId,

    /// Position in the hierarchy
    pub kind: NodeKind,

    /// Owning node; `None` for Actions
    pub parent: Option<NodeId>,

    /// Display name, no uniqueness constraint
    pub name: String,

    pub status: Status,

    /// Always `None` for Subtasks
    pub priority: Option<Priority>,

    pub start_date: Option<Date>,
    pub finish_date: Option<Date>,

    /// Nodes anywhere in the plan that must complete before this one starts
    pub dependencies: Vec<NodeId>,

    /// Ordered child ids; order is user-controlled and persisted
    pub children: Vec<NodeId>,

    pub assignees: Vec<String>,
    pub description: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node with default fields: not started, no dates, no links.
    pub(crate) fn new(
        id: NodeId,
        kind: NodeKind,
        parent: Option<NodeId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            parent,
            name: name.into(),
            status: Status::NotStarted,
            priority: kind.has_priority().then_some(Priority::Medium),
            start_date: None,
            finish_date: None,
            dependencies: Vec::new(),
            children: Vec::new(),
            assignees: Vec::new(),
            description: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn depends_on(&self, id: NodeId) -> bool {
        self.dependencies.contains(&id)
    }

    /// Inclusive length in days of the preset date range.
    ///
    /// Returns `None` unless both dates are set and the finish is not before
    /// the start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::ActionPlan;
    /// use actionplan_core::models::{FieldUpdate, NodePath};
    /// use jiff::civil::date;
    ///
    /// let (plan, id) = ActionPlan::new().add_action("Launch")?;
    /// let plan = plan
    ///     .update_field(&NodePath::Action(id), FieldUpdate::StartDate(Some(date(2024, 1, 1))))?
    ///     .update_field(&NodePath::Action(id), FieldUpdate::FinishDate(Some(date(2024, 1, 5))))?;
    /// assert_eq!(plan.node(id)?.duration_days(), Some(5));
    /// # Ok::<(), actionplan_core::PlanError>(())
    /// ```
    pub fn duration_days(&self) -> Option<i64> {
        let (start, finish) = (self.start_date?, self.finish_date?);
        if finish < start {
            return None;
        }
        let span = start.until(finish).ok()?;
        Some(i64::from(span.get_days()) + 1)
    }
}
