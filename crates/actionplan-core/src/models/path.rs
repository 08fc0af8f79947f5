//! Path references to nodes: `action`, `action/task`, `action/task/subtask`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{NodeId, NodeKind};
use crate::error::PlanError;

/// Full path to a node, from its Action down to the node itself.
///
/// The text form joins ids with `/`, so `4/9/12` names Subtask 12 of Task 9
/// of Action 4.
///
/// # Examples
///
/// ```rust
/// use actionplan_core::models::{NodeId, NodePath};
///
/// let path: NodePath = "4/9/12".parse()?;
/// assert_eq!(path, NodePath::Subtask(NodeId(4), NodeId(9), NodeId(12)));
/// assert_eq!(path.leaf(), NodeId(12));
/// assert_eq!(path.to_string(), "4/9/12");
/// # Ok::<(), actionplan_core::PlanError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NodePath {
    Action(NodeId),
    Task(NodeId, NodeId),
    Subtask(NodeId, NodeId, NodeId),
}

impl NodePath {
    /// The id of the node the path points at.
    pub fn leaf(&self) -> NodeId {
        match *self {
            NodePath::Action(a) => a,
            NodePath::Task(_, t) => t,
            NodePath::Subtask(_, _, s) => s,
        }
    }

    /// The Action at the root of the path.
    pub fn action(&self) -> NodeId {
        match *self {
            NodePath::Action(a) | NodePath::Task(a, _) | NodePath::Subtask(a, _, _) => a,
        }
    }

    /// Kind of node the path must resolve to.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePath::Action(_) => NodeKind::Action,
            NodePath::Task(..) => NodeKind::Task,
            NodePath::Subtask(..) => NodeKind::Subtask,
        }
    }

    /// Path of the parent node, `None` for Actions.
    pub fn parent(&self) -> Option<NodePath> {
        match *self {
            NodePath::Action(_) => None,
            NodePath::Task(a, _) => Some(NodePath::Action(a)),
            NodePath::Subtask(a, t, _) => Some(NodePath::Task(a, t)),
        }
    }

    /// Path of a child of this node.
    pub fn child(&self, id: NodeId) -> Option<NodePath> {
        match *self {
            NodePath::Action(a) => Some(NodePath::Task(a, id)),
            NodePath::Task(a, t) => Some(NodePath::Subtask(a, t, id)),
            NodePath::Subtask(..) => None,
        }
    }

    /// Ids along the path, root first.
    pub fn segments(&self) -> Vec<NodeId> {
        match *self {
            NodePath::Action(a) => vec![a],
            NodePath::Task(a, t) => vec![a, t],
            NodePath::Subtask(a, t, s) => vec![a, t, s],
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodePath::Action(a) => write!(f, "{a}"),
            NodePath::Task(a, t) => write!(f, "{a}/{t}"),
            NodePath::Subtask(a, t, s) => write!(f, "{a}/{t}/{s}"),
        }
    }
}

impl FromStr for NodePath {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PlanError::InvalidPath {
            path: s.to_string(),
            reason,
        };

        let ids = s
            .split('/')
            .map(|segment| segment.parse::<NodeId>().map_err(&invalid))
            .collect::<Result<Vec<_>, _>>()?;

        match ids.as_slice() {
            [a] => Ok(NodePath::Action(*a)),
            [a, t] => Ok(NodePath::Task(*a, *t)),
            [a, t, st] => Ok(NodePath::Subtask(*a, *t, *st)),
            _ => Err(invalid(format!(
                "expected 1 to 3 segments, found {}",
                ids.len()
            ))),
        }
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for NodePath {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
