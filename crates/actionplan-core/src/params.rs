//! Parameter structures for action plan operations.
//!
//! These are the framework-free request shapes shared by every host. An
//! interface layer wraps them with its own derives (the CLI adds clap
//! `Args`) and converts into them with `From`, so the core never depends on
//! a particular front end:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │───▶│  Session / Plan │
//! │  (clap derives) │    │ (minimal deps)  │    │   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! [`Edit`] bundles them into one command type, which is what
//! [`Session::execute`](crate::session::Session::execute) and
//! [`Workspace::edit`](crate::workspace::Workspace::edit) accept.

use serde::{Deserialize, Serialize};

use crate::{
    models::{NodeId, NodePath},
    plan::Direction,
};

/// Parameters for creating a node.
///
/// Without a parent a new Action is appended; otherwise a child one level
/// below the parent is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddNode {
    pub parent: Option<NodePath>,
    /// Display name of the new node
    pub name: String,
}

/// Parameters for operations that only need a node path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    pub path: NodePath,
}

/// Parameters for setting one field by name.
///
/// Converted into a [`FieldUpdate`](crate::models::FieldUpdate) with
/// `TryFrom`, which validates the field name and value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetField {
    pub path: NodePath,
    pub field: String,
    pub value: String,
}

/// Parameters for swapping a node with a neighbouring sibling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveNode {
    pub path: NodePath,
    pub direction: Direction,
}

/// Parameters for reordering Actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderActions {
    /// Every Action id, in the new order
    pub order: Vec<NodeId>,
}

/// Parameters for adding or removing one dependency edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdit {
    /// Node that depends on `dependency`
    pub path: NodePath,
    pub dependency: NodeId,
}

/// Parameters for running autopilot on one Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Autopilot {
    pub action: NodeId,
}

/// One editing command against a stored plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Edit {
    AddNode(AddNode),
    SetField(SetField),
    DeleteNode(NodeRef),
    MoveNode(MoveNode),
    ReorderActions(ReorderActions),
    AddDependency(DependencyEdit),
    RemoveDependency(DependencyEdit),
    PruneDangling,
    Autopilot(Autopilot),
    Undo,
}

impl Edit {
    /// Short command name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Edit::AddNode(_) => "add_node",
            Edit::SetField(_) => "set_field",
            Edit::DeleteNode(_) => "delete_node",
            Edit::MoveNode(_) => "move_node",
            Edit::ReorderActions(_) => "reorder_actions",
            Edit::AddDependency(_) => "add_dependency",
            Edit::RemoveDependency(_) => "remove_dependency",
            Edit::PruneDangling => "prune_dangling",
            Edit::Autopilot(_) => "autopilot",
            Edit::Undo => "undo",
        }
    }
}
