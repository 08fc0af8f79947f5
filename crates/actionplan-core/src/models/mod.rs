//! Data models for the action plan hierarchy.
//!
//! An action plan is a fixed three-level tree: Actions contain Tasks, Tasks
//! contain Subtasks. Every node, whatever its level, shares the [`Node`]
//! record and a single global [`NodeId`] space, which is what lets
//! dependencies point anywhere in the tree.
//!
//! - [`node`]: the arena record, ids and levels
//! - [`status`]: status and priority enumerations
//! - [`path`]: path references (`action/task/subtask`)
//! - [`update`]: the closed set of field updates
//! - [`record`]: nested records exchanged with persistence
//! - [`summary`]: derived read-only views
//! - [`stored`]: metadata about plans kept in the store
//!
//! Display implementations live in [`crate::display::models`].

pub mod node;
pub mod path;
pub mod record;
pub mod status;
pub mod stored;
pub mod summary;
pub mod update;

#[cfg(test)]
mod tests;

pub use node::{Node, NodeId, NodeKind};
pub use path::NodePath;
pub use record::{NodeRecord, PlanDocument};
pub use status::{Priority, Status};
pub use stored::StoredPlanInfo;
pub use summary::{ActionSummary, FlatNode};
pub use update::{FieldUpdate, FIELD_NAMES};
