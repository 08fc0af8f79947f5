//! Async workspace over the plan store.
//!
//! [`Workspace`] is what hosts use to work on named, persisted plans. Each
//! call opens the SQLite database on a blocking thread, loads the plan into
//! a [`Session`](crate::session::Session), runs the requested command and
//! saves the result when the plan changed:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Workspace    │    │     Session     │    │    Database     │
//! │  (async, ops,   │───▶│ (pure plan ops, │───▶│   (via db/)     │
//! │   handlers)     │    │  undo history)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: factory for [`Workspace`] instances and their policies
//! - [`ops`]: loading, saving and editing stored plans
//! - [`handlers`]: read-only views returned as display wrappers
//!
//! # Examples
//!
//! ```rust,no_run
//! use actionplan_core::{WorkspaceBuilder, params::{AddNode, Edit}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! workspace
//!     .edit("launch", Edit::AddNode(AddNode { parent: None, name: "Design".into() }))
//!     .await?;
//! let plan = workspace.get_plan("launch").await?;
//! assert_eq!(plan.action_ids().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::session::SessionConfig;

pub mod builder;
pub mod handlers;
pub mod ops;

pub use builder::WorkspaceBuilder;

/// Handle on a plan database and the policies applied to its sessions.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub(crate) db_path: PathBuf,
    pub(crate) config: SessionConfig,
}

impl Workspace {
    pub(crate) fn new(db_path: PathBuf, config: SessionConfig) -> Self {
        Self { db_path, config }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
