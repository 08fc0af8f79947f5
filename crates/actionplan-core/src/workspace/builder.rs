//! Builder for creating and configuring Workspace instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Workspace;
use crate::{
    db::Database,
    error::{PlanError, Result},
    history::MAX_HISTORY_LIMIT,
    plan::DanglingPolicy,
    session::SessionConfig,
};

/// Builder for creating and configuring Workspace instances.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceBuilder {
    database_path: Option<PathBuf>,
    config: SessionConfig,
}

impl WorkspaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/actionplan/actionplan.db` or
    /// `~/.local/share/actionplan/actionplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Number of undo snapshots kept per plan.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// What deleting a node does to dependency references to it.
    pub fn with_dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.config.dangling_policy = policy;
        self
    }

    /// Days autopilot gives nodes without a usable preset date range.
    pub fn with_default_duration_days(mut self, days: u32) -> Self {
        self.config.schedule.default_duration_days = days;
        self
    }

    /// Builds the configured workspace.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Configuration` if the default duration is zero or
    /// the history limit is above `MAX_HISTORY_LIMIT`
    /// Returns `PlanError::FileSystem` if the database path is invalid
    /// Returns `PlanError::Database` if database initialization fails
    pub async fn build(self) -> Result<Workspace> {
        if self.config.schedule.default_duration_days == 0 {
            return Err(PlanError::Configuration {
                message: "Default duration must be at least one day".to_string(),
            });
        }
        if self.config.history_limit > MAX_HISTORY_LIMIT {
            return Err(PlanError::Configuration {
                message: format!(
                    "History limit {} is above the maximum of {MAX_HISTORY_LIMIT}",
                    self.config.history_limit
                ),
            });
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlanError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlanError>(())
        })
        .await
        .map_err(|e| PlanError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Workspace::new(db_path, self.config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("actionplan")
            .place_data_file("actionplan.db")
            .map_err(|e| PlanError::XdgDirectory(e.to_string()))
    }
}
