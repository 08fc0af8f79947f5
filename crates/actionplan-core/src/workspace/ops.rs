//! Storage operations for the Workspace.

use log::debug;
use tokio::task;

use super::Workspace;
use crate::{
    db::Database,
    error::{PlanError, Result},
    models::{PlanDocument, StoredPlanInfo},
    params::Edit,
    plan::ActionPlan,
    session::{EditResult, Session},
};

impl Workspace {
    /// Runs `f` against a freshly opened database on the blocking pool.
    async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| PlanError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Loads a stored plan with its undo history.
    ///
    /// # Errors
    ///
    /// * `PlanError::PlanNotFound` - no plan with that name
    pub async fn load_session(&self, name: &str) -> Result<Session> {
        let name = name.to_string();
        let config = self.config;

        self.with_database(move |db| {
            db.load_session(&name, config)?
                .ok_or(PlanError::PlanNotFound { name })
        })
        .await
    }

    /// Like [`Workspace::load_session`], but starts an empty session when
    /// the plan does not exist yet.
    pub async fn open_session(&self, name: &str) -> Result<Session> {
        let name = name.to_string();
        let config = self.config;

        self.with_database(move |db| {
            Ok(db
                .load_session(&name, config)?
                .unwrap_or_else(|| Session::new(config)))
        })
        .await
    }

    /// Stores the session's plan and history under `name`.
    pub async fn save_session(&self, name: &str, session: &Session) -> Result<()> {
        let name = name.to_string();
        let session = session.clone();

        self.with_database(move |db| db.save_session(&name, &session))
            .await
    }

    /// Retrieves the current plan stored under `name`.
    pub async fn get_plan(&self, name: &str) -> Result<ActionPlan> {
        let name = name.to_string();

        self.with_database(move |db| db.get_plan(&name)?.ok_or(PlanError::PlanNotFound { name }))
            .await
    }

    pub async fn list_plans(&self) -> Result<Vec<StoredPlanInfo>> {
        self.with_database(|db| db.list_plans()).await
    }

    /// Deletes a stored plan and its history. Returns `false` if there was
    /// nothing to delete.
    pub async fn delete_plan(&self, name: &str) -> Result<bool> {
        let name = name.to_string();

        self.with_database(move |db| db.delete_plan(&name)).await
    }

    /// Runs one editing command against a stored plan and saves the result.
    ///
    /// A plan that does not exist yet starts out empty, so adding the first
    /// Action creates it. Nothing is written unless the command changed the
    /// plan.
    pub async fn edit(&self, name: &str, edit: Edit) -> Result<EditResult> {
        let name = name.to_string();
        let config = self.config;

        self.with_database(move |db| {
            let mut session = db
                .load_session(&name, config)?
                .unwrap_or_else(|| Session::new(config));

            let result = session.execute(edit)?;
            if result.changed_plan() {
                db.save_session(&name, &session)?;
                debug!("Saved plan '{name}'");
            }
            Ok(result)
        })
        .await
    }

    /// Exports a stored plan as a nested record document.
    pub async fn export_document(&self, name: &str) -> Result<PlanDocument> {
        Ok(self.get_plan(name).await?.to_document())
    }

    /// Replaces (or creates) a stored plan from a nested record document.
    ///
    /// The document is validated before anything is written; the previous
    /// plan, if any, becomes an undo snapshot.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidDocument` - the document breaks a tree invariant
    pub async fn import_document(&self, name: &str, document: PlanDocument) -> Result<ActionPlan> {
        let imported = ActionPlan::from_document(document)?;
        let name = name.to_string();
        let config = self.config;

        self.with_database(move |db| {
            let mut session = db
                .load_session(&name, config)?
                .unwrap_or_else(|| Session::new(config));
            session.apply("import", |_| Ok((imported, ())))?;
            db.save_session(&name, &session)?;
            Ok(session.into_plan())
        })
        .await
    }
}
