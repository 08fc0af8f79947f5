//! Plan document and snapshot queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    history::History,
    models::{NodeRecord, PlanDocument, StoredPlanInfo},
    plan::ActionPlan,
    session::{Session, SessionConfig},
};

const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (name, document, next_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) \
     ON CONFLICT(name) DO UPDATE SET document = excluded.document, next_id = excluded.next_id, updated_at = excluded.updated_at";
const SELECT_PLAN_SQL: &str = "SELECT document, next_id FROM plans WHERE name = ?1";
const DELETE_PLAN_SNAPSHOTS_SQL: &str = "DELETE FROM plan_snapshots WHERE plan_name = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE name = ?1";
const INSERT_SNAPSHOT_SQL: &str =
    "INSERT INTO plan_snapshots (plan_name, document, next_id, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_SNAPSHOTS_SQL: &str = "SELECT document, next_id FROM (\
     SELECT id, document, next_id FROM plan_snapshots WHERE plan_name = ?1 ORDER BY id DESC LIMIT ?2\
     ) ORDER BY id ASC";
const SELECT_OVERVIEW_SQL: &str = "SELECT name, created_at, updated_at, snapshot_count FROM plan_overview";

impl super::Database {
    /// Stores a plan and replaces its snapshot history.
    ///
    /// Creates the plan on first save. The snapshots are written oldest
    /// first so that they load back in the same order.
    pub fn save_plan(&mut self, name: &str, plan: &ActionPlan, history: &History) -> Result<()> {
        let (document, next_id) = encode(plan)?;
        let snapshots = history
            .snapshots()
            .map(encode)
            .collect::<Result<Vec<_>>>()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();

        tx.execute(UPSERT_PLAN_SQL, params![name, document, next_id, &now])
            .db_context("Failed to save plan")?;
        tx.execute(DELETE_PLAN_SNAPSHOTS_SQL, params![name])
            .db_context("Failed to clear plan snapshots")?;
        for (snapshot, snapshot_next_id) in &snapshots {
            tx.execute(
                INSERT_SNAPSHOT_SQL,
                params![name, snapshot, snapshot_next_id, &now],
            )
            .db_context("Failed to insert plan snapshot")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Retrieves a plan by name.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidDocument` - the stored document breaks a tree
    ///   invariant
    /// * `PlanError::Serialization` - the stored document is not valid JSON
    pub fn get_plan(&self, name: &str) -> Result<Option<ActionPlan>> {
        let row = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .optional()
            .db_context("Failed to query plan")?;

        row.map(|(document, next_id)| decode(&document, next_id))
            .transpose()
    }

    /// The most recent `limit` snapshots of a plan, oldest first.
    pub fn get_snapshots(&self, name: &str, limit: usize) -> Result<Vec<ActionPlan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SNAPSHOTS_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![name, i64::try_from(limit).unwrap_or(i64::MAX)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .db_context("Failed to query plan snapshots")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read plan snapshots")?;

        rows.iter()
            .map(|(document, next_id)| decode(document, *next_id))
            .collect()
    }

    /// Loads a plan and its history into a session.
    pub fn load_session(&self, name: &str, config: SessionConfig) -> Result<Option<Session>> {
        let Some(plan) = self.get_plan(name)? else {
            return Ok(None);
        };

        let mut history = History::with_limit(config.history_limit);
        for snapshot in self.get_snapshots(name, config.history_limit)? {
            history.push(snapshot);
        }

        Ok(Some(Session::from_parts(plan, history, config)))
    }

    /// Stores the session's current plan and history under `name`.
    pub fn save_session(&mut self, name: &str, session: &Session) -> Result<()> {
        self.save_plan(name, session.plan(), session.history())
    }

    /// Lists stored plans by name.
    pub fn list_plans(&self) -> Result<Vec<StoredPlanInfo>> {
        let mut stmt = self
            .connection
            .prepare(&format!("{SELECT_OVERVIEW_SQL} ORDER BY name ASC"))
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map([], plan_info_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read plans")?;

        Ok(plans)
    }

    /// Deletes a plan and its snapshots. Returns `false` if it did not
    /// exist.
    pub fn delete_plan(&mut self, name: &str) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_PLAN_SNAPSHOTS_SQL, params![name])
            .db_context("Failed to delete plan snapshots")?;
        let rows_affected = tx
            .execute(DELETE_PLAN_SQL, params![name])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(rows_affected > 0)
    }
}

fn encode(plan: &ActionPlan) -> Result<(String, i64)> {
    let document = plan.to_document();
    let next_id = document.next_id.unwrap_or(1);
    let next_id = i64::try_from(next_id).map_err(|_| {
        PlanError::invalid_document(format!("id counter {next_id} does not fit the store"))
    })?;
    let json = serde_json::to_string(&document.actions)?;
    Ok((json, next_id))
}

fn decode(document: &str, next_id: i64) -> Result<ActionPlan> {
    let actions: Vec<NodeRecord> = serde_json::from_str(document)?;
    let next_id = u64::try_from(next_id).map_err(|_| {
        PlanError::invalid_document(format!("negative id counter {next_id}"))
    })?;
    ActionPlan::from_document(PlanDocument {
        next_id: Some(next_id),
        actions,
    })
}

fn plan_info_from_row(row: &Row<'_>) -> rusqlite::Result<StoredPlanInfo> {
    let parse_timestamp = |idx: usize| -> rusqlite::Result<Timestamp> {
        row.get::<_, String>(idx)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    };

    Ok(StoredPlanInfo {
        name: row.get(0)?,
        created_at: parse_timestamp(1)?,
        updated_at: parse_timestamp(2)?,
        snapshot_count: row.get::<_, i64>(3)? as u32,
    })
}
