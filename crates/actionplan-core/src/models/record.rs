//! Plain nested records exchanged with persistence.
//!
//! The arena is an internal representation; whatever stores or transmits a
//! plan sees this nested shape instead. Loading is tolerant: every field but
//! `id` may be missing and falls back to its default.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{NodeId, Priority, Status};

/// One node and its subtree in persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,

    #[serde(default, alias = "title")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Legacy completion flag, read only when `status` is absent
    #[serde(default, skip_serializing)]
    pub completed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, alias = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    #[serde(default, alias = "finishDate", skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<NodeId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(
        default,
        alias = "tasks",
        alias = "subtasks",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    /// Status after applying the legacy `completed` fallback.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::models::{NodeRecord, Status};
    ///
    /// let record: NodeRecord = serde_json::from_str(r#"{"id": 1, "completed": true}"#)?;
    /// assert_eq!(record.resolved_status(), Status::Completed);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn resolved_status(&self) -> Status {
        match (self.status, self.completed) {
            (Some(status), _) => status,
            (None, Some(true)) => Status::Completed,
            (None, _) => Status::NotStarted,
        }
    }
}

/// A whole plan in persisted form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Next id to allocate; keeps ids from being reused after deletions.
    /// Absent in hand-written documents, in which case it is derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,

    #[serde(default)]
    pub actions: Vec<NodeRecord>,
}
