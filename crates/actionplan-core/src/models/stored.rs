//! Metadata about plans kept in the store.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored plan as listed by the workspace, without its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlanInfo {
    /// Unique plan name, the store's key
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Undo snapshots currently kept for the plan
    pub snapshot_count: u32,
}
