//! Status and priority enumerations for plan nodes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of node statuses.
///
/// Status is a free-form user choice: nothing forces a node to `Completed`
/// once its children are done, and completion percentages are derived from
/// children rather than stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Work has not begun
    #[default]
    NotStarted,

    /// Work is underway
    InProgress,

    /// Work cannot proceed
    Blocked,

    /// Work is finished
    Completed,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "not-started" | "notstarted" | "todo" => Ok(Status::NotStarted),
            "in-progress" | "inprogress" => Ok(Status::InProgress),
            "blocked" => Ok(Status::Blocked),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

impl Status {
    /// Canonical text form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Blocked => "blocked",
            Status::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::models::Status;
    ///
    /// assert_eq!(Status::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(Status::Blocked.with_icon(), "✗ Blocked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Status::NotStarted => "○ Not Started",
            Status::InProgress => "➤ In Progress",
            Status::Blocked => "✗ Blocked",
            Status::Completed => "✓ Completed",
        }
    }
}

/// Priority of an Action or Task. Subtasks carry no priority.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}
