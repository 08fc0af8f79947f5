//! Closed set of field updates accepted by the hierarchy store.

use std::str::FromStr;

use jiff::civil::Date;

use super::{Node, Priority, Status};
use crate::error::{PlanError, Result};

/// A single field assignment on a node.
///
/// Field names are a fixed set; anything outside it is rejected by
/// [`FieldUpdate::parse`] instead of being stored under an arbitrary key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Status(Status),
    Priority(Priority),
    StartDate(Option<Date>),
    FinishDate(Option<Date>),
    Description(Option<String>),
    Assignees(Vec<String>),
    /// Sets a metadata entry; `None` removes the key
    Metadata { key: String, value: Option<String> },
}

/// Field names understood by [`FieldUpdate::parse`].
pub const FIELD_NAMES: &[&str] = &[
    "name",
    "status",
    "priority",
    "start_date",
    "finish_date",
    "description",
    "assignees",
    "metadata",
];

impl FieldUpdate {
    /// Build an update from a field name and its text value.
    ///
    /// Empty values (or `none`) clear optional fields. Dates use
    /// `YYYY-MM-DD`, assignees are comma separated and metadata takes
    /// `key=value` (or a bare `key` to remove it).
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidInput` - unknown field or unparsable value
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actionplan_core::models::{FieldUpdate, Status};
    ///
    /// let update = FieldUpdate::parse("status", "in-progress")?;
    /// assert_eq!(update, FieldUpdate::Status(Status::InProgress));
    ///
    /// assert!(FieldUpdate::parse("colour", "red").is_err());
    /// # Ok::<(), actionplan_core::PlanError>(())
    /// ```
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let field = field.trim().to_lowercase().replace('-', "_");
        let value = value.trim();

        match field.as_str() {
            "name" | "title" => {
                if value.is_empty() {
                    return Err(PlanError::invalid_input("name").with_reason("Name cannot be empty"));
                }
                Ok(FieldUpdate::Name(value.to_string()))
            }
            "status" => Status::from_str(value)
                .map(FieldUpdate::Status)
                .map_err(|_| {
                    PlanError::invalid_input("status").with_reason(format!(
                        "Invalid status: {value}. Must be 'not-started', 'in-progress', 'blocked' or 'completed'"
                    ))
                }),
            "priority" => Priority::from_str(value)
                .map(FieldUpdate::Priority)
                .map_err(|_| {
                    PlanError::invalid_input("priority").with_reason(format!(
                        "Invalid priority: {value}. Must be 'low', 'medium', 'high' or 'critical'"
                    ))
                }),
            "start_date" | "start" => parse_optional_date("start_date", value).map(FieldUpdate::StartDate),
            "finish_date" | "finish" | "end_date" => {
                parse_optional_date("finish_date", value).map(FieldUpdate::FinishDate)
            }
            "description" => Ok(FieldUpdate::Description(optional_text(value))),
            "assignees" | "assignee" => Ok(FieldUpdate::Assignees(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            "metadata" => {
                let (key, entry) = match value.split_once('=') {
                    Some((key, entry)) => (key.trim(), optional_text(entry)),
                    None => (value, None),
                };
                if key.is_empty() {
                    return Err(PlanError::invalid_input("metadata")
                        .with_reason("Expected key=value or a key to remove"));
                }
                Ok(FieldUpdate::Metadata {
                    key: key.to_string(),
                    value: entry,
                })
            }
            other => Err(PlanError::invalid_input(other).with_reason(format!(
                "Unknown field. Must be one of: {}",
                FIELD_NAMES.join(", ")
            ))),
        }
    }

    /// Canonical name of the field this update touches.
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::Name(_) => "name",
            FieldUpdate::Status(_) => "status",
            FieldUpdate::Priority(_) => "priority",
            FieldUpdate::StartDate(_) => "start_date",
            FieldUpdate::FinishDate(_) => "finish_date",
            FieldUpdate::Description(_) => "description",
            FieldUpdate::Assignees(_) => "assignees",
            FieldUpdate::Metadata { .. } => "metadata",
        }
    }

    /// Write the update into a node.
    pub(crate) fn apply(self, node: &mut Node) -> Result<()> {
        match self {
            FieldUpdate::Name(name) => node.name = name,
            FieldUpdate::Status(status) => node.status = status,
            FieldUpdate::Priority(priority) => {
                if !node.kind.has_priority() {
                    return Err(PlanError::invalid_input("priority")
                        .with_reason(format!("A {} has no priority", node.kind)));
                }
                node.priority = Some(priority);
            }
            FieldUpdate::StartDate(date) => node.start_date = date,
            FieldUpdate::FinishDate(date) => node.finish_date = date,
            FieldUpdate::Description(description) => node.description = description,
            FieldUpdate::Assignees(assignees) => node.assignees = assignees,
            FieldUpdate::Metadata { key, value } => match value {
                Some(value) => {
                    node.metadata.insert(key, value);
                }
                None => {
                    node.metadata.remove(&key);
                }
            },
        }
        Ok(())
    }
}

impl TryFrom<crate::params::SetField> for FieldUpdate {
    type Error = PlanError;

    fn try_from(params: crate::params::SetField) -> Result<Self> {
        Self::parse(&params.field, &params.value)
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_optional_date(field: &str, value: &str) -> Result<Option<Date>> {
    optional_text(value)
        .map(|text| {
            text.parse::<Date>().map_err(|e| {
                PlanError::invalid_input(field)
                    .with_reason(format!("Invalid date '{text}', expected YYYY-MM-DD: {e}"))
            })
        })
        .transpose()
}
