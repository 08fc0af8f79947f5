//! Gantt timeline rows for one Action's subtree.
//!
//! Bars are positioned in whole days relative to the earliest dated node of
//! the subtree, which is what a chart needs to lay them out. Nodes without a
//! usable date range still get a row, just without a bar.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{NodeId, NodeKind, NodePath, Status},
    plan::ActionPlan,
};

/// Horizontal placement of a dated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub start: Date,
    pub finish: Date,
    /// Days between the timeline origin and `start`
    pub offset_days: i64,
    /// Inclusive length in days
    pub span_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub status: Status,
    pub bar: Option<Bar>,
}

/// Chart data for one Action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub action: NodeId,
    /// Earliest start among dated rows
    pub origin: Option<Date>,
    /// Days from the origin to the latest finish, inclusive
    pub total_days: i64,
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }
}

/// Builds Gantt rows for the Action and everything under it, in display
/// order.
///
/// # Errors
///
/// * `PlanError::NodeNotFound` / `PlanError::WrongKind` - `action` is not an
///   Action of this plan
pub fn build_timeline(plan: &ActionPlan, action: NodeId) -> Result<Timeline> {
    plan.resolve(&NodePath::Action(action))?;

    let mut ranges = Vec::new();
    for id in plan.subtree(action)? {
        let node = plan.node(id)?;
        let range = match (node.start_date, node.finish_date) {
            (Some(start), Some(finish)) if start <= finish => Some((start, finish)),
            _ => None,
        };
        ranges.push((node, range));
    }

    let origin = ranges.iter().filter_map(|(_, range)| range.map(|r| r.0)).min();
    let end = ranges.iter().filter_map(|(_, range)| range.map(|r| r.1)).max();

    let rows = ranges
        .into_iter()
        .map(|(node, range)| TimelineRow {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind,
            status: node.status,
            bar: match (origin, range) {
                (Some(origin), Some((start, finish))) => Some(Bar {
                    start,
                    finish,
                    offset_days: days_between(origin, start),
                    span_days: days_between(start, finish) + 1,
                }),
                _ => None,
            },
        })
        .collect();

    let total_days = match (origin, end) {
        (Some(origin), Some(end)) => days_between(origin, end) + 1,
        _ => 0,
    };

    Ok(Timeline {
        action,
        origin,
        total_days,
        rows,
    })
}

fn days_between(from: Date, to: Date) -> i64 {
    from.until(to)
        .map(|span| i64::from(span.get_days()))
        .unwrap_or(0)
}
