//! Autopilot: batch date assignment for one Action's subtree.
//!
//! Given an Action with a fixed `[start_date, finish_date]` window, the
//! scheduler lays its Tasks out back to back in dependency order starting at
//! the window's start, then does the same for every Task's Subtasks inside
//! the Task's freshly computed window.
//!
//! ```text
//!   Action  |2024-01-01 ........................ 2024-01-10|
//!   Task A  |01-01 ... 01-05|                  (preset 5 days)
//!   Task B                  |01-06 .. 01-08|   (depends on A)
//!   Task C                                 |01-09|  (default)
//! ```
//!
//! Problems are collected rather than returned early so a single run reports
//! everything that does not fit. The plan is only updated when the whole
//! subtree fits; otherwise the outcome lists the issues and no date changes.

use jiff::{civil::Date, Span};
use log::debug;

use crate::{
    error::Result,
    models::{NodeId, NodePath},
    plan::ActionPlan,
};

mod issue;
pub mod topo;


pub use issue::ScheduleIssue;

/// Scheduling policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Days given to a node without a usable preset date range
    pub default_duration_days: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            default_duration_days: 1,
        }
    }
}

impl ScheduleOptions {
    pub fn with_default_duration_days(mut self, days: u32) -> Self {
        self.default_duration_days = days;
        self
    }
}

/// Dates computed for a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub node: NodeId,
    pub start: Date,
    pub finish: Date,
}

/// Result of an autopilot run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    /// Everything fits; `plan` carries the new dates
    Scheduled {
        plan: ActionPlan,
        assignments: Vec<Assignment>,
    },
    /// At least one problem; the input plan stays as it was
    Infeasible { issues: Vec<ScheduleIssue> },
}

impl ScheduleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled { .. })
    }

    /// Issues reported by an infeasible run, empty on success.
    pub fn issues(&self) -> &[ScheduleIssue] {
        match self {
            ScheduleOutcome::Scheduled { .. } => &[],
            ScheduleOutcome::Infeasible { issues } => issues,
        }
    }

    /// The rescheduled plan, if the run succeeded.
    pub fn into_plan(self) -> Option<ActionPlan> {
        match self {
            ScheduleOutcome::Scheduled { plan, .. } => Some(plan),
            ScheduleOutcome::Infeasible { .. } => None,
        }
    }
}

/// Computes contiguous, dependency-respecting dates for every Task and
/// Subtask under `action`.
///
/// Sibling order decides between independent nodes, so running autopilot
/// twice on the same input yields the same dates.
///
/// # Errors
///
/// Infeasibility is reported through [`ScheduleOutcome::Infeasible`]; an
/// `Err` only means the Action could not be resolved or a date left the
/// supported range.
///
/// * `PlanError::NodeNotFound` - no node with that id
/// * `PlanError::WrongKind` - the id names a Task or Subtask
///
/// # Examples
///
/// ```rust
/// use actionplan_core::{ActionPlan, models::{FieldUpdate, NodePath}};
/// use actionplan_core::schedule::{run_autopilot, ScheduleOptions};
/// use jiff::civil::date;
///
/// let (plan, action) = ActionPlan::new().add_action("Launch")?;
/// let path = NodePath::Action(action);
/// let plan = plan
///     .update_field(&path, FieldUpdate::StartDate(Some(date(2024, 1, 1))))?
///     .update_field(&path, FieldUpdate::FinishDate(Some(date(2024, 1, 10))))?;
/// let (plan, first) = plan.add_task(action, "First")?;
/// let (plan, second) = plan.add_task(action, "Second")?;
///
/// let outcome = run_autopilot(&plan, action, &ScheduleOptions::default())?;
/// let plan = outcome.into_plan().expect("fits in the window");
/// assert_eq!(plan.node(first)?.start_date, Some(date(2024, 1, 1)));
/// assert_eq!(plan.node(second)?.finish_date, Some(date(2024, 1, 2)));
/// # Ok::<(), actionplan_core::PlanError>(())
/// ```
pub fn run_autopilot(
    plan: &ActionPlan,
    action: NodeId,
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome> {
    plan.resolve(&NodePath::Action(action))?;
    let node = plan.node(action)?;

    let (start, finish) = match (node.start_date, node.finish_date) {
        (Some(start), Some(finish)) => (start, finish),
        _ => {
            return Ok(ScheduleOutcome::Infeasible {
                issues: vec![ScheduleIssue::MissingWindow {
                    action,
                    name: node.name.clone(),
                }],
            });
        }
    };
    if finish < start {
        return Ok(ScheduleOutcome::Infeasible {
            issues: vec![ScheduleIssue::InvertedWindow {
                action,
                name: node.name.clone(),
                start,
                finish,
            }],
        });
    }

    let mut scheduler = Scheduler {
        plan,
        default_days: i64::from(options.default_duration_days.max(1)),
        assignments: Vec::new(),
        issues: Vec::new(),
    };
    scheduler.layout(action, start, finish)?;

    if !scheduler.issues.is_empty() {
        debug!(
            "Autopilot for action {action} found {} issue(s)",
            scheduler.issues.len()
        );
        return Ok(ScheduleOutcome::Infeasible {
            issues: scheduler.issues,
        });
    }

    let mut next = plan.clone();
    for assignment in &scheduler.assignments {
        next.set_dates(assignment.node, assignment.start, assignment.finish)?;
    }
    debug!(
        "Autopilot for action {action} scheduled {} node(s)",
        scheduler.assignments.len()
    );

    Ok(ScheduleOutcome::Scheduled {
        plan: next,
        assignments: scheduler.assignments,
    })
}

struct Scheduler<'a> {
    plan: &'a ActionPlan,
    default_days: i64,
    assignments: Vec<Assignment>,
    issues: Vec<ScheduleIssue>,
}

impl Scheduler<'_> {
    /// Lays the children of `parent` out inside `[window_start, window_finish]`
    /// and recurses one level down.
    fn layout(&mut self, parent: NodeId, window_start: Date, window_finish: Date) -> Result<()> {
        let plan = self.plan;
        let children = &plan.node(parent)?.children;

        let dependencies_of = |id: NodeId| {
            plan.get(id)
                .map(|node| node.dependencies.as_slice())
                .unwrap_or(&[])
        };

        let order = match topo::stable_order(children, dependencies_of) {
            Ok(order) => order,
            Err(members) => {
                self.issues.push(ScheduleIssue::CyclicDependency {
                    parent,
                    members: members
                        .into_iter()
                        .map(|id| (id, plan.get(id).map(|n| n.name.clone()).unwrap_or_default()))
                        .collect(),
                });
                return Ok(());
            }
        };

        let mut cursor = Some(window_start);
        for id in order {
            let node = plan.node(id)?;
            let days = node.duration_days().unwrap_or(self.default_days);
            let Some((start, finish)) =
                cursor.and_then(|start| Some((start, add_days(start, days - 1)?)))
            else {
                // Past the last representable date, so past any window too
                self.issues.push(ScheduleIssue::ExceedsWindow {
                    node: id,
                    name: node.name.clone(),
                    finish: Date::MAX,
                    limit: window_finish,
                });
                return Ok(());
            };

            if finish > window_finish {
                self.issues.push(ScheduleIssue::ExceedsWindow {
                    node: id,
                    name: node.name.clone(),
                    finish,
                    limit: window_finish,
                });
            }
            self.assignments.push(Assignment {
                node: id,
                start,
                finish,
            });
            cursor = add_days(start, days);

            if !node.children.is_empty() {
                self.layout(id, start, finish)?;
            }
        }
        Ok(())
    }
}

fn add_days(date: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    date.checked_add(span).ok()
}
