//! Result wrapper types for displaying command outcomes.

use std::fmt;

use crate::{
    plan::ActionPlan,
    schedule::ScheduleOutcome,
    session::{Applied, EditResult},
};

/// Autopilot outcome: the assigned dates on success, every issue otherwise.
///
/// # Examples
///
/// ```rust
/// use actionplan_core::{ActionPlan, display::ScheduleReport};
/// use actionplan_core::schedule::{run_autopilot, ScheduleOptions};
///
/// let (plan, action) = ActionPlan::new().add_action("Undated")?;
/// let outcome = run_autopilot(&plan, action, &ScheduleOptions::default())?;
///
/// let output = ScheduleReport(&outcome).to_string();
/// assert!(output.contains("could not be scheduled"));
/// # Ok::<(), actionplan_core::PlanError>(())
/// ```
pub struct ScheduleReport<'a>(pub &'a ScheduleOutcome);

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ScheduleOutcome::Scheduled { plan, assignments } => {
                writeln!(f, "Autopilot scheduled {} node(s):", assignments.len())?;
                writeln!(f)?;
                for assignment in assignments {
                    let (indent, name) = match plan.get(assignment.node) {
                        Some(node) => ("  ".repeat(node.kind.depth()), node.name.as_str()),
                        None => (String::new(), ""),
                    };
                    writeln!(
                        f,
                        "{indent}- {}. {name}: {} → {}",
                        assignment.node, assignment.start, assignment.finish
                    )?;
                }
                Ok(())
            }
            ScheduleOutcome::Infeasible { issues } => {
                writeln!(f, "The action could not be scheduled; no dates were changed.")?;
                writeln!(f)?;
                writeln!(f, "Issues:")?;
                for issue in issues {
                    writeln!(f, "- {issue}")?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of one editing command, described against the plan it produced.
pub struct EditReport<'a> {
    pub result: &'a EditResult,
    pub plan: &'a ActionPlan,
}

impl<'a> EditReport<'a> {
    pub fn new(result: &'a EditResult, plan: &'a ActionPlan) -> Self {
        Self { result, plan }
    }
}

impl fmt::Display for EditReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            EditResult::Created(Applied::Changed(id)) => {
                match self.plan.get(*id) {
                    Some(node) => writeln!(f, "Created {} with ID: {id}", node.kind)?,
                    None => writeln!(f, "Created node with ID: {id}")?,
                }
                if let Ok(path) = self.plan.path_of(*id) {
                    writeln!(f)?;
                    writeln!(f, "Path: `{path}`")?;
                }
                Ok(())
            }
            EditResult::Modified(Applied::Changed(())) => writeln!(f, "Plan updated."),
            EditResult::Pruned(Applied::Changed(count)) => {
                writeln!(f, "Removed {count} dangling dependency reference(s).")
            }
            EditResult::Created(Applied::Unchanged)
            | EditResult::Modified(Applied::Unchanged)
            | EditResult::Pruned(Applied::Unchanged) => writeln!(f, "Nothing to change."),
            EditResult::Created(Applied::Stale(id))
            | EditResult::Modified(Applied::Stale(id))
            | EditResult::Pruned(Applied::Stale(id)) => {
                writeln!(f, "Node {id} no longer exists; nothing was changed.")
            }
            EditResult::Scheduled(outcome) => write!(f, "{}", ScheduleReport(outcome)),
            EditResult::Undone(true) => writeln!(f, "Restored the previous version of the plan."),
            EditResult::Undone(false) => writeln!(f, "Nothing to undo."),
        }
    }
}
