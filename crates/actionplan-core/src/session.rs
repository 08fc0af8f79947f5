//! Editing session: the current plan, its undo history and the policies
//! applied to every command.
//!
//! A [`Session`] is what an interactive host holds on to. Every command runs
//! one pure plan operation and, when it succeeds and actually changes the
//! plan, snapshots the previous plan before replacing it.
//!
//! Commands aimed at nodes that no longer exist are tolerated: hosts can
//! queue an edit for a node another event has just deleted, so a
//! `NodeNotFound` outcome is logged and reported as [`Applied::Stale`]
//! instead of an error. Every other error, a refused dependency included,
//! is returned and leaves the plan as it was.

use log::{debug, warn};

use crate::{
    error::{PlanError, Result},
    history::{History, DEFAULT_HISTORY_LIMIT},
    models::{FieldUpdate, NodeId, NodePath},
    params::{AddNode, Edit},
    plan::{ActionPlan, DanglingPolicy, Direction},
    schedule::{self, ScheduleOptions, ScheduleOutcome},
};

/// Policies a session applies to its commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Snapshots kept for undo
    pub history_limit: usize,
    /// What deleting a node does to references to it
    pub dangling_policy: DanglingPolicy,
    pub schedule: ScheduleOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            dangling_policy: DanglingPolicy::default(),
            schedule: ScheduleOptions::default(),
        }
    }
}

/// What a session command did to the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<T> {
    /// The plan changed and the previous one was pushed onto the history
    Changed(T),
    /// The command succeeded but produced an equal plan
    Unchanged,
    /// The command referenced a node that does not exist; nothing happened
    Stale(NodeId),
}

impl<T> Applied<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Applied::Changed(_))
    }

    /// The value carried by a change, if any.
    pub fn changed(self) -> Option<T> {
        match self {
            Applied::Changed(value) => Some(value),
            _ => None,
        }
    }
}

/// Result of [`Session::execute`], one variant per kind of command.
#[derive(Debug, Clone, PartialEq)]
pub enum EditResult {
    Created(Applied<NodeId>),
    Modified(Applied<()>),
    Pruned(Applied<usize>),
    Scheduled(ScheduleOutcome),
    /// Whether a snapshot was restored
    Undone(bool),
}

impl EditResult {
    /// Whether the session's plan differs from before the command.
    pub fn changed_plan(&self) -> bool {
        match self {
            EditResult::Created(applied) => applied.is_changed(),
            EditResult::Modified(applied) => applied.is_changed(),
            EditResult::Pruned(applied) => applied.is_changed(),
            EditResult::Scheduled(outcome) => outcome.is_success(),
            EditResult::Undone(restored) => *restored,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    plan: ActionPlan,
    history: History,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Starts a session on an empty plan.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_plan(ActionPlan::new(), config)
    }

    pub fn with_plan(plan: ActionPlan, config: SessionConfig) -> Self {
        Self::from_parts(plan, History::with_limit(config.history_limit), config)
    }

    /// Restores a session whose history was persisted separately.
    pub fn from_parts(plan: ActionPlan, history: History, config: SessionConfig) -> Self {
        Self {
            plan,
            history,
            config,
        }
    }

    pub fn plan(&self) -> &ActionPlan {
        &self.plan
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_plan(self) -> ActionPlan {
        self.plan
    }

    /// Runs `op` against the current plan and commits its result.
    ///
    /// `op` returns the next plan and a value handed back to the caller.
    pub fn apply<T, F>(&mut self, command: &str, op: F) -> Result<Applied<T>>
    where
        F: FnOnce(&ActionPlan) -> Result<(ActionPlan, T)>,
    {
        match op(&self.plan) {
            Ok((next, value)) => {
                if next == self.plan {
                    debug!("{command}: plan unchanged");
                    return Ok(Applied::Unchanged);
                }
                self.commit(next);
                debug!("{command}: committed, {} snapshot(s) in history", self.history.len());
                Ok(Applied::Changed(value))
            }
            Err(PlanError::NodeNotFound { id }) => {
                warn!("{command}: node {id} no longer exists, ignoring");
                Ok(Applied::Stale(id))
            }
            Err(e) => Err(e),
        }
    }

    pub fn add_action(&mut self, name: &str) -> Result<Applied<NodeId>> {
        self.apply("add_action", |plan| plan.add_action(name))
    }

    pub fn add_task(&mut self, action: NodeId, name: &str) -> Result<Applied<NodeId>> {
        self.apply("add_task", |plan| plan.add_task(action, name))
    }

    pub fn add_subtask(&mut self, action: NodeId, task: NodeId, name: &str) -> Result<Applied<NodeId>> {
        self.apply("add_subtask", |plan| plan.add_subtask(action, task, name))
    }

    /// Adds a child of the right kind under the node at `parent`.
    pub fn add_child(&mut self, parent: &NodePath, name: &str) -> Result<Applied<NodeId>> {
        self.apply("add_child", |plan| plan.add_child(parent, name))
    }

    pub fn update_field(&mut self, path: &NodePath, update: FieldUpdate) -> Result<Applied<()>> {
        self.apply("update_field", |plan| Ok((plan.update_field(path, update)?, ())))
    }

    /// Deletes the node at `path`, applying the configured dangling policy.
    pub fn delete_node(&mut self, path: &NodePath) -> Result<Applied<()>> {
        let policy = self.config.dangling_policy;
        self.apply("delete_node", |plan| {
            Ok((plan.delete_node_with(path, policy)?, ()))
        })
    }

    pub fn move_sibling(&mut self, path: &NodePath, direction: Direction) -> Result<Applied<()>> {
        self.apply("move_sibling", |plan| {
            Ok((plan.move_sibling(path, direction)?, ()))
        })
    }

    pub fn reorder_actions(&mut self, ordered: &[NodeId]) -> Result<Applied<()>> {
        self.apply("reorder_actions", |plan| {
            Ok((plan.reorder_actions(ordered)?, ()))
        })
    }

    pub fn add_dependency(&mut self, path: &NodePath, dependency: NodeId) -> Result<Applied<()>> {
        self.apply("add_dependency", |plan| {
            Ok((plan.add_dependency(path, dependency)?, ()))
        })
    }

    pub fn remove_dependency(&mut self, path: &NodePath, dependency: NodeId) -> Result<Applied<()>> {
        self.apply("remove_dependency", |plan| {
            Ok((plan.remove_dependency(path, dependency)?, ()))
        })
    }

    /// Strips every dangling dependency reference and reports how many were
    /// removed.
    pub fn prune_dangling(&mut self) -> Result<Applied<usize>> {
        self.apply("prune_dangling", |plan| {
            let removed = plan.dangling_dependencies().len();
            Ok((plan.prune_dangling_dependencies(), removed))
        })
    }

    /// Runs autopilot on an Action and commits the new dates only if the
    /// whole subtree fits.
    ///
    /// Unlike the editing commands, an unknown Action id is returned as an
    /// error: there is no outcome to report for it.
    pub fn autopilot(&mut self, action: NodeId) -> Result<ScheduleOutcome> {
        let outcome = schedule::run_autopilot(&self.plan, action, &self.config.schedule)?;
        if let ScheduleOutcome::Scheduled { plan, .. } = &outcome {
            if *plan != self.plan {
                self.commit(plan.clone());
            }
        }
        Ok(outcome)
    }

    /// Restores the most recent snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.plan = previous;
                debug!("undo: {} snapshot(s) left", self.history.len());
                true
            }
            None => false,
        }
    }

    /// Runs one command described by parameters.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidInput` - a field update that does not parse
    /// * any error of the underlying command other than `NodeNotFound`
    pub fn execute(&mut self, edit: Edit) -> Result<EditResult> {
        debug!("execute: {}", edit.name());
        match edit {
            Edit::AddNode(AddNode { parent, name }) => {
                let applied = match parent {
                    Some(parent) => self.add_child(&parent, &name)?,
                    None => self.add_action(&name)?,
                };
                Ok(EditResult::Created(applied))
            }
            Edit::SetField(params) => {
                let path = params.path.clone();
                let update = FieldUpdate::try_from(params)?;
                Ok(EditResult::Modified(self.update_field(&path, update)?))
            }
            Edit::DeleteNode(params) => Ok(EditResult::Modified(self.delete_node(&params.path)?)),
            Edit::MoveNode(params) => Ok(EditResult::Modified(
                self.move_sibling(&params.path, params.direction)?,
            )),
            Edit::ReorderActions(params) => {
                Ok(EditResult::Modified(self.reorder_actions(&params.order)?))
            }
            Edit::AddDependency(params) => Ok(EditResult::Modified(
                self.add_dependency(&params.path, params.dependency)?,
            )),
            Edit::RemoveDependency(params) => Ok(EditResult::Modified(
                self.remove_dependency(&params.path, params.dependency)?,
            )),
            Edit::PruneDangling => Ok(EditResult::Pruned(self.prune_dangling()?)),
            Edit::Autopilot(params) => Ok(EditResult::Scheduled(self.autopilot(params.action)?)),
            Edit::Undo => Ok(EditResult::Undone(self.undo())),
        }
    }

    fn commit(&mut self, next: ActionPlan) {
        let previous = std::mem::replace(&mut self.plan, next);
        self.history.push(previous);
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_commands_push_history_and_undo_restores() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let task = session.add_task(action, "Design").unwrap().changed().unwrap();
        assert_eq!(session.history().len(), 2);

        assert!(session.undo());
        assert!(!session.plan().contains(task));
        assert!(session.plan().contains(action));
        assert!(session.undo());
        assert!(session.plan().is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_stale_reference_is_a_noop() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let before = session.plan().clone();

        let applied = session
            .update_field(
                &NodePath::Task(action, NodeId(99)),
                FieldUpdate::Name("x".into()),
            )
            .unwrap();
        assert_eq!(applied, Applied::Stale(NodeId(99)));
        assert_eq!(session.plan(), &before);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_rejected_dependency_is_returned() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let a = session.add_task(action, "A").unwrap().changed().unwrap();
        let b = session.add_task(action, "B").unwrap().changed().unwrap();
        session.add_dependency(&NodePath::Task(action, a), b).unwrap();
        let history = session.history().len();

        let err = session
            .add_dependency(&NodePath::Task(action, b), a)
            .unwrap_err();
        assert!(err.is_cycle_rejection());
        assert_eq!(session.history().len(), history);
    }

    #[test]
    fn test_noop_moves_do_not_snapshot() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let history = session.history().len();

        let applied = session
            .move_sibling(&NodePath::Action(action), Direction::Up)
            .unwrap();
        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(session.history().len(), history);
    }

    #[test]
    fn test_delete_honours_dangling_policy() {
        let config = SessionConfig {
            dangling_policy: DanglingPolicy::Prune,
            ..SessionConfig::default()
        };
        let mut session = Session::new(config);
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let a = session.add_task(action, "A").unwrap().changed().unwrap();
        let b = session.add_task(action, "B").unwrap().changed().unwrap();
        session.add_dependency(&NodePath::Task(action, b), a).unwrap();

        session.delete_node(&NodePath::Task(action, a)).unwrap();
        assert!(session.plan().node(b).unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_prune_reports_removed_count() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let a = session.add_task(action, "A").unwrap().changed().unwrap();
        let b = session.add_task(action, "B").unwrap().changed().unwrap();
        session.add_dependency(&NodePath::Task(action, b), a).unwrap();
        session.delete_node(&NodePath::Task(action, a)).unwrap();

        assert_eq!(session.prune_dangling().unwrap(), Applied::Changed(1));
        assert_eq!(session.prune_dangling().unwrap(), Applied::Unchanged);
    }

    #[test]
    fn test_autopilot_commits_only_on_success() {
        let mut session = Session::default();
        let action = session.add_action("Launch").unwrap().changed().unwrap();
        let path = NodePath::Action(action);
        session
            .update_field(&path, FieldUpdate::StartDate(Some(date(2024, 1, 1))))
            .unwrap();
        session
            .update_field(&path, FieldUpdate::FinishDate(Some(date(2024, 1, 1))))
            .unwrap();
        let a = session.add_task(action, "A").unwrap().changed().unwrap();
        let history = session.history().len();

        let outcome = session.autopilot(action).unwrap();
        assert!(outcome.is_success());
        assert_eq!(session.history().len(), history + 1);
        assert_eq!(session.plan().node(a).unwrap().start_date, Some(date(2024, 1, 1)));

        session.add_task(action, "B").unwrap();
        let before = session.plan().clone();
        let outcome = session.autopilot(action).unwrap();
        assert!(!outcome.is_success());
        assert_eq!(session.plan(), &before);
    }

    #[test]
    fn test_execute_dispatches_params() {
        use crate::params::{DependencyEdit, SetField};

        let mut session = Session::default();
        let created = session
            .execute(Edit::AddNode(AddNode {
                parent: None,
                name: "Launch".into(),
            }))
            .unwrap();
        let EditResult::Created(Applied::Changed(action)) = created else {
            panic!("expected a new action");
        };

        let result = session
            .execute(Edit::SetField(SetField {
                path: NodePath::Action(action),
                field: "status".into(),
                value: "blocked".into(),
            }))
            .unwrap();
        assert!(result.changed_plan());

        let bad = session.execute(Edit::SetField(SetField {
            path: NodePath::Action(action),
            field: "colour".into(),
            value: "red".into(),
        }));
        assert!(matches!(bad, Err(PlanError::InvalidInput { .. })));

        let stale = session
            .execute(Edit::RemoveDependency(DependencyEdit {
                path: NodePath::Action(NodeId(50)),
                dependency: action,
            }))
            .unwrap();
        assert_eq!(stale, EditResult::Modified(Applied::Stale(NodeId(50))));
        assert!(!stale.changed_plan());

        assert_eq!(session.execute(Edit::Undo).unwrap(), EditResult::Undone(true));
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = SessionConfig {
            history_limit: 2,
            ..SessionConfig::default()
        };
        let mut session = Session::new(config);
        for name in ["a", "b", "c", "d"] {
            session.add_action(name).unwrap();
        }
        assert_eq!(session.history().len(), 2);
    }
}
