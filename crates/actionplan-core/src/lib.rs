//! Core library for action plans.
//!
//! An action plan is a three-level tree (Actions, Tasks, Subtasks) with
//! dependency edges allowed between any two nodes as long as they never form
//! a cycle. This crate holds the pure plan engine, the autopilot scheduler
//! and the SQLite-backed store hosts use to keep named plans around.
//!
//! # Architecture
//!
//! - **Plan engine** ([`plan`], [`graph`]): persistent, immutable plans;
//!   every operation returns a new [`ActionPlan`] and leaves the input alone
//! - **Autopilot** ([`schedule`]): assigns dates to an Action's subtree in
//!   dependency order, all or nothing
//! - **Sessions** ([`session`], [`history`]): the current plan plus bounded
//!   undo history
//! - **Workspace** ([`workspace`], [`db`]): async access to named plans
//!   persisted in SQLite
//! - **Display** ([`display`], [`timeline`]): markdown rendering of plans,
//!   results and Gantt charts
//!
//! # Quick Start
//!
//! ```rust
//! use actionplan_core::{
//!     models::{FieldUpdate, NodePath},
//!     schedule::{run_autopilot, ScheduleOptions},
//!     ActionPlan,
//! };
//! use jiff::civil::date;
//!
//! let (plan, launch) = ActionPlan::new().add_action("Launch")?;
//! let (plan, design) = plan.add_task(launch, "Design")?;
//! let (plan, build) = plan.add_task(launch, "Build")?;
//!
//! let action = NodePath::Action(launch);
//! let plan = plan
//!     .update_field(&action, FieldUpdate::StartDate(Some(date(2024, 1, 1))))?
//!     .update_field(&action, FieldUpdate::FinishDate(Some(date(2024, 1, 10))))?
//!     .add_dependency(&NodePath::Task(launch, design), build)?;
//!
//! let outcome = run_autopilot(&plan, launch, &ScheduleOptions::default())?;
//! let scheduled = outcome.into_plan().expect("fits in the window");
//! assert_eq!(scheduled.node(build)?.start_date, Some(date(2024, 1, 1)));
//! assert_eq!(scheduled.node(design)?.start_date, Some(date(2024, 1, 2)));
//! # Ok::<(), actionplan_core::PlanError>(())
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod graph;
pub mod history;
pub mod models;
pub mod params;
pub mod plan;
pub mod schedule;
pub mod session;
pub mod timeline;
pub mod view;
pub mod workspace;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    ActionSummaries, Candidates, EditReport, GanttChart, LocalDateTime, OperationStatus,
    PlanOutline, PlanTable, ScheduleReport, StatusBoard, StoredPlans,
};
pub use error::{PlanError, Result};
pub use graph::DependencyGraph;
pub use history::History;
pub use models::{
    ActionSummary, FieldUpdate, FlatNode, Node, NodeId, NodeKind, NodePath, NodeRecord,
    PlanDocument, Priority, Status, StoredPlanInfo,
};
pub use params::Edit;
pub use plan::{ActionPlan, DanglingPolicy, Direction};
pub use schedule::{run_autopilot, ScheduleIssue, ScheduleOptions, ScheduleOutcome};
pub use session::{Applied, EditResult, Session, SessionConfig};
pub use timeline::{build_timeline, Timeline};
pub use view::{ViewMode, ViewState};
pub use workspace::{Workspace, WorkspaceBuilder};
