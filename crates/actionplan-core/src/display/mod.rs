//! Display formatting for plans, command results and timelines.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! anything that needs more context than a single value, such as a whole
//! plan outline or a stored plan list, gets a newtype wrapper here. All
//! output is markdown so hosts can render it richly or print it as is.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Node, Outcome) │───▶│ Result Types    │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: plan outline, table, board and list wrappers
//! - [`results`]: command and autopilot results
//! - [`status`]: confirmation messages (OperationStatus)
//! - [`datetime`]: timestamp formatting
//! - [`timeline`]: ASCII Gantt chart
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use actionplan_core::{ActionPlan, display::PlanOutline};
//!
//! let (plan, action) = ActionPlan::new().add_action("Launch")?;
//! let (plan, _) = plan.add_task(action, "Design")?;
//!
//! let output = PlanOutline::new("launch", &plan).to_string();
//! assert!(output.contains("## 1. Launch"));
//! assert!(output.contains("Design"));
//! # Ok::<(), actionplan_core::PlanError>(())
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod timeline;

pub use collections::{
    ActionSummaries, Candidates, PlanOutline, PlanTable, StatusBoard, StoredPlans,
};
pub use datetime::LocalDateTime;
pub use results::{EditReport, ScheduleReport};
pub use status::OperationStatus;
pub use timeline::GanttChart;
