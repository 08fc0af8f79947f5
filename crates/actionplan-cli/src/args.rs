//! Command-line interface definitions using clap
//!
//! Every subcommand takes a clap `Args` wrapper that converts into the core
//! parameter type with `From`, so clap attributes never leak into the core:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workspace::edit
//! ```

use std::path::PathBuf;

use actionplan_core::{
    params::{AddNode, Autopilot, DependencyEdit, MoveNode, NodeRef, ReorderActions, SetField},
    Direction, NodeId, NodePath, ViewMode,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

/// Plan work as Actions, Tasks and Subtasks with dependencies, then let
/// autopilot lay out the dates.
#[derive(Parser)]
#[command(version, about, name = "ap")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/actionplan/actionplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Name of the stored plan to work on
    #[arg(long, short = 'p', global = true, default_value = "default")]
    pub plan: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Number of undo snapshots to keep per plan
    #[arg(long, global = true)]
    pub history_limit: Option<usize>,

    /// Strip references to deleted nodes from other nodes' dependencies
    #[arg(long, global = true)]
    pub prune_dangling: bool,

    /// Days autopilot gives a node that has no preset dates
    #[arg(long, global = true)]
    pub default_duration: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the current plan is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current plan
    #[command(alias = "s")]
    Show(ShowArgs),
    /// List stored plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Progress summary per Action
    Summary,
    /// Manage Actions
    #[command(alias = "a")]
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },
    /// Manage Tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage Subtasks
    #[command(alias = "st")]
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommands,
    },
    /// Edit any node by path
    #[command(alias = "n")]
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
    /// Manage dependencies between nodes
    #[command(alias = "d")]
    Dep {
        #[command(subcommand)]
        command: DepCommands,
    },
    /// Lay out dates for every Task and Subtask of an Action
    Autopilot(AutopilotArgs),
    /// Draw an Action's timeline
    Gantt(GanttArgs),
    /// Restore the plan as it was before the last change
    Undo,
    /// Write the plan as a JSON document
    Export(ExportArgs),
    /// Replace the plan with a JSON document
    Import(ImportArgs),
    /// Delete the stored plan and its history
    #[command(name = "delete-plan")]
    DeletePlan(DeletePlanArgs),
}

/// Show the current plan
#[derive(ClapArgs)]
pub struct ShowArgs {
    /// Presentation to use
    #[arg(long, short, value_enum, default_value_t = ViewArg::List)]
    pub view: ViewArg,
    /// Action to chart when using the gantt view (defaults to the first)
    #[arg(long)]
    pub action: Option<NodeId>,
}

/// Command-line representation of view modes
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    List,
    Board,
    Table,
    Gantt,
}

impl From<ViewArg> for ViewMode {
    fn from(val: ViewArg) -> Self {
        match val {
            ViewArg::List => ViewMode::List,
            ViewArg::Board => ViewMode::Board,
            ViewArg::Table => ViewMode::Table,
            ViewArg::Gantt => ViewMode::Gantt,
        }
    }
}

/// Add a new Action to the end of the plan
#[derive(ClapArgs)]
pub struct AddActionArgs {
    /// Name of the Action
    pub name: String,
}

impl From<AddActionArgs> for AddNode {
    fn from(val: AddActionArgs) -> Self {
        AddNode {
            parent: None,
            name: val.name,
        }
    }
}

#[derive(Subcommand)]
pub enum ActionCommands {
    /// Add a new Action
    #[command(alias = "a")]
    Add(AddActionArgs),
    /// Reorder Actions
    #[command(alias = "r")]
    Reorder(ReorderArgs),
}

/// Add a Task under an Action
#[derive(ClapArgs)]
pub struct AddTaskArgs {
    #[arg(help = "ID of the Action to add the Task to")]
    pub action: NodeId,
    /// Name of the Task
    pub name: String,
}

impl From<AddTaskArgs> for AddNode {
    fn from(val: AddTaskArgs) -> Self {
        AddNode {
            parent: Some(NodePath::Action(val.action)),
            name: val.name,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new Task
    #[command(alias = "a")]
    Add(AddTaskArgs),
}

/// Add a Subtask under a Task
#[derive(ClapArgs)]
pub struct AddSubtaskArgs {
    #[arg(help = "ID of the Action the Task belongs to")]
    pub action: NodeId,
    #[arg(help = "ID of the Task to add the Subtask to")]
    pub task: NodeId,
    /// Name of the Subtask
    pub name: String,
}

impl From<AddSubtaskArgs> for AddNode {
    fn from(val: AddSubtaskArgs) -> Self {
        AddNode {
            parent: Some(NodePath::Task(val.action, val.task)),
            name: val.name,
        }
    }
}

#[derive(Subcommand)]
pub enum SubtaskCommands {
    /// Add a new Subtask
    #[command(alias = "a")]
    Add(AddSubtaskArgs),
}

/// Set one field of a node
///
/// Fields: name, status, priority, start_date, finish_date, description,
/// assignees (comma separated) and metadata (key=value, or key to remove).
/// An empty value clears optional fields.
#[derive(ClapArgs)]
pub struct SetFieldArgs {
    #[arg(help = "Node path: ACTION, ACTION/TASK or ACTION/TASK/SUBTASK")]
    pub path: NodePath,
    pub field: String,
    pub value: String,
}

impl From<SetFieldArgs> for SetField {
    fn from(val: SetFieldArgs) -> Self {
        SetField {
            path: val.path,
            field: val.field,
            value: val.value,
        }
    }
}

/// Set a node's start and finish dates
///
/// Each date given is one change, and one undo step.
#[derive(ClapArgs)]
pub struct DatesArgs {
    #[arg(help = "Node path: ACTION, ACTION/TASK or ACTION/TASK/SUBTASK")]
    pub path: NodePath,
    #[arg(long, help = "Start date (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(long, help = "Finish date (YYYY-MM-DD)")]
    pub finish: Option<Date>,
}

impl DatesArgs {
    pub fn into_params(self) -> Vec<SetField> {
        let dates = [("start_date", self.start), ("finish_date", self.finish)];
        dates
            .into_iter()
            .filter_map(|(field, date)| {
                date.map(|date| SetField {
                    path: self.path,
                    field: field.to_string(),
                    value: date.to_string(),
                })
            })
            .collect()
    }
}

/// Delete a node and everything under it
#[derive(ClapArgs)]
pub struct DeleteNodeArgs {
    #[arg(help = "Node path: ACTION, ACTION/TASK or ACTION/TASK/SUBTASK")]
    pub path: NodePath,
}

impl From<DeleteNodeArgs> for NodeRef {
    fn from(val: DeleteNodeArgs) -> Self {
        NodeRef { path: val.path }
    }
}

/// Command-line representation of sibling move directions
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

/// Swap a node with its previous or next sibling
#[derive(ClapArgs)]
pub struct MoveNodeArgs {
    #[arg(help = "Node path: ACTION, ACTION/TASK or ACTION/TASK/SUBTASK")]
    pub path: NodePath,
    #[arg(value_enum)]
    pub direction: DirectionArg,
}

impl From<MoveNodeArgs> for MoveNode {
    fn from(val: MoveNodeArgs) -> Self {
        MoveNode {
            path: val.path,
            direction: match val.direction {
                DirectionArg::Up => Direction::Up,
                DirectionArg::Down => Direction::Down,
            },
        }
    }
}

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Set one field of a node
    #[command(alias = "s")]
    Set(SetFieldArgs),
    /// Set a node's dates
    Dates(DatesArgs),
    /// Delete a node and its subtree
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteNodeArgs),
    /// Swap a node with a neighbouring sibling
    #[command(alias = "m")]
    Move(MoveNodeArgs),
}

/// Reorder Actions
#[derive(ClapArgs)]
pub struct ReorderArgs {
    /// Every Action ID, in the new order
    #[arg(required = true, num_args = 1..)]
    pub order: Vec<NodeId>,
}

impl From<ReorderArgs> for ReorderActions {
    fn from(val: ReorderArgs) -> Self {
        ReorderActions { order: val.order }
    }
}

/// Add or remove a dependency edge
#[derive(ClapArgs)]
pub struct DependencyArgs {
    #[arg(help = "Path of the node that depends on another")]
    pub path: NodePath,
    #[arg(help = "ID of the node it depends on")]
    pub dependency: NodeId,
}

impl From<DependencyArgs> for DependencyEdit {
    fn from(val: DependencyArgs) -> Self {
        DependencyEdit {
            path: val.path,
            dependency: val.dependency,
        }
    }
}

/// List nodes a node may depend on
#[derive(ClapArgs)]
pub struct CandidatesArgs {
    #[arg(help = "ID of the node to find dependency candidates for")]
    pub id: NodeId,
}

#[derive(Subcommand)]
pub enum DepCommands {
    /// Make a node depend on another
    #[command(alias = "a")]
    Add(DependencyArgs),
    /// Drop a dependency
    #[command(aliases = ["r", "rm"])]
    Remove(DependencyArgs),
    /// List nodes that can be added as dependencies
    #[command(alias = "c")]
    Candidates(CandidatesArgs),
    /// Remove every reference to a deleted node
    Prune,
}

/// Run autopilot on one Action
#[derive(ClapArgs)]
pub struct AutopilotArgs {
    #[arg(help = "ID of the Action to schedule")]
    pub action: NodeId,
}

impl From<AutopilotArgs> for Autopilot {
    fn from(val: AutopilotArgs) -> Self {
        Autopilot { action: val.action }
    }
}

/// Draw an Action's timeline
#[derive(ClapArgs)]
pub struct GanttArgs {
    #[arg(help = "ID of the Action to chart")]
    pub action: NodeId,
}

/// Write the plan as a JSON document
#[derive(ClapArgs)]
pub struct ExportArgs {
    /// File to write instead of standard output
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Replace the plan with a JSON document
#[derive(ClapArgs)]
pub struct ImportArgs {
    /// JSON document to read
    pub file: PathBuf,
}

/// Delete the stored plan permanently
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}
