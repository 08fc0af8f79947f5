//! Command handlers: run one command against the workspace and render it.

use std::fs;

use actionplan_core::{
    build_timeline,
    display::{
        ActionSummaries, EditReport, GanttChart, OperationStatus, PlanOutline, PlanTable,
        StatusBoard,
    },
    params::Edit,
    ActionPlan, EditResult, NodeId, PlanDocument, PlanError, ViewMode, Workspace,
};
use anyhow::{bail, Context, Result};
use log::debug;

use crate::{
    args::{
        ActionCommands, AutopilotArgs, DepCommands, ExportArgs, ImportArgs, NodeCommands,
        ShowArgs, SubtaskCommands, TaskCommands,
    },
    renderer::TerminalRenderer,
};

/// Handles commands for one named plan.
pub struct Cli {
    workspace: Workspace,
    renderer: TerminalRenderer,
    plan: String,
}

impl Cli {
    pub fn new(workspace: Workspace, renderer: TerminalRenderer, plan: String) -> Self {
        Self {
            workspace,
            renderer,
            plan,
        }
    }

    /// The stored plan, or an empty one if nothing was saved under the name
    /// yet.
    async fn current_plan(&self) -> Result<ActionPlan> {
        match self.workspace.get_plan(&self.plan).await {
            Ok(plan) => Ok(plan),
            Err(PlanError::PlanNotFound { .. }) => Ok(ActionPlan::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs one edit and renders what it did.
    async fn edit(&self, edit: Edit) -> Result<()> {
        let command = edit.name();
        let result = self
            .workspace
            .edit(&self.plan, edit)
            .await
            .with_context(|| format!("Failed to run {command} on plan '{}'", self.plan))?;
        debug!("{command}: {result:?}");

        let plan = self.current_plan().await?;
        self.renderer
            .render(&EditReport::new(&result, &plan).to_string())
    }

    pub async fn show(&self, args: ShowArgs) -> Result<()> {
        let plan = self.current_plan().await?;

        let output = match ViewMode::from(args.view) {
            ViewMode::List => PlanOutline::new(&self.plan, &plan).to_string(),
            ViewMode::Table => PlanTable(&plan).to_string(),
            ViewMode::Board => StatusBoard(&plan).to_string(),
            ViewMode::Gantt => {
                let Some(action) = args.action.or_else(|| plan.action_ids().first().copied())
                else {
                    bail!("Plan '{}' has no actions to chart", self.plan);
                };
                let timeline = build_timeline(&plan, action)?;
                GanttChart(&timeline).to_string()
            }
        };
        self.renderer.render(&output)
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self.workspace.stored_plans().await?;
        self.renderer.render(&plans.to_string())
    }

    pub async fn summary(&self) -> Result<()> {
        let plan = self.current_plan().await?;
        let summaries = ActionSummaries(plan.action_summaries());
        self.renderer.render(&summaries.to_string())
    }

    pub async fn handle_action_command(&self, command: ActionCommands) -> Result<()> {
        match command {
            ActionCommands::Add(args) => self.edit(Edit::AddNode(args.into())).await,
            ActionCommands::Reorder(args) => self.edit(Edit::ReorderActions(args.into())).await,
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => self.edit(Edit::AddNode(args.into())).await,
        }
    }

    pub async fn handle_subtask_command(&self, command: SubtaskCommands) -> Result<()> {
        match command {
            SubtaskCommands::Add(args) => self.edit(Edit::AddNode(args.into())).await,
        }
    }

    pub async fn handle_node_command(&self, command: NodeCommands) -> Result<()> {
        match command {
            NodeCommands::Set(args) => self.edit(Edit::SetField(args.into())).await,
            NodeCommands::Dates(args) => {
                let updates = args.into_params();
                if updates.is_empty() {
                    bail!("Give --start, --finish or both");
                }
                for update in updates {
                    self.edit(Edit::SetField(update)).await?;
                }
                Ok(())
            }
            NodeCommands::Delete(args) => self.edit(Edit::DeleteNode(args.into())).await,
            NodeCommands::Move(args) => self.edit(Edit::MoveNode(args.into())).await,
        }
    }

    pub async fn handle_dep_command(&self, command: DepCommands) -> Result<()> {
        match command {
            DepCommands::Add(args) => self.edit(Edit::AddDependency(args.into())).await,
            DepCommands::Remove(args) => self.edit(Edit::RemoveDependency(args.into())).await,
            DepCommands::Candidates(args) => {
                let candidates = self
                    .workspace
                    .dependency_candidates(&self.plan, args.id)
                    .await?;
                self.renderer.render(&candidates.to_string())
            }
            DepCommands::Prune => self.edit(Edit::PruneDangling).await,
        }
    }

    pub async fn autopilot(&self, args: AutopilotArgs) -> Result<()> {
        self.edit(Edit::Autopilot(args.into())).await
    }

    pub async fn gantt(&self, action: NodeId) -> Result<()> {
        let timeline = self.workspace.timeline(&self.plan, action).await?;
        self.renderer.render(&GanttChart(&timeline).to_string())
    }

    pub async fn undo(&self) -> Result<()> {
        let result = self.workspace.edit(&self.plan, Edit::Undo).await?;
        let status = match result {
            EditResult::Undone(true) => OperationStatus::success("Restored the previous version"),
            _ => OperationStatus::failure("Nothing to undo"),
        };
        self.renderer.render(&status.to_string())
    }

    pub async fn export(&self, args: ExportArgs) -> Result<()> {
        let document = self.workspace.export_document(&self.plan).await?;
        let json = serde_json::to_string_pretty(&document)?;

        match args.output {
            Some(path) => {
                fs::write(&path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status = OperationStatus::success(format!(
                    "Exported plan '{}' to {}",
                    self.plan,
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    pub async fn import(&self, args: ImportArgs) -> Result<()> {
        let text = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let document: PlanDocument = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a plan document", args.file.display()))?;

        let plan = self.workspace.import_document(&self.plan, document).await?;
        self.renderer
            .render(&PlanOutline::new(&self.plan, &plan).to_string())
    }

    pub async fn delete_plan(&self, confirmed: bool) -> Result<()> {
        if !confirmed {
            bail!(
                "Deleting plan '{}' cannot be undone; pass --confirm to proceed",
                self.plan
            );
        }

        let status = if self.workspace.delete_plan(&self.plan).await? {
            OperationStatus::success(format!("Deleted plan '{}'", self.plan))
        } else {
            OperationStatus::failure(format!("Plan '{}' not found", self.plan))
        };
        self.renderer.render(&status.to_string())
    }
}
