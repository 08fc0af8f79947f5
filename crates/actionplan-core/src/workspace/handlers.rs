//! Read-only handlers that return display wrappers for the Workspace.

use super::Workspace;
use crate::{
    display::{ActionSummaries, Candidates, StoredPlans},
    error::Result,
    models::NodeId,
    timeline::{self, Timeline},
};

impl Workspace {
    /// Handle listing every stored plan.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use actionplan_core::WorkspaceBuilder;
    /// # async {
    /// let workspace = WorkspaceBuilder::new().build().await?;
    /// let plans = workspace.stored_plans().await?;
    /// println!("{plans}");
    /// # Result::<(), actionplan_core::PlanError>::Ok(())
    /// # };
    /// ```
    pub async fn stored_plans(&self) -> Result<StoredPlans> {
        Ok(StoredPlans(self.list_plans().await?))
    }

    /// Handle summarising progress of every Action in a plan.
    ///
    /// # Errors
    ///
    /// * `PlanError::PlanNotFound` - no plan with that name
    pub async fn action_summaries(&self, name: &str) -> Result<ActionSummaries> {
        let plan = self.get_plan(name).await?;
        Ok(ActionSummaries(plan.action_summaries()))
    }

    /// Handle listing the nodes `id` may depend on, in display order.
    ///
    /// # Errors
    ///
    /// * `PlanError::PlanNotFound` - no plan with that name
    /// * `PlanError::NodeNotFound` - `id` is not in the plan
    pub async fn dependency_candidates(&self, name: &str, id: NodeId) -> Result<Candidates> {
        let plan = self.get_plan(name).await?;
        let allowed = plan.dependency_candidates(id)?;

        let nodes = plan
            .flatten()
            .into_iter()
            .filter(|node| allowed.contains(&node.id))
            .collect();
        Ok(Candidates(nodes))
    }

    /// Handle building the Gantt timeline of one Action.
    ///
    /// # Errors
    ///
    /// * `PlanError::PlanNotFound` - no plan with that name
    /// * `PlanError::NodeNotFound` / `PlanError::WrongKind` - `action` is
    ///   not an Action of the plan
    pub async fn timeline(&self, name: &str, action: NodeId) -> Result<Timeline> {
        let plan = self.get_plan(name).await?;
        timeline::build_timeline(&plan, action)
    }
}
