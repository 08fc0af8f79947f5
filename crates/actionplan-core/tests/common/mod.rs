use actionplan_core::{
    models::{FieldUpdate, NodePath},
    ActionPlan, NodeId, Workspace, WorkspaceBuilder,
};
use jiff::civil::Date;
use tempfile::TempDir;

/// Helper function to create a test workspace
#[allow(dead_code)]
pub async fn create_test_workspace() -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workspace");
    (temp_dir, workspace)
}

/// Sets both dates of the node at `path`.
#[allow(dead_code)]
pub fn with_dates(plan: &ActionPlan, path: NodePath, start: Date, finish: Date) -> ActionPlan {
    plan.update_field(&path, FieldUpdate::StartDate(Some(start)))
        .and_then(|plan| plan.update_field(&path, FieldUpdate::FinishDate(Some(finish))))
        .expect("Failed to set dates")
}

/// Every node's dates, in arena order.
#[allow(dead_code)]
pub fn all_dates(plan: &ActionPlan) -> Vec<(NodeId, Option<Date>, Option<Date>)> {
    plan.nodes()
        .map(|node| (node.id, node.start_date, node.finish_date))
        .collect()
}
