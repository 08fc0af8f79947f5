use jiff::civil::date;

use super::*;
use crate::models::{FieldUpdate, NodeRecord, PlanDocument, Priority, Status};

/// One Action with two Tasks; the first Task has two Subtasks.
fn sample_plan() -> (ActionPlan, [NodeId; 5]) {
    let (plan, action) = ActionPlan::new().add_action("Launch").unwrap();
    let (plan, design) = plan.add_task(action, "Design").unwrap();
    let (plan, build) = plan.add_task(action, "Build").unwrap();
    let (plan, sketch) = plan.add_subtask(action, design, "Sketch").unwrap();
    let (plan, review) = plan.add_subtask(action, design, "Review").unwrap();
    (plan, [action, design, build, sketch, review])
}

#[test]
fn test_add_nodes_assigns_fresh_ids_and_defaults() {
    let (plan, [action, design, build, sketch, _]) = sample_plan();

    assert_eq!(plan.len(), 5);
    assert_eq!(plan.action_ids(), &[action]);
    let ids: Vec<NodeId> = plan.children(action).unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![design, build]);

    let task = plan.node(design).unwrap();
    assert_eq!(task.kind, NodeKind::Task);
    assert_eq!(task.parent, Some(action));
    assert_eq!(task.status, Status::NotStarted);
    assert_eq!(task.priority, Some(Priority::Medium));

    let subtask = plan.node(sketch).unwrap();
    assert_eq!(subtask.kind, NodeKind::Subtask);
    assert_eq!(subtask.priority, None);
}

#[test]
fn test_operations_leave_input_untouched() {
    let (plan, [action, ..]) = sample_plan();
    let before = plan.clone();

    let (changed, _) = plan.add_task(action, "Ship").unwrap();
    let _ = plan.delete_node(&NodePath::Action(action)).unwrap();

    assert_eq!(plan, before);
    assert_eq!(changed.len(), plan.len() + 1);
}

#[test]
fn test_add_task_under_task_is_wrong_kind() {
    let (plan, [_, design, ..]) = sample_plan();
    let err = plan.add_task(design, "Nested").unwrap_err();
    assert!(matches!(
        err,
        PlanError::WrongKind {
            expected: NodeKind::Action,
            actual: NodeKind::Task,
            ..
        }
    ));
}

#[test]
fn test_add_subtask_under_foreign_task_is_rejected() {
    let (plan, [_, design, ..]) = sample_plan();
    let (plan, other) = plan.add_action("Other").unwrap();
    let err = plan.add_subtask(other, design, "Stray").unwrap_err();
    assert!(matches!(err, PlanError::NotAChild { .. }));
}

#[test]
fn test_subtasks_cannot_have_children() {
    let (plan, [action, design, _, sketch, _]) = sample_plan();
    let err = plan
        .add_child(&NodePath::Subtask(action, design, sketch), "Deeper")
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidInput { .. }));
}

#[test]
fn test_ids_are_never_reused() {
    let (plan, [action, ..]) = sample_plan();
    let plan = plan.delete_node(&NodePath::Action(action)).unwrap();
    assert!(plan.is_empty());

    let (_, fresh) = plan.add_action("Again").unwrap();
    assert_eq!(fresh, NodeId(6));
}

#[test]
fn test_update_field_on_stale_path() {
    let (plan, [action, ..]) = sample_plan();
    let err = plan
        .update_field(&NodePath::Task(action, NodeId(42)), FieldUpdate::Name("x".into()))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_update_field_sets_values() {
    let (plan, [action, design, ..]) = sample_plan();
    let path = NodePath::Task(action, design);
    let plan = plan
        .update_field(&path, FieldUpdate::Status(Status::Blocked))
        .unwrap()
        .update_field(&path, FieldUpdate::StartDate(Some(date(2024, 3, 1))))
        .unwrap()
        .update_field(
            &path,
            FieldUpdate::Metadata {
                key: "owner".into(),
                value: Some("ops".into()),
            },
        )
        .unwrap();

    let node = plan.node(design).unwrap();
    assert_eq!(node.status, Status::Blocked);
    assert_eq!(node.start_date, Some(date(2024, 3, 1)));
    assert_eq!(node.metadata.get("owner").map(String::as_str), Some("ops"));
}

#[test]
fn test_delete_removes_subtree_and_keeps_dangling_refs() {
    let (plan, [action, design, build, sketch, review]) = sample_plan();
    let plan = plan
        .add_dependency(&NodePath::Task(action, build), sketch)
        .unwrap();

    let plan = plan.delete_node(&NodePath::Task(action, design)).unwrap();

    assert!(!plan.contains(design));
    assert!(!plan.contains(sketch));
    assert!(!plan.contains(review));
    assert!(plan.node(build).unwrap().depends_on(sketch));
    assert_eq!(plan.dangling_dependencies(), vec![(build, sketch)]);
}

#[test]
fn test_delete_with_prune_policy_strips_refs() {
    let (plan, [action, design, build, sketch, _]) = sample_plan();
    let plan = plan
        .add_dependency(&NodePath::Task(action, build), sketch)
        .unwrap();

    let plan = plan
        .delete_node_with(&NodePath::Task(action, design), DanglingPolicy::Prune)
        .unwrap();

    assert!(plan.node(build).unwrap().dependencies.is_empty());
    assert!(plan.dangling_dependencies().is_empty());
}

#[test]
fn test_prune_dangling_dependencies() {
    let (plan, [action, design, build, _, _]) = sample_plan();
    let plan = plan
        .add_dependency(&NodePath::Task(action, build), design)
        .unwrap()
        .delete_node(&NodePath::Task(action, design))
        .unwrap();

    let pruned = plan.prune_dangling_dependencies();
    assert!(pruned.node(build).unwrap().dependencies.is_empty());
}

#[test]
fn test_move_sibling_swaps_neighbours() {
    let (plan, [action, design, build, ..]) = sample_plan();
    let plan = plan
        .move_sibling(&NodePath::Task(action, design), Direction::Down)
        .unwrap();
    let order: Vec<NodeId> = plan.node(action).unwrap().children.clone();
    assert_eq!(order, vec![build, design]);
}

#[test]
fn test_move_sibling_at_boundaries_is_noop() {
    let (plan, [action, design, build, ..]) = sample_plan();
    let up = plan
        .move_sibling(&NodePath::Task(action, design), Direction::Up)
        .unwrap();
    let down = plan
        .move_sibling(&NodePath::Task(action, build), Direction::Down)
        .unwrap();
    assert_eq!(up, plan);
    assert_eq!(down, plan);
}

#[test]
fn test_reorder_actions() {
    let (plan, a) = ActionPlan::new().add_action("A").unwrap();
    let (plan, b) = plan.add_action("B").unwrap();
    let (plan, c) = plan.add_action("C").unwrap();

    let plan = plan.reorder_actions(&[c, a, b]).unwrap();
    assert_eq!(plan.action_ids(), &[c, a, b]);

    assert!(plan.reorder_actions(&[a, b]).is_err());
    assert!(plan.reorder_actions(&[a, a, b]).is_err());
    assert!(plan.reorder_actions(&[a, b, NodeId(99)]).is_err());
}

#[test]
fn test_add_dependency_is_deduplicated() {
    let (plan, [action, design, build, ..]) = sample_plan();
    let path = NodePath::Task(action, build);
    let once = plan.add_dependency(&path, design).unwrap();
    let twice = once.add_dependency(&path, design).unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.node(build).unwrap().dependencies, vec![design]);
}

#[test]
fn test_add_dependency_rejects_self_and_cycles() {
    let (plan, [action, design, build, sketch, _]) = sample_plan();
    let self_dep = plan
        .add_dependency(&NodePath::Task(action, design), design)
        .unwrap_err();
    assert!(self_dep.is_cycle_rejection());

    let plan = plan
        .add_dependency(&NodePath::Subtask(action, design, sketch), build)
        .unwrap();
    let err = plan
        .add_dependency(&NodePath::Task(action, build), sketch)
        .unwrap_err();
    assert!(err.to_string().contains("circular dependency"));
}

#[test]
fn test_add_dependency_to_missing_node() {
    let (plan, [action, design, ..]) = sample_plan();
    let err = plan
        .add_dependency(&NodePath::Task(action, design), NodeId(404))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_dependency_candidates_exclude_cycles_and_existing() {
    let (plan, [action, design, build, sketch, review]) = sample_plan();
    let plan = plan
        .add_dependency(&NodePath::Task(action, build), design)
        .unwrap();

    let candidates = plan.dependency_candidates(design).unwrap();
    assert!(!candidates.contains(&design));
    assert!(!candidates.contains(&build));
    assert!(candidates.contains(&action));
    assert!(candidates.contains(&sketch));
    assert!(candidates.contains(&review));

    let for_build = plan.dependency_candidates(build).unwrap();
    assert!(!for_build.contains(&design));
}

#[test]
fn test_resolve_and_path_of_agree() {
    let (plan, [action, design, _, sketch, _]) = sample_plan();
    let path = plan.path_of(sketch).unwrap();
    assert_eq!(path, NodePath::Subtask(action, design, sketch));
    assert_eq!(plan.resolve(&path).unwrap(), sketch);
}

#[test]
fn test_flatten_display_order() {
    let (plan, [action, design, build, sketch, review]) = sample_plan();
    let ids: Vec<NodeId> = plan.flatten().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![action, design, sketch, review, build]);
}

#[test]
fn test_percent_complete_and_summaries() {
    let (plan, [action, design, ..]) = sample_plan();
    assert_eq!(plan.percent_complete(action).unwrap(), 0);

    let plan = plan
        .update_field(
            &NodePath::Task(action, design),
            FieldUpdate::Status(Status::Completed),
        )
        .unwrap();
    assert_eq!(plan.percent_complete(action).unwrap(), 50);

    let summaries = plan.action_summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_tasks, 2);
    assert_eq!(summaries[0].completed_tasks, 1);
    assert_eq!(summaries[0].total_subtasks, 2);
    assert_eq!(summaries[0].percent_complete, 50);
}

#[test]
fn test_document_round_trip_preserves_plan() {
    let (plan, [action, design, build, ..]) = sample_plan();
    let plan = plan
        .add_dependency(&NodePath::Task(action, build), design)
        .unwrap();

    let restored = ActionPlan::from_document(plan.to_document()).unwrap();
    assert_eq!(restored, plan);
    assert_eq!(restored.next_id(), plan.next_id());
}

#[test]
fn test_document_with_sparse_records() {
    let json = r#"{
        "actions": [
            {"id": 3, "title": "Legacy", "completed": true, "tasks": [
                {"id": 7, "name": "Only task", "subtasks": [{"id": 9}]}
            ]}
        ]
    }"#;
    let document: PlanDocument = serde_json::from_str(json).unwrap();
    let plan = ActionPlan::from_document(document).unwrap();

    let action = plan.node(NodeId(3)).unwrap();
    assert_eq!(action.status, Status::Completed);
    assert_eq!(action.priority, Some(Priority::Medium));
    assert_eq!(plan.node(NodeId(9)).unwrap().kind, NodeKind::Subtask);
    assert_eq!(plan.next_id(), NodeId(10));
}

#[test]
fn test_document_rejects_broken_shapes() {
    let leaf = |id| NodeRecord {
        id: NodeId(id),
        name: String::new(),
        status: None,
        completed: None,
        priority: None,
        start_date: None,
        finish_date: None,
        dependencies: Vec::new(),
        assignees: Vec::new(),
        description: None,
        metadata: Default::default(),
        children: Vec::new(),
    };

    let mut duplicate = leaf(1);
    duplicate.children.push(leaf(1));
    assert!(matches!(
        ActionPlan::from_records(vec![duplicate]),
        Err(PlanError::InvalidDocument { .. })
    ));

    let mut too_deep = leaf(1);
    let mut task = leaf(2);
    let mut subtask = leaf(3);
    subtask.children.push(leaf(4));
    task.children.push(subtask);
    too_deep.children.push(task);
    assert!(matches!(
        ActionPlan::from_records(vec![too_deep]),
        Err(PlanError::InvalidDocument { .. })
    ));

    let mut first = leaf(1);
    first.dependencies.push(NodeId(2));
    let mut second = leaf(2);
    second.dependencies.push(NodeId(1));
    assert!(matches!(
        ActionPlan::from_records(vec![first, second]),
        Err(PlanError::InvalidDocument { .. })
    ));
}

#[test]
fn test_document_ids_past_the_id_space_are_rejected() {
    let json = r#"{"actions": [{"id": 18446744073709551615}]}"#;
    let document: PlanDocument = serde_json::from_str(json).unwrap();
    assert!(matches!(
        ActionPlan::from_document(document),
        Err(PlanError::InvalidDocument { .. })
    ));

    let document = PlanDocument {
        next_id: Some(u64::MAX),
        actions: Vec::new(),
    };
    assert!(matches!(
        ActionPlan::from_document(document),
        Err(PlanError::InvalidDocument { .. })
    ));
}

#[test]
fn test_exhausted_ids_are_an_error() {
    let json = format!(r#"{{"actions": [{{"id": {}}}]}}"#, NodeId::MAX);
    let document: PlanDocument = serde_json::from_str(&json).unwrap();
    let plan = ActionPlan::from_document(document).unwrap();
    assert_eq!(plan.next_id(), NodeId(i64::MAX as u64));

    assert!(matches!(plan.add_action("Late"), Err(PlanError::IdsExhausted)));
    assert!(matches!(
        plan.add_task(NodeId::MAX, "Late"),
        Err(PlanError::IdsExhausted)
    ));
}
