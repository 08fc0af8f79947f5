use actionplan_core::{models::NodePath, ActionPlan, DependencyGraph, NodeId};
use proptest::prelude::*;

/// One Action holding `tasks` Tasks, each with two Subtasks.
fn build_plan(tasks: usize) -> (ActionPlan, Vec<NodePath>) {
    let (mut plan, action) = ActionPlan::new().add_action("Root").unwrap();
    let mut paths = vec![NodePath::Action(action)];
    for i in 0..tasks {
        let (next, task) = plan.add_task(action, format!("Task {i}")).unwrap();
        plan = next;
        paths.push(NodePath::Task(action, task));
        for j in 0..2 {
            let (next, subtask) = plan
                .add_subtask(action, task, format!("Subtask {i}.{j}"))
                .unwrap();
            plan = next;
            paths.push(NodePath::Subtask(action, task, subtask));
        }
    }
    (plan, paths)
}

proptest! {
    #[test]
    fn prop_accepted_dependencies_keep_graph_acyclic(
        tasks in 1..6usize,
        edges in proptest::collection::vec((0..20usize, 0..20usize), 0..60)
    ) {
        let (mut plan, paths) = build_plan(tasks);

        for (from_idx, to_idx) in edges {
            let from = paths[from_idx % paths.len()];
            let to = paths[to_idx % paths.len()].leaf();
            let before = DependencyGraph::from(&plan);

            match plan.add_dependency(&from, to) {
                Ok(next) => {
                    // An accepted edge never closes an existing path back.
                    prop_assert!(!before.reaches(to, from.leaf()));
                    prop_assert!(DependencyGraph::from(&next).is_acyclic());
                    plan = next;
                }
                Err(err) => {
                    prop_assert!(err.is_cycle_rejection());
                    prop_assert!(before.reaches(to, from.leaf()));
                }
            }
        }
        prop_assert!(DependencyGraph::from(&plan).is_acyclic());
    }

    #[test]
    fn prop_self_dependency_is_rejected(tasks in 1..6usize, pick in 0..20usize) {
        let (plan, paths) = build_plan(tasks);
        let path = paths[pick % paths.len()];

        prop_assert!(!plan.can_add_dependency(path.leaf(), path.leaf()));
        prop_assert!(plan.add_dependency(&path, path.leaf()).is_err());
    }

    #[test]
    fn prop_remove_dependency_is_idempotent(
        tasks in 1..6usize,
        edges in proptest::collection::vec((0..20usize, 0..20usize), 0..30),
        victim in (0..20usize, 0..20usize)
    ) {
        let (mut plan, paths) = build_plan(tasks);
        for (from_idx, to_idx) in edges {
            let from = paths[from_idx % paths.len()];
            let to = paths[to_idx % paths.len()].leaf();
            if let Ok(next) = plan.add_dependency(&from, to) {
                plan = next;
            }
        }

        let from = paths[victim.0 % paths.len()];
        let to: NodeId = paths[victim.1 % paths.len()].leaf();
        let once = plan.remove_dependency(&from, to).unwrap();
        let twice = once.remove_dependency(&from, to).unwrap();
        prop_assert_eq!(once, twice);
    }
}
