//! Tests for the models module.

use std::str::FromStr;

use jiff::civil::date;

use super::*;

#[test]
fn test_status_from_str() {
    assert_eq!(Status::from_str("not-started").unwrap(), Status::NotStarted);
    assert_eq!(Status::from_str("In_Progress").unwrap(), Status::InProgress);
    assert_eq!(Status::from_str("BLOCKED").unwrap(), Status::Blocked);
    assert_eq!(Status::from_str("done").unwrap(), Status::Completed);
    assert!(Status::from_str("finished-ish").is_err());
}

#[test]
fn test_status_serializes_kebab_case() {
    let json = serde_json::to_string(&Status::NotStarted).unwrap();
    assert_eq!(json, "\"not-started\"");
    let parsed: Status = serde_json::from_str("\"in-progress\"").unwrap();
    assert_eq!(parsed, Status::InProgress);
}

#[test]
fn test_priority_ordering() {
    assert!(Priority::Critical > Priority::High);
    assert!(Priority::Low < Priority::Medium);
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn test_node_kind_levels() {
    assert_eq!(NodeKind::Action.child_kind(), Some(NodeKind::Task));
    assert_eq!(NodeKind::Task.child_kind(), Some(NodeKind::Subtask));
    assert_eq!(NodeKind::Subtask.child_kind(), None);
    assert!(!NodeKind::Subtask.has_priority());
}

#[test]
fn test_new_subtask_has_no_priority() {
    let subtask = Node::new(NodeId(3), NodeKind::Subtask, Some(NodeId(2)), "leaf");
    assert_eq!(subtask.priority, None);
    assert_eq!(subtask.status, Status::NotStarted);

    let task = Node::new(NodeId(2), NodeKind::Task, Some(NodeId(1)), "mid");
    assert_eq!(task.priority, Some(Priority::Medium));
}

#[test]
fn test_duration_days() {
    let mut node = Node::new(NodeId(1), NodeKind::Task, Some(NodeId(9)), "t");
    assert_eq!(node.duration_days(), None);

    node.start_date = Some(date(2024, 1, 1));
    node.finish_date = Some(date(2024, 1, 1));
    assert_eq!(node.duration_days(), Some(1));

    node.finish_date = Some(date(2024, 2, 1));
    assert_eq!(node.duration_days(), Some(32));

    node.finish_date = Some(date(2023, 12, 31));
    assert_eq!(node.duration_days(), None);
}

#[test]
fn test_node_path_parse_and_display() {
    let path = NodePath::from_str("1/2").unwrap();
    assert_eq!(path, NodePath::Task(NodeId(1), NodeId(2)));
    assert_eq!(path.kind(), NodeKind::Task);
    assert_eq!(path.parent(), Some(NodePath::Action(NodeId(1))));
    assert_eq!(path.to_string(), "1/2");

    assert!(NodePath::from_str("").is_err());
    assert!(NodePath::from_str("1/2/3/4").is_err());
    assert!(NodePath::from_str("1/x").is_err());
}

#[test]
fn test_node_path_serde_as_string() {
    let path = NodePath::Subtask(NodeId(1), NodeId(2), NodeId(3));
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"1/2/3\"");
    let back: NodePath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
}

#[test]
fn test_field_update_parse() {
    assert_eq!(
        FieldUpdate::parse("start-date", "2024-03-01").unwrap(),
        FieldUpdate::StartDate(Some(date(2024, 3, 1)))
    );
    assert_eq!(
        FieldUpdate::parse("finish_date", "").unwrap(),
        FieldUpdate::FinishDate(None)
    );
    assert_eq!(
        FieldUpdate::parse("assignees", "ana, bo ,").unwrap(),
        FieldUpdate::Assignees(vec!["ana".to_string(), "bo".to_string()])
    );
    assert_eq!(
        FieldUpdate::parse("metadata", "team=core").unwrap(),
        FieldUpdate::Metadata {
            key: "team".to_string(),
            value: Some("core".to_string()),
        }
    );
    assert_eq!(
        FieldUpdate::parse("metadata", "team").unwrap(),
        FieldUpdate::Metadata {
            key: "team".to_string(),
            value: None,
        }
    );
}

#[test]
fn test_field_update_rejects_unknown_and_bad_values() {
    let err = FieldUpdate::parse("nmae", "typo").unwrap_err();
    assert!(err.to_string().contains("Unknown field"));

    assert!(FieldUpdate::parse("start_date", "01/02/2024").is_err());
    assert!(FieldUpdate::parse("priority", "urgent").is_err());
    assert!(FieldUpdate::parse("name", "  ").is_err());
}

#[test]
fn test_priority_update_rejected_on_subtask() {
    let mut subtask = Node::new(NodeId(3), NodeKind::Subtask, Some(NodeId(2)), "leaf");
    let err = FieldUpdate::Priority(Priority::High)
        .apply(&mut subtask)
        .unwrap_err();
    assert!(matches!(err, crate::PlanError::InvalidInput { .. }));
    assert_eq!(subtask.priority, None);
}

#[test]
fn test_record_tolerates_sparse_input() {
    let json = r#"{
        "id": 1,
        "title": "Legacy action",
        "startDate": "2024-01-01",
        "tasks": [{ "id": 2, "completed": false }]
    }"#;
    let record: NodeRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.name, "Legacy action");
    assert_eq!(record.start_date, Some(date(2024, 1, 1)));
    assert_eq!(record.resolved_status(), Status::NotStarted);
    assert_eq!(record.children.len(), 1);
    assert!(record.children[0].name.is_empty());
}

#[test]
fn test_record_status_wins_over_legacy_flag() {
    let record: NodeRecord =
        serde_json::from_str(r#"{"id": 5, "status": "blocked", "completed": true}"#).unwrap();
    assert_eq!(record.resolved_status(), Status::Blocked);
}
