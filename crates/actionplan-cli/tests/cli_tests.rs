use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with --no-color and a database inside `temp_dir`
fn ap_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("ap").expect("Failed to find ap binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Adds an Action, two Tasks and a Subtask: ids 1, 2, 3 and 4.
fn seed_plan(temp_dir: &TempDir) {
    ap_cmd(temp_dir)
        .args(["action", "add", "Launch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created action with ID: 1"));
    ap_cmd(temp_dir)
        .args(["task", "add", "1", "Design"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path: `1/2`"));
    ap_cmd(temp_dir)
        .args(["task", "add", "1", "Build"])
        .assert()
        .success();
    ap_cmd(temp_dir)
        .args(["subtask", "add", "1", "2", "Sketch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created subtask with ID: 4"));
}

#[test]
fn test_cli_show_empty_plan() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# default"))
        .stdout(predicate::str::contains("No actions in this plan."));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_builds_and_shows_plan() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. Launch"))
        .stdout(predicate::str::contains("**2. Design**"))
        .stdout(predicate::str::contains("  - **4. Sketch**"));

    ap_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## default"));
}

#[test]
fn test_cli_named_plans_are_separate() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .args(["--plan", "work", "action", "add", "Ship"])
        .assert()
        .success();

    ap_cmd(&temp_dir)
        .args(["--plan", "work", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship"));
    ap_cmd(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship").not());
}

#[test]
fn test_cli_set_field_and_reject_unknown_field() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["node", "set", "1/2", "status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan updated."));

    ap_cmd(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Launch (ID: 1) 50% (1/2)"));

    ap_cmd(&temp_dir)
        .args(["node", "set", "1/2", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

#[test]
fn test_cli_rejects_circular_dependency() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["dep", "add", "1/3", "2"])
        .assert()
        .success();

    ap_cmd(&temp_dir)
        .args(["dep", "add", "1/2", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("circular dependency"));

    ap_cmd(&temp_dir)
        .args(["dep", "candidates", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build").not())
        .stdout(predicate::str::contains("Launch"));
}

#[test]
fn test_cli_stale_node_is_not_an_error() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["node", "delete", "1/2"])
        .assert()
        .success();

    ap_cmd(&temp_dir)
        .args(["node", "set", "1/2", "name", "Ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Node 2 no longer exists"));
}

#[test]
fn test_cli_autopilot_and_gantt() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["node", "dates", "1", "--start", "2024-01-01", "--finish", "2024-01-10"])
        .assert()
        .success();

    ap_cmd(&temp_dir)
        .args(["autopilot", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Autopilot scheduled 3 node(s)"))
        .stdout(predicate::str::contains("3. Build: 2024-01-02 → 2024-01-02"));

    ap_cmd(&temp_dir)
        .args(["gantt", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting 2024-01-01, 10 day(s)"));
}

#[test]
fn test_cli_autopilot_reports_missing_window() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["autopilot", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("could not be scheduled"));
}

#[test]
fn test_cli_undo_restores_previous_plan() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["node", "delete", "1"])
        .assert()
        .success();
    ap_cmd(&temp_dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success:"));
    ap_cmd(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch"));
}

#[test]
fn test_cli_undo_with_empty_history() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Nothing to undo"));
}

#[test]
fn test_cli_export_then_import() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);
    let export_path = temp_dir.path().join("plan.json");

    ap_cmd(&temp_dir)
        .args(["export", "--output"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported plan 'default'"));

    ap_cmd(&temp_dir)
        .args(["--plan", "copy", "import"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# copy"))
        .stdout(predicate::str::contains("Sketch"));
}

#[test]
fn test_cli_table_and_board_views() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .args(["show", "--view", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| `1/2/4` |"));

    ap_cmd(&temp_dir)
        .args(["show", "--view", "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch › Build"));
}

#[test]
fn test_cli_delete_plan_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    seed_plan(&temp_dir);

    ap_cmd(&temp_dir)
        .arg("delete-plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    ap_cmd(&temp_dir)
        .args(["delete-plan", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan 'default'"));

    ap_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_rejects_malformed_path() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .args(["node", "delete", "1/x"])
        .assert()
        .failure();
}

#[test]
fn test_cli_rejects_unbounded_history_limit() {
    let temp_dir = create_cli_test_environment();

    ap_cmd(&temp_dir)
        .args(["--history-limit", "18446744073709551615", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("History limit"));
}

#[test]
fn test_cli_import_rejects_ids_past_the_id_space() {
    let temp_dir = create_cli_test_environment();
    let document = temp_dir.path().join("huge.json");
    std::fs::write(&document, r#"{"actions": [{"id": 18446744073709551615}]}"#)
        .expect("Failed to write document");

    ap_cmd(&temp_dir)
        .arg("import")
        .arg(&document)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan document"));

    ap_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}
