//! Integration tests for the HOSCON CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd,
//! each against its own database in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a hoscon command bound to the temp directory's database
fn hoscon(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hoscon").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("HOSCON_DB")
        .env_remove("HOSCON_EXPORT_DIR")
        .env_remove("HOSCON_LOG")
        .arg("--db")
        .arg(tmp.path().join("test.db"))
        .arg("--export-dir")
        .arg(tmp.path().join("out"));
    cmd
}

/// Helper to create a seeded database in a temp directory
fn setup_seeded() -> TempDir {
    let tmp = TempDir::new().unwrap();
    hoscon(&tmp).arg("seed").assert().success();
    tmp
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    hoscon(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("incident"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    hoscon(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hoscon"));
}

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();
    hoscon(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database ready"))
        .stdout(predicate::str::contains("communication_logs"));
    assert!(tmp.path().join("test.db").exists());
}

#[test]
fn test_init_twice_is_harmless() {
    let tmp = setup_seeded();
    hoscon(&tmp).arg("init").assert().success();
    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "dept", "list"]));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    hoscon(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hoscon"));
}

// ============================================================================
// Seed
// ============================================================================

#[test]
fn test_seed_loads_baseline() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["-f", "csv", "dept", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id,name,status,notes"))
        .stdout(predicate::str::contains("Emergency Department,Green,All clear"));
}

#[test]
fn test_seed_twice_reports_nothing_new() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));

    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "incident", "list"]));
    assert_eq!(out.lines().count(), 4);
}

// ============================================================================
// Departments
// ============================================================================

#[test]
fn test_dept_update_by_name() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["dept", "update", "Surgery", "--status", "red", "--notes", "Power failure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated department"));

    hoscon(&tmp)
        .args(["-f", "csv", "dept", "list", "--status", "Red"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Surgery,Red,Power failure"));
}

#[test]
fn test_dept_duplicate_rejected() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["dept", "add", "--name", "Pharmacy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_dept_invalid_status_rejected() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["dept", "update", "Pharmacy", "--status", "Purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Purple"));

    hoscon(&tmp)
        .args(["-f", "csv", "dept", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pharmacy,Green,Well-stocked"));
}

#[test]
fn test_dept_update_unknown_fails() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["dept", "update", "99", "--status", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Staff
// ============================================================================

#[test]
fn test_staff_add_requires_existing_department() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["staff", "add", "--name", "Eve", "--role", "Porter", "--department", "Morgue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Morgue"));
}

#[test]
fn test_staff_muster() {
    let tmp = setup_seeded();
    let out = stdout_of(hoscon(&tmp).args(["-f", "csv", "staff", "muster"]));
    assert!(out.contains("Alice Smith"));
    assert!(!out.contains("Charlie Brown"));

    hoscon(&tmp)
        .args(["staff", "update", "Charlie Brown", "--present", "true"])
        .assert()
        .success();

    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "staff", "muster"]));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_staff_list_shows_department_name() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["-f", "csv", "staff", "list", "--department", "Pharmacy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diana Prince,Pharmacist,Pharmacy,true"));
}

// ============================================================================
// Incidents and tasks
// ============================================================================

#[test]
fn test_incident_log_with_assignee() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args([
            "incident",
            "log",
            "--type",
            "Fire",
            "--description",
            "Kitchen fire",
            "--priority",
            "critical",
            "--task",
            "Evacuate",
            "--assign-to",
            "Alice Smith",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged incident"));

    let out = stdout_of(hoscon(&tmp).args(["-f", "json", "task", "list"]));
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Evacuate");
    assert_eq!(tasks[0]["status"], "Open");
    assert_eq!(tasks[0]["assigned_staff"], "Alice Smith");
    assert_eq!(tasks[0]["incident_id"], 5);
}

#[test]
fn test_incident_log_unknown_assignee_writes_nothing() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args([
            "incident",
            "log",
            "--type",
            "Flood",
            "--description",
            "Basement",
            "--assign-to",
            "Nobody Here",
        ])
        .assert()
        .failure();

    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "incident", "list"]));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_incident_log_blank_task_rolls_back() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["incident", "log", "--type", "Flood", "--description", "Basement", "--task", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "incident", "list"]));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_incident_update_status() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["incident", "update", "1", "--status", "resolved"])
        .assert()
        .success();

    let out = stdout_of(hoscon(&tmp).args(["-f", "id", "incident", "list", "--active"]));
    assert_eq!(out.lines().collect::<Vec<_>>(), vec!["2", "3", "4"]);
}

#[test]
fn test_task_update_any_transition() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["task", "add", "--incident", "2", "--title", "Check generator fuel"])
        .assert()
        .success();

    for status in ["completed", "open", "in-progress"] {
        hoscon(&tmp)
            .args(["task", "update", "1", "--status", status])
            .assert()
            .success();
    }

    hoscon(&tmp)
        .args(["-f", "csv", "task", "list", "--incident", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Check generator fuel,,In Progress"));
}

#[test]
fn test_task_add_to_missing_incident_fails() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["task", "add", "--incident", "42", "--title", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Resources, comms
// ============================================================================

#[test]
fn test_resource_negative_quantity_rejected() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["resource", "update", "Ventilator", "--quantity", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity"));
}

#[test]
fn test_resource_low_stock() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["resource", "update", "Ventilator", "--quantity", "2"])
        .assert()
        .success();

    let out = stdout_of(hoscon(&tmp).args(["-f", "csv", "resource", "list", "--low"]));
    assert!(out.contains("Ventilator,2,units"));
    assert!(!out.contains("Stretchers"));
}

#[test]
fn test_comms_add_and_list() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["comms", "add", "--from", "Command", "--to", "ICU", "-m", "Divert", "-i", "1"])
        .assert()
        .success();

    hoscon(&tmp)
        .args(["-f", "csv", "comms", "list", "--incident", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Command,ICU,Divert,1"));
}

// ============================================================================
// Status and export
// ============================================================================

#[test]
fn test_status_json() {
    let tmp = setup_seeded();
    let out = stdout_of(hoscon(&tmp).args(["-f", "json", "status"]));
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["open_incidents"], 4);
    assert_eq!(status["present_staff"], 3);
    assert_eq!(status["total_staff"], 4);
}

#[test]
fn test_export_writes_all_artifacts() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 7 file(s)"));

    let out = tmp.path().join("out");
    for name in [
        "departments.csv",
        "staff.csv",
        "incidents.csv",
        "tasks.csv",
        "resources.csv",
        "communication_logs.csv",
        "bundle.json",
    ] {
        assert!(out.join(name).exists(), "missing {}", name);
    }

    let tasks = fs::read_to_string(out.join("tasks.csv")).unwrap();
    assert_eq!(
        tasks.trim_end(),
        "id,incident_id,title,assigned_to,status,timestamp,resource_id"
    );

    let bundle: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("bundle.json")).unwrap()).unwrap();
    assert_eq!(bundle["resources"].as_array().unwrap().len(), 4);
}

#[test]
fn test_export_output_override() {
    let tmp = setup_seeded();
    hoscon(&tmp)
        .args(["-q", "export", "--output", "snap"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(tmp.path().join("snap/bundle.json").exists());
}
