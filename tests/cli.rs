use std::process::{Command, Output};

use anyhow::{Context, Result};
use serde_json::json;
use tempfile::tempdir;

fn run(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_task-authz"))
        .args(args)
        .env_remove("ATTACHMENT_MAX_SIZE")
        .env_remove("EVENT_BUS_CAPACITY")
        .output()
        .context("failed to run task-authz")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn transitions_prints_the_table() -> Result<()> {
    let output = run(&["transitions"])?;
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("BACKLOG      -> IN_ANALYSIS, IN_PROGRESS, COMPLETED, CANCELLED"));
    assert!(text.contains("COMPLETED    -> (terminal)"));
    assert_eq!(text.lines().count(), 6);
    Ok(())
}

#[test]
fn check_transition_allows_a_table_edge() -> Result<()> {
    let output = run(&["check-transition", "--from", "in_progress", "--to", "blocked", "--reason", "vendor"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "allowed");
    Ok(())
}

#[test]
fn check_transition_requires_a_reason() -> Result<()> {
    let output = run(&["check-transition", "--from", "backlog", "--to", "blocked"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Reason is required for Cancelled or Blocked state"));
    Ok(())
}

#[test]
fn check_transition_rejects_leaving_completed() -> Result<()> {
    let output = run(&["check-transition", "--from", "completed", "--to", "completed"])?;
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("Completed tasks cannot be modified"));
    assert!(text.contains("rejected move: COMPLETED -> COMPLETED"));
    Ok(())
}

#[test]
fn decide_reports_denial_with_failure_status() -> Result<()> {
    let dir = tempdir().context("failed to create tempdir")?;
    let path = dir.path().join("comment.json");
    let body = json!({
        "actor": {"user_id": 2, "role": "GROUP_MANAGER", "department_id": 1},
        "task": {"task_id": 7, "department_id": 1, "assignee_id": 3, "state": "IN_PROGRESS"},
        "action": {"type": "comment"}
    });
    std::fs::write(&path, body.to_string())?;

    let path = path.to_string_lossy().into_owned();
    let output = run(&["decide", &path])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("User is not assigned to this task"));
    Ok(())
}

#[test]
fn unknown_state_is_a_usage_error() -> Result<()> {
    let output = run(&["check-transition", "--from", "archived", "--to", "backlog"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("archived"));
    Ok(())
}
