#![allow(dead_code)]

use anyhow::Result;

use task_authz::authz::Actor;
use task_authz::config::Config;
use task_authz::models::{Department, Project, Role, Task, TaskState, User};
use task_authz::store::Store;
use task_authz::utils::utc_now;
use task_authz::{AppState, InMemoryStore};

pub const PLATFORM: i64 = 1;
pub const PAYMENTS: i64 = 2;

pub const LEADER: i64 = 1;
pub const MANAGER: i64 = 2;
pub const MEMBER: i64 = 3;
pub const OTHER_MEMBER: i64 = 4;
pub const OUTSIDE_MANAGER: i64 = 5;

pub const PLATFORM_PROJECT: i64 = 1;
pub const PAYMENTS_PROJECT: i64 = 2;

/// Two departments, one project each, and a user per role.
pub async fn seeded_state() -> Result<AppState<InMemoryStore>> {
    seeded_state_with(Config::default()).await
}

pub async fn seeded_state_with(config: Config) -> Result<AppState<InMemoryStore>> {
    let (state, _rx) = AppState::new(InMemoryStore::new(), config);
    let store = &state.store;

    for (id, name) in [(PLATFORM, "Platform"), (PAYMENTS, "Payments")] {
        store.save_department(department(id, name)).await?;
    }

    for (id, role, dept) in [
        (LEADER, Role::TeamLeader, None),
        (MANAGER, Role::GroupManager, Some(PLATFORM)),
        (MEMBER, Role::TeamMember, Some(PLATFORM)),
        (OTHER_MEMBER, Role::TeamMember, Some(PLATFORM)),
        (OUTSIDE_MANAGER, Role::GroupManager, Some(PAYMENTS)),
    ] {
        store.save_user(user(id, role, dept)).await?;
    }

    for (id, dept) in [(PLATFORM_PROJECT, PLATFORM), (PAYMENTS_PROJECT, PAYMENTS)] {
        store.save_project(project(id, dept)).await?;
    }

    Ok(state)
}

pub async fn actor(state: &AppState<InMemoryStore>, user_id: i64) -> Result<Actor> {
    Ok(state.actor(user_id).await?)
}

/// Inserts a task directly, bypassing the service rules.
pub async fn insert_task(
    state: &AppState<InMemoryStore>,
    project_id: i64,
    assignee_id: Option<i64>,
    task_state: TaskState,
) -> Result<Task> {
    let now = utc_now();
    let task = Task {
        id: 0,
        project_id,
        title: "Write runbook".to_string(),
        user_story_description: None,
        acceptance_criteria: None,
        state: task_state,
        priority: None,
        state_change_reason: None,
        assignee_id,
        created_by: Some(LEADER),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    Ok(state.store.save_task(task).await?)
}

fn department(id: i64, name: &str) -> Department {
    let now = utc_now();
    Department {
        id,
        name: name.to_string(),
        created_by: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn user(id: i64, role: Role, department_id: Option<i64>) -> User {
    let now = utc_now();
    User {
        id,
        name: format!("user-{id}"),
        email: format!("user{id}@example.com"),
        role,
        department_id,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn project(id: i64, department_id: i64) -> Project {
    let now = utc_now();
    Project {
        id,
        department_id,
        title: format!("project-{id}"),
        description: None,
        status: None,
        created_by: Some(LEADER),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}
