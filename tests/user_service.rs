mod common;

use anyhow::Result;

use common::*;
use task_authz::config::Config;
use task_authz::errors::{AppError, Denial};
use task_authz::models::{DepartmentCreateRequest, Role, TaskState, TaskUpdateRequest, UserCreateRequest, UserUpdateRequest};
use task_authz::services::{department, task, user};
use task_authz::{create_app, InMemoryStore};

fn move_manager_to(department_id: i64) -> UserUpdateRequest {
    UserUpdateRequest {
        name: "Morgan".to_string(),
        email: "morgan@example.com".to_string(),
        role: Role::GroupManager,
        department_id,
    }
}

fn rename() -> TaskUpdateRequest {
    TaskUpdateRequest {
        title: Some("Renamed".to_string()),
        user_story_description: None,
        acceptance_criteria: None,
    }
}

#[tokio::test]
async fn moving_a_manager_changes_what_they_may_manage() -> Result<()> {
    let state = seeded_state().await?;
    let leader = actor(&state, LEADER).await?;
    let platform_task = insert_task(&state, PLATFORM_PROJECT, None, TaskState::Backlog).await?;

    let before = actor(&state, MANAGER).await?;
    task::update_task(&state, &before, platform_task.id, rename()).await?;

    let moved = user::update_user(&state, &leader, MANAGER, move_manager_to(PAYMENTS)).await?;
    assert_eq!(moved.department_id, Some(PAYMENTS));

    let after = actor(&state, MANAGER).await?;
    let err = task::update_task(&state, &after, platform_task.id, rename()).await.unwrap_err();
    assert_eq!(err.denial(), Some(Denial::TaskManagement));
    Ok(())
}

#[tokio::test]
async fn demoting_a_leader_removes_global_reach() -> Result<()> {
    let state = seeded_state().await?;
    let leader = actor(&state, LEADER).await?;
    let payments_task = insert_task(&state, PAYMENTS_PROJECT, None, TaskState::Backlog).await?;

    user::update_user(
        &state,
        &leader,
        LEADER,
        UserUpdateRequest {
            name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
            role: Role::TeamMember,
            department_id: PLATFORM,
        },
    )
    .await?;

    let demoted = actor(&state, LEADER).await?;
    let err = task::find_task(&state, &demoted, payments_task.id).await.unwrap_err();
    assert_eq!(err.denial(), Some(Denial::TaskAccess));
    Ok(())
}

#[tokio::test]
async fn update_requires_existing_user_and_department() -> Result<()> {
    let state = seeded_state().await?;
    let leader = actor(&state, LEADER).await?;

    let err = user::update_user(&state, &leader, 404, move_manager_to(PLATFORM)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = user::update_user(&state, &leader, MANAGER, move_manager_to(99)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Nothing changed.
    assert_eq!(user::find_user(&state, MANAGER).await?.department_id, Some(PLATFORM));
    Ok(())
}

#[tokio::test]
async fn created_user_resolves_as_actor_until_deleted() -> Result<()> {
    let state = seeded_state().await?;
    let leader = actor(&state, LEADER).await?;

    let created = user::create_user(
        &state,
        &leader,
        UserCreateRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::TeamMember,
            department_id: Some(PLATFORM),
        },
    )
    .await?;

    let resolved = actor(&state, created.id).await?;
    assert_eq!(resolved.role, Role::TeamMember);
    assert_eq!(resolved.department_id, Some(PLATFORM));

    user::delete_user(&state, &leader, created.id).await?;
    let err = state.actor(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn create_rejects_blank_fields_and_unknown_department() -> Result<()> {
    let state = seeded_state().await?;
    let leader = actor(&state, LEADER).await?;

    let blank = UserCreateRequest {
        name: " ".to_string(),
        email: "x@example.com".to_string(),
        role: Role::TeamMember,
        department_id: None,
    };
    let err = user::create_user(&state, &leader, blank).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let orphan = UserCreateRequest {
        name: "Orphan".to_string(),
        email: "orphan@example.com".to_string(),
        role: Role::TeamMember,
        department_id: Some(99),
    };
    let err = user::create_user(&state, &leader, orphan).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn listener_drains_every_event_then_stops() -> Result<()> {
    let (state, listener) = create_app(InMemoryStore::new(), Config::default());
    let bootstrap = task_authz::authz::Actor::leader(0);

    let platform = department::create_department(
        &state,
        &bootstrap,
        DepartmentCreateRequest {
            name: "Platform".to_string(),
        },
    )
    .await?;
    let lead = user::create_user(
        &state,
        &bootstrap,
        UserCreateRequest {
            name: "Lead".to_string(),
            email: "lead@example.com".to_string(),
            role: Role::TeamLeader,
            department_id: Some(platform.id),
        },
    )
    .await?;
    user::delete_user(&state, &bootstrap, lead.id).await?;

    drop(state);
    assert_eq!(listener.await?, 3);
    Ok(())
}
