use crate::app::AppState;
use crate::authz::{self, Actor, ProjectContext};
use crate::errors::{AppError, AppResult};
use crate::events::{log_activity, log_activity_with_old};
use crate::models::{Task, TaskCreateRequest, TaskPriority, TaskState, TaskStateUpdateRequest, TaskUpdateRequest};
use crate::store::Store;
use crate::utils::{is_blank, require_text, utc_now};

use super::{enforce, load_project, load_task_context};

const REASON_REQUIRED: &str = "Reason is required for Cancelled or Blocked state";
const TITLE_REQUIRED: &str = "Task title cannot be empty";

/// Moving to `BLOCKED` or `CANCELLED` must say why.
pub fn require_reason(new_state: TaskState, reason: Option<&str>) -> AppResult<()> {
    if new_state.requires_reason() && is_blank(reason) {
        return Err(AppError::validation(REASON_REQUIRED));
    }
    Ok(())
}

/// Creates a task inside `project_id`. The request may pick any initial
/// state; `BACKLOG` is used only when it picks none.
pub async fn create_task<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    project_id: i64,
    payload: TaskCreateRequest,
) -> AppResult<Task> {
    let project = load_project(state, project_id).await?;
    require_text(Some(&payload.title), TITLE_REQUIRED)?;
    enforce(
        actor,
        "project",
        project.id,
        authz::task::validate_task_creation(actor, &ProjectContext::from(&project)),
    )?;

    let now = utc_now();
    let task = Task {
        id: 0,
        project_id: project.id,
        title: payload.title.trim().to_string(),
        user_story_description: payload.user_story_description,
        acceptance_criteria: payload.acceptance_criteria,
        state: payload.state.unwrap_or(TaskState::Backlog),
        priority: payload.priority,
        state_change_reason: None,
        assignee_id: None,
        created_by: Some(actor.user_id),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id = task.id, project_id, state = %task.state, "task created");
    log_activity(&state.events, "created", Some(actor.user_id), &task);

    Ok(task)
}

pub async fn find_task<S: Store>(state: &AppState<S>, actor: &Actor, task_id: i64) -> AppResult<Task> {
    let (task, context) = load_task_context(state, task_id).await?;
    enforce(actor, "task", task_id, authz::task::validate_task_access(actor, &context))?;
    Ok(task)
}

/// Moves a task to a new state. Order matters: reason rule, then access,
/// then the terminal check, then the transition table.
pub async fn update_task_state<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    task_id: i64,
    payload: TaskStateUpdateRequest,
) -> AppResult<Task> {
    let (task, context) = load_task_context(state, task_id).await?;
    let new_state = payload.new_state;

    require_reason(new_state, payload.reason.as_deref())?;

    enforce(actor, "task", task_id, authz::task::validate_task_access(actor, &context))?;
    let next = authz::state_machine::validate_state_change(context.state, new_state).map_err(|err| {
        tracing::warn!(
            actor_id = actor.user_id,
            task_id,
            from = %err.from_state(),
            to = %err.to_state(),
            error = %err,
            "state change rejected"
        );
        AppError::TaskState(err)
    })?;

    let old = task.clone();
    let mut task = task;
    task.state = next;
    task.state_change_reason = payload.reason;
    task.updated_at = utc_now();

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id, from = %old.state, to = %task.state, "task state changed");
    log_activity_with_old(&state.events, "state_changed", Some(actor.user_id), &task, Some(&old));

    Ok(task)
}

pub async fn update_task<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    task_id: i64,
    payload: TaskUpdateRequest,
) -> AppResult<Task> {
    let (task, context) = load_task_context(state, task_id).await?;
    if payload.title.is_some() {
        require_text(payload.title.as_deref(), TITLE_REQUIRED)?;
    }
    enforce(actor, "task", task_id, authz::task::validate_task_management(actor, &context))?;

    let old = task.clone();
    let mut task = task;
    if let Some(title) = payload.title {
        task.title = title.trim().to_string();
    }
    if payload.user_story_description.is_some() {
        task.user_story_description = payload.user_story_description;
    }
    if payload.acceptance_criteria.is_some() {
        task.acceptance_criteria = payload.acceptance_criteria;
    }
    task.updated_at = utc_now();

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id, "task updated");
    log_activity_with_old(&state.events, "updated", Some(actor.user_id), &task, Some(&old));

    Ok(task)
}

pub async fn assign_task<S: Store>(state: &AppState<S>, actor: &Actor, task_id: i64, user_id: i64) -> AppResult<Task> {
    let (task, context) = load_task_context(state, task_id).await?;
    let assignee = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User not found with given ID: {user_id}")))?;
    enforce(actor, "task", task_id, authz::task::validate_task_assignment(actor, &context))?;

    let old = task.clone();
    let mut task = task;
    task.assignee_id = Some(assignee.id);
    task.updated_at = utc_now();

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id, assignee_id = assignee.id, "task assigned");
    log_activity_with_old(&state.events, "assigned", Some(actor.user_id), &task, Some(&old));

    Ok(task)
}

pub async fn change_task_priority<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    task_id: i64,
    priority: TaskPriority,
) -> AppResult<Task> {
    let (task, context) = load_task_context(state, task_id).await?;
    enforce(actor, "task", task_id, authz::task::validate_task_priority_change(actor, &context))?;

    let old = task.clone();
    let mut task = task;
    task.priority = Some(priority);
    task.updated_at = utc_now();

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id, priority = %priority, "task priority changed");
    log_activity_with_old(&state.events, "priority_changed", Some(actor.user_id), &task, Some(&old));

    Ok(task)
}

/// Soft-deletes the task.
pub async fn delete_task<S: Store>(state: &AppState<S>, actor: &Actor, task_id: i64) -> AppResult<()> {
    let (task, context) = load_task_context(state, task_id).await?;
    enforce(actor, "task", task_id, authz::task::validate_task_deletion(actor, &context))?;

    let now = utc_now();
    let mut task = task;
    task.deleted_at = Some(now);
    task.updated_at = now;

    let task = state.store.save_task(task).await?;
    tracing::info!(task_id, "task deleted");
    log_activity(&state.events, "deleted", Some(actor.user_id), &task);

    Ok(())
}
