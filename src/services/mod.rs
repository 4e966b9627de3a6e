//! Service operations.
//!
//! Each operation loads what it needs (404), validates the request (400),
//! asks the authorization engine (403), consults the state machine where the
//! task state changes (400), then persists and publishes an activity event.

pub mod attachment;
pub mod comment;
pub mod department;
pub mod project;
pub mod task;
pub mod user;

use crate::app::AppState;
use crate::authz::{Actor, TaskContext};
use crate::errors::{AppError, AppResult, Denial};
use crate::models::{Project, Task};
use crate::store::Store;

/// Converts an engine verdict into a service result, logging the outcome.
pub(crate) fn enforce(actor: &Actor, resource: &str, resource_id: i64, verdict: Result<(), Denial>) -> AppResult<()> {
    match verdict {
        Ok(()) => {
            tracing::debug!(actor_id = actor.user_id, role = %actor.role, resource, resource_id, "access granted");
            Ok(())
        }
        Err(denial) => {
            tracing::warn!(
                actor_id = actor.user_id,
                role = %actor.role,
                resource,
                resource_id,
                code = denial.code(),
                "access denied"
            );
            Err(AppError::Forbidden(denial))
        }
    }
}

pub(crate) async fn load_project<S: Store>(state: &AppState<S>, project_id: i64) -> AppResult<Project> {
    state
        .store
        .find_project(project_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Project not found with given ID: {project_id}")))
}

pub(crate) async fn load_task<S: Store>(state: &AppState<S>, task_id: i64) -> AppResult<Task> {
    state
        .store
        .find_task(task_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Task not found with given ID: {task_id}")))
}

/// Loads a task together with the engine's view of it.
pub(crate) async fn load_task_context<S: Store>(state: &AppState<S>, task_id: i64) -> AppResult<(Task, TaskContext)> {
    let task = load_task(state, task_id).await?;
    let context = task_context(state, &task).await?;
    Ok((task, context))
}

/// A task whose project was soft-deleted is reported as a missing project.
pub(crate) async fn task_context<S: Store>(state: &AppState<S>, task: &Task) -> AppResult<TaskContext> {
    let project = load_project(state, task.project_id).await?;
    Ok(TaskContext::new(task, &project))
}
