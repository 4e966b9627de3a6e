use crate::app::AppState;
use crate::authz::{self, Actor, ProjectContext};
use crate::errors::{AppError, AppResult};
use crate::events::{log_activity, log_activity_with_old};
use crate::models::{Project, ProjectCreateRequest, ProjectStatus, ProjectUpdateRequest};
use crate::store::Store;
use crate::utils::{require_text, utc_now};

use super::{enforce, load_project};

const TITLE_REQUIRED: &str = "Project title cannot be empty";

pub async fn create_project<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    department_id: i64,
    payload: ProjectCreateRequest,
) -> AppResult<Project> {
    require_text(Some(&payload.title), TITLE_REQUIRED)?;
    let department = state
        .store
        .find_department(department_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department not found with given ID: {department_id}")))?;

    // Not persisted yet, so the context carries no project id.
    let context = ProjectContext {
        project_id: 0,
        department_id: department.id,
    };
    enforce(
        actor,
        "department",
        department.id,
        authz::project::validate_project_authorization(actor, &context),
    )?;

    let now = utc_now();
    let project = Project {
        id: 0,
        department_id: department.id,
        title: payload.title.trim().to_string(),
        description: payload.description,
        status: Some(payload.status.unwrap_or(ProjectStatus::InProgress)),
        created_by: Some(actor.user_id),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let project = state.store.save_project(project).await?;
    tracing::info!(project_id = project.id, department_id, "project created");
    log_activity(&state.events, "created", Some(actor.user_id), &project);

    Ok(project)
}

pub async fn find_project<S: Store>(state: &AppState<S>, actor: &Actor, project_id: i64) -> AppResult<Project> {
    let project = load_project(state, project_id).await?;
    authorize(actor, &project)?;
    Ok(project)
}

pub async fn update_project<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    project_id: i64,
    payload: ProjectUpdateRequest,
) -> AppResult<Project> {
    let project = load_project(state, project_id).await?;
    if payload.title.is_some() {
        require_text(payload.title.as_deref(), TITLE_REQUIRED)?;
    }
    authorize(actor, &project)?;

    let old = project.clone();
    let mut project = project;
    if let Some(title) = payload.title {
        project.title = title.trim().to_string();
    }
    if payload.description.is_some() {
        project.description = payload.description;
    }
    if payload.status.is_some() {
        project.status = payload.status;
    }
    project.updated_at = utc_now();

    let project = state.store.save_project(project).await?;
    tracing::info!(project_id, "project updated");
    log_activity_with_old(&state.events, "updated", Some(actor.user_id), &project, Some(&old));

    Ok(project)
}

/// Soft-deletes the project. Its tasks become unreachable with it.
pub async fn delete_project<S: Store>(state: &AppState<S>, actor: &Actor, project_id: i64) -> AppResult<()> {
    let project = load_project(state, project_id).await?;
    authorize(actor, &project)?;

    let now = utc_now();
    let mut project = project;
    project.deleted_at = Some(now);
    project.updated_at = now;

    let project = state.store.save_project(project).await?;
    tracing::info!(project_id, "project deleted");
    log_activity(&state.events, "deleted", Some(actor.user_id), &project);

    Ok(())
}

fn authorize(actor: &Actor, project: &Project) -> AppResult<()> {
    enforce(
        actor,
        "project",
        project.id,
        authz::project::validate_project_authorization(actor, &ProjectContext::from(project)),
    )
}
