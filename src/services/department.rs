use crate::app::AppState;
use crate::authz::Actor;
use crate::errors::{AppError, AppResult};
use crate::events::log_activity;
use crate::models::{Department, DepartmentCreateRequest};
use crate::store::Store;
use crate::utils::{require_text, utc_now};

/// Departments carry no authorization rule of their own; callers are
/// expected to be authenticated.
pub async fn create_department<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    payload: DepartmentCreateRequest,
) -> AppResult<Department> {
    require_text(Some(&payload.name), "Department name cannot be empty")?;

    let now = utc_now();
    let department = Department {
        id: 0,
        name: payload.name.trim().to_string(),
        created_by: Some(actor.user_id),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let department = state.store.save_department(department).await?;
    tracing::info!(department_id = department.id, "department created");
    log_activity(&state.events, "created", Some(actor.user_id), &department);

    Ok(department)
}

pub async fn find_department<S: Store>(state: &AppState<S>, department_id: i64) -> AppResult<Department> {
    state
        .store
        .find_department(department_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department not found with given ID: {department_id}")))
}

pub async fn delete_department<S: Store>(state: &AppState<S>, actor: &Actor, department_id: i64) -> AppResult<()> {
    let mut department = find_department(state, department_id).await?;
    let now = utc_now();
    department.deleted_at = Some(now);
    department.updated_at = now;

    let department = state.store.save_department(department).await?;
    tracing::info!(department_id, "department deleted");
    log_activity(&state.events, "deleted", Some(actor.user_id), &department);

    Ok(())
}
