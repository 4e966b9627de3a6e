//! User profiles. These are the source of every [`Actor`]: a changed role
//! or department takes effect on the next `AppState::actor` lookup.

use crate::app::AppState;
use crate::authz::Actor;
use crate::errors::{AppError, AppResult};
use crate::events::{log_activity, log_activity_with_old};
use crate::models::{User, UserCreateRequest, UserUpdateRequest};
use crate::store::Store;
use crate::utils::{require_text, utc_now};

pub async fn create_user<S: Store>(state: &AppState<S>, actor: &Actor, payload: UserCreateRequest) -> AppResult<User> {
    require_text(Some(&payload.name), "User name cannot be empty")?;
    require_text(Some(&payload.email), "User email cannot be empty")?;
    if let Some(department_id) = payload.department_id {
        ensure_department(state, department_id).await?;
    }

    let now = utc_now();
    let user = User {
        id: 0,
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        role: payload.role,
        department_id: payload.department_id,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let user = state.store.save_user(user).await?;
    tracing::info!(user_id = user.id, role = %user.role, "user created");
    log_activity(&state.events, "created", Some(actor.user_id), &user);

    Ok(user)
}

pub async fn find_user<S: Store>(state: &AppState<S>, user_id: i64) -> AppResult<User> {
    state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User not found with given ID: {user_id}")))
}

/// Replaces name, email, role and department in one go.
pub async fn update_user<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    user_id: i64,
    payload: UserUpdateRequest,
) -> AppResult<User> {
    let user = find_user(state, user_id).await?;
    ensure_department(state, payload.department_id).await?;
    require_text(Some(&payload.name), "User name cannot be empty")?;
    require_text(Some(&payload.email), "User email cannot be empty")?;

    let old = user.clone();
    let mut user = user;
    user.name = payload.name.trim().to_string();
    user.email = payload.email.trim().to_string();
    user.role = payload.role;
    user.department_id = Some(payload.department_id);
    user.updated_at = utc_now();

    let user = state.store.save_user(user).await?;
    tracing::info!(
        user_id,
        role = %user.role,
        department_id = payload.department_id,
        previous_role = %old.role,
        "user updated"
    );
    log_activity_with_old(&state.events, "updated", Some(actor.user_id), &user, Some(&old));

    Ok(user)
}

/// Soft-deletes the user. Later actor lookups for them fail with 404.
pub async fn delete_user<S: Store>(state: &AppState<S>, actor: &Actor, user_id: i64) -> AppResult<()> {
    let mut user = find_user(state, user_id).await?;
    let now = utc_now();
    user.deleted_at = Some(now);
    user.updated_at = now;

    let user = state.store.save_user(user).await?;
    tracing::info!(user_id, "user deleted");
    log_activity(&state.events, "deleted", Some(actor.user_id), &user);

    Ok(())
}

async fn ensure_department<S: Store>(state: &AppState<S>, department_id: i64) -> AppResult<()> {
    super::department::find_department(state, department_id).await.map(|_| ())
}
