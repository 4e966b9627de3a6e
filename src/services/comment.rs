use crate::app::AppState;
use crate::authz::{self, Actor};
use crate::errors::{AppError, AppResult};
use crate::events::{log_activity, log_activity_with_old};
use crate::models::{Comment, CommentCreateRequest, CommentUpdateRequest};
use crate::store::Store;
use crate::utils::{require_text, utc_now};

use super::{enforce, load_task, load_task_context, task_context};

const CONTENT_REQUIRED: &str = "Comment content cannot be empty";

pub async fn create_comment<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    payload: CommentCreateRequest,
) -> AppResult<Comment> {
    let (task, context) = load_task_context(state, payload.task_id).await?;
    require_text(Some(&payload.content), CONTENT_REQUIRED)?;
    enforce(actor, "task", task.id, authz::comment::check_comment_access(actor, &context))?;

    let now = utc_now();
    let comment = Comment {
        id: 0,
        task_id: task.id,
        user_id: actor.user_id,
        content: payload.content,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let comment = state.store.save_comment(comment).await?;
    tracing::debug!(comment_id = comment.id, task_id = task.id, "comment created");
    log_activity(&state.events, "created", Some(actor.user_id), &comment);

    Ok(comment)
}

pub async fn find_comment<S: Store>(state: &AppState<S>, actor: &Actor, comment_id: i64) -> AppResult<Comment> {
    let comment = load_comment(state, comment_id).await?;
    authorize(state, actor, &comment).await?;
    Ok(comment)
}

pub async fn update_comment<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    comment_id: i64,
    payload: CommentUpdateRequest,
) -> AppResult<Comment> {
    let comment = load_comment(state, comment_id).await?;
    require_text(Some(&payload.content), CONTENT_REQUIRED)?;
    authorize(state, actor, &comment).await?;

    let old = comment.clone();
    let mut comment = comment;
    comment.content = payload.content;
    comment.updated_at = utc_now();

    let comment = state.store.save_comment(comment).await?;
    log_activity_with_old(&state.events, "updated", Some(actor.user_id), &comment, Some(&old));

    Ok(comment)
}

pub async fn delete_comment<S: Store>(state: &AppState<S>, actor: &Actor, comment_id: i64) -> AppResult<()> {
    let comment = load_comment(state, comment_id).await?;
    authorize(state, actor, &comment).await?;

    let now = utc_now();
    let mut comment = comment;
    comment.deleted_at = Some(now);
    comment.updated_at = now;

    let comment = state.store.save_comment(comment).await?;
    log_activity(&state.events, "deleted", Some(actor.user_id), &comment);

    Ok(())
}

async fn load_comment<S: Store>(state: &AppState<S>, comment_id: i64) -> AppResult<Comment> {
    state
        .store
        .find_comment(comment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment not found with given ID: {comment_id}")))
}

/// Comments are governed by the rule of the task they hang off.
async fn authorize<S: Store>(state: &AppState<S>, actor: &Actor, comment: &Comment) -> AppResult<()> {
    let task = load_task(state, comment.task_id).await?;
    let context = task_context(state, &task).await?;
    enforce(actor, "comment", comment.id, authz::comment::check_comment_access(actor, &context))
}
