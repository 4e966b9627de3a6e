use std::path::Path;

use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{self, Actor, AttachmentContext};
use crate::errors::{AppError, AppResult};
use crate::events::log_activity;
use crate::models::{Attachment, AttachmentUploadRequest};
use crate::store::Store;
use crate::utils::{is_blank, utc_now};

use super::{enforce, load_task, load_task_context, task_context};

/// Records an upload against a task. Authorization comes before any check on
/// the file itself.
pub async fn upload_attachment<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    task_id: i64,
    payload: AttachmentUploadRequest,
) -> AppResult<Attachment> {
    let (task, context) = load_task_context(state, task_id).await?;
    enforce(actor, "task", task_id, authz::attachment::validate_attach(actor, &context))?;

    if payload.size_bytes == 0 || is_blank(Some(&payload.file_name)) {
        return Err(AppError::validation("File cannot be empty"));
    }
    let max_bytes = state.config.attachment_max_bytes;
    if payload.size_bytes > max_bytes {
        return Err(AppError::validation(format!(
            "File size exceeds the maximum allowed size of {} bytes",
            max_bytes
        )));
    }

    let stored_name = format!("{}_{}", Uuid::new_v4(), payload.file_name.trim());
    let file_path = Path::new(&state.config.upload_dir)
        .join(&stored_name)
        .to_string_lossy()
        .into_owned();

    let now = utc_now();
    let attachment = Attachment {
        id: 0,
        task_id: task.id,
        user_id: actor.user_id,
        file_name: stored_name,
        file_path,
        size_bytes: payload.size_bytes,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let attachment = state.store.save_attachment(attachment).await?;
    tracing::info!(attachment_id = attachment.id, task_id, size_bytes = attachment.size_bytes, "attachment uploaded");
    log_activity(&state.events, "created", Some(actor.user_id), &attachment);

    Ok(attachment)
}

/// Returns the attachment metadata the caller needs to stream the file.
pub async fn download_attachment<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    attachment_id: i64,
) -> AppResult<Attachment> {
    let (attachment, context) = load_attachment_context(state, attachment_id).await?;
    enforce(
        actor,
        "attachment",
        attachment_id,
        authz::attachment::validate_download(actor, &context),
    )?;
    Ok(attachment)
}

pub async fn delete_attachment<S: Store>(state: &AppState<S>, actor: &Actor, attachment_id: i64) -> AppResult<()> {
    let (attachment, context) = load_attachment_context(state, attachment_id).await?;
    enforce(
        actor,
        "attachment",
        attachment_id,
        authz::attachment::validate_delete(actor, &context),
    )?;

    let now = utc_now();
    let mut attachment = attachment;
    attachment.deleted_at = Some(now);
    attachment.updated_at = now;

    let attachment = state.store.save_attachment(attachment).await?;
    tracing::info!(attachment_id, "attachment deleted");
    log_activity(&state.events, "deleted", Some(actor.user_id), &attachment);

    Ok(())
}

pub async fn list_task_attachments<S: Store>(
    state: &AppState<S>,
    actor: &Actor,
    task_id: i64,
) -> AppResult<Vec<Attachment>> {
    let (_, context) = load_task_context(state, task_id).await?;
    enforce(actor, "task", task_id, authz::attachment::validate_view(actor, &context))?;
    state.store.list_attachments_for_task(task_id).await
}

async fn load_attachment_context<S: Store>(
    state: &AppState<S>,
    attachment_id: i64,
) -> AppResult<(Attachment, AttachmentContext)> {
    let attachment = state
        .store
        .find_attachment(attachment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Attachment not found with given ID: {attachment_id}")))?;
    let task = load_task(state, attachment.task_id).await?;
    let context = AttachmentContext::new(&attachment, task_context(state, &task).await?);
    Ok((attachment, context))
}
