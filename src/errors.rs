use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::authz::state_machine::TaskStateError;

pub type AppResult<T> = Result<T, AppError>;

/// Reason an authorization check said no. Each variant is tied to one
/// (resource, action) rule.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    #[error("User does not have permission to create a task")]
    TaskCreation,
    #[error("User does not have access to this task")]
    TaskAccess,
    #[error("User does not have permission to manage this task")]
    TaskManagement,
    #[error("User does not have permission to assign this task")]
    TaskAssignment,
    #[error("User does not have permission to change task priority")]
    TaskPriorityChange,
    #[error("User does not have permission to delete this task")]
    TaskDeletion,
    #[error("User cannot manage projects in this department: {department_id}")]
    ProjectManagement { department_id: i64 },
    #[error("Group manager cannot comment on other departments")]
    CommentOtherDepartment,
    #[error("User is not assigned to this task")]
    CommentUnassignedTask,
    #[error("User cannot attach files to tasks not assigned to them")]
    AttachToUnassignedTask,
    #[error("User cannot download files from tasks not assigned to them")]
    DownloadFromUnassignedTask,
    #[error("User cannot delete files from tasks not assigned to them")]
    DeleteFromUnassignedTask,
    #[error("User cannot view attachments from tasks not assigned to them")]
    ViewAttachmentsFromUnassignedTask,
}

impl Denial {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Denial::TaskCreation => "task.create_denied",
            Denial::TaskAccess => "task.access_denied",
            Denial::TaskManagement => "task.manage_denied",
            Denial::TaskAssignment => "task.assign_denied",
            Denial::TaskPriorityChange => "task.priority_denied",
            Denial::TaskDeletion => "task.delete_denied",
            Denial::ProjectManagement { .. } => "project.manage_denied",
            Denial::CommentOtherDepartment => "comment.other_department",
            Denial::CommentUnassignedTask => "comment.unassigned_task",
            Denial::AttachToUnassignedTask => "attachment.attach_unassigned_task",
            Denial::DownloadFromUnassignedTask => "attachment.download_unassigned_task",
            Denial::DeleteFromUnassignedTask => "attachment.delete_unassigned_task",
            Denial::ViewAttachmentsFromUnassignedTask => "attachment.view_unassigned_task",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("forbidden: {0}")]
    Forbidden(#[from] Denial),
    #[error(transparent)]
    TaskState(#[from] TaskStateError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::TaskState(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The denial behind a 403, if this is one.
    pub fn denial(&self) -> Option<Denial> {
        match self {
            AppError::Forbidden(denial) => Some(*denial),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Forbidden(_) => "forbidden",
            AppError::TaskState(TaskStateError::Completed { .. }) => "task_completed",
            AppError::TaskState(TaskStateError::InvalidTransition { .. }) => "invalid_transition",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Configuration(_) => "configuration",
            AppError::Internal(_) => "internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            code: self.denial().map(|d| d.code()),
        };

        (self.status(), Json(payload)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}
