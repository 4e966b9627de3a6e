pub mod attachment;
pub mod comment;
pub mod project;
pub mod task;
pub mod user;

pub use attachment::{Attachment, AttachmentUploadRequest};
pub use comment::{Comment, CommentCreateRequest, CommentUpdateRequest};
pub use project::{Project, ProjectCreateRequest, ProjectStatus, ProjectUpdateRequest};
pub use task::{
    Task, TaskCreateRequest, TaskPriority, TaskState, TaskStateUpdateRequest, TaskUpdateRequest,
};
pub use user::{Department, DepartmentCreateRequest, Role, User, UserCreateRequest, UserUpdateRequest};

/// Error returned when an enum value cannot be parsed from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Normalizes user input like `in-progress` or ` In_Progress ` to `IN_PROGRESS`.
pub(crate) fn normalize_variant(value: &str) -> String {
    value.trim().replace('-', "_").to_ascii_uppercase()
}
