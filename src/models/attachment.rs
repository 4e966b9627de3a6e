use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Loggable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub task_id: i64,
    /// Uploader of the file.
    pub user_id: i64,
    /// Stored name, `<uuid>_<original name>`.
    pub file_name: String,
    pub file_path: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Loggable for Attachment {
    fn entity_type() -> &'static str { "attachment" }
    fn subject_id(&self) -> i64 { self.id }
}

/// Metadata of an upload. The bytes themselves are handled by file storage.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentUploadRequest {
    pub file_name: String,
    pub size_bytes: u64,
}
