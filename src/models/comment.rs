use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{Loggable, Severity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub task_id: i64,
    /// Author of the comment.
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Loggable for Comment {
    fn entity_type() -> &'static str { "comment" }
    fn subject_id(&self) -> i64 { self.id }
    fn severity(&self) -> Severity { Severity::Noise }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreateRequest {
    pub task_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentUpdateRequest {
    pub content: String,
}
