//! Read/write access to the resource graph.
//!
//! Soft-deleted rows are invisible to every lookup. `save_*` inserts rows
//! whose id is `0` (assigning a fresh id) and replaces the rest.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{Attachment, Comment, Department, Project, Task, User};

pub mod memory;

pub use memory::InMemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_department(&self, id: i64) -> AppResult<Option<Department>>;
    async fn find_project(&self, id: i64) -> AppResult<Option<Project>>;
    async fn find_task(&self, id: i64) -> AppResult<Option<Task>>;
    async fn find_comment(&self, id: i64) -> AppResult<Option<Comment>>;
    async fn find_attachment(&self, id: i64) -> AppResult<Option<Attachment>>;

    async fn list_attachments_for_task(&self, task_id: i64) -> AppResult<Vec<Attachment>>;

    async fn save_user(&self, user: User) -> AppResult<User>;
    async fn save_department(&self, department: Department) -> AppResult<Department>;
    async fn save_project(&self, project: Project) -> AppResult<Project>;
    async fn save_task(&self, task: Task) -> AppResult<Task>;
    async fn save_comment(&self, comment: Comment) -> AppResult<Comment>;
    async fn save_attachment(&self, attachment: Attachment) -> AppResult<Attachment>;
}
