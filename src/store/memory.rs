//! Thread-safe in-memory store for tests and the CLI.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::Store;
use crate::errors::{AppError, AppResult};
use crate::models::{Attachment, Comment, Department, Project, Task, User};

/// Common shape of every stored entity.
trait Row: Clone {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn is_deleted(&self) -> bool;
}

macro_rules! impl_row {
    ($($ty:ty),* $(,)?) => {
        $(impl Row for $ty {
            fn id(&self) -> i64 { self.id }
            fn set_id(&mut self, id: i64) { self.id = id; }
            fn is_deleted(&self) -> bool { self.deleted_at.is_some() }
        })*
    };
}

impl_row!(User, Department, Project, Task, Comment, Attachment);

#[derive(Debug)]
struct Table<T> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Row> Table<T> {
    fn find(&self, id: i64) -> Option<T> {
        self.rows.get(&id).filter(|row| !row.is_deleted()).cloned()
    }

    fn save(&mut self, mut row: T) -> T {
        if row.id() == 0 {
            row.set_id(self.next_id);
        }
        self.next_id = self.next_id.max(row.id() + 1);
        self.rows.insert(row.id(), row.clone());
        row
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: Table<User>,
    departments: Table<Department>,
    projects: Table<Project>,
    tasks: Table<Task>,
    comments: Table<Comment>,
    attachments: Table<Attachment>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&InMemoryState) -> R) -> AppResult<R> {
        let state = self
            .state
            .read()
            .map_err(|err| AppError::internal(format!("store lock poisoned: {err}")))?;
        Ok(f(&state))
    }

    fn write<R>(&self, f: impl FnOnce(&mut InMemoryState) -> R) -> AppResult<R> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AppError::internal(format!("store lock poisoned: {err}")))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, id: i64) -> AppResult<Option<User>> {
        self.read(|s| s.users.find(id))
    }

    async fn find_department(&self, id: i64) -> AppResult<Option<Department>> {
        self.read(|s| s.departments.find(id))
    }

    async fn find_project(&self, id: i64) -> AppResult<Option<Project>> {
        self.read(|s| s.projects.find(id))
    }

    async fn find_task(&self, id: i64) -> AppResult<Option<Task>> {
        self.read(|s| s.tasks.find(id))
    }

    async fn find_comment(&self, id: i64) -> AppResult<Option<Comment>> {
        self.read(|s| s.comments.find(id))
    }

    async fn find_attachment(&self, id: i64) -> AppResult<Option<Attachment>> {
        self.read(|s| s.attachments.find(id))
    }

    async fn list_attachments_for_task(&self, task_id: i64) -> AppResult<Vec<Attachment>> {
        self.read(|s| {
            let mut attachments: Vec<Attachment> = s
                .attachments
                .rows
                .values()
                .filter(|a| a.task_id == task_id && !a.is_deleted())
                .cloned()
                .collect();
            attachments.sort_by_key(|a| a.id);
            attachments
        })
    }

    async fn save_user(&self, user: User) -> AppResult<User> {
        self.write(|s| s.users.save(user))
    }

    async fn save_department(&self, department: Department) -> AppResult<Department> {
        self.write(|s| s.departments.save(department))
    }

    async fn save_project(&self, project: Project) -> AppResult<Project> {
        self.write(|s| s.projects.save(project))
    }

    async fn save_task(&self, task: Task) -> AppResult<Task> {
        self.write(|s| s.tasks.save(task))
    }

    async fn save_comment(&self, comment: Comment) -> AppResult<Comment> {
        self.write(|s| s.comments.save(comment))
    }

    async fn save_attachment(&self, attachment: Attachment) -> AppResult<Attachment> {
        self.write(|s| s.attachments.save(attachment))
    }
}
