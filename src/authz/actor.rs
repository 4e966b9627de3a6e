use serde::{Deserialize, Serialize};

use crate::models::{Attachment, Project, Role, Task, TaskState, User};

/// The identity performing the action under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
    pub department_id: Option<i64>,
}

impl Actor {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self {
            user_id,
            role,
            department_id: None,
        }
    }

    pub fn with_department(mut self, department_id: i64) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn leader(user_id: i64) -> Self {
        Self::new(user_id, Role::TeamLeader)
    }

    pub fn manager(user_id: i64, department_id: i64) -> Self {
        Self::new(user_id, Role::GroupManager).with_department(department_id)
    }

    pub fn member(user_id: i64, department_id: i64) -> Self {
        Self::new(user_id, Role::TeamMember).with_department(department_id)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            department_id: user.department_id,
        }
    }
}

/// Snapshot of a project as the engine sees it: only its department matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project_id: i64,
    pub department_id: i64,
}

impl From<&Project> for ProjectContext {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.id,
            department_id: project.department_id,
        }
    }
}

/// Snapshot of a task joined with its project's department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContext {
    pub task_id: i64,
    pub department_id: i64,
    pub assignee_id: Option<i64>,
    pub state: TaskState,
}

impl TaskContext {
    /// Joins a task with its owning project. The caller guarantees
    /// `project.id == task.project_id`.
    pub fn new(task: &Task, project: &Project) -> Self {
        debug_assert_eq!(task.project_id, project.id);
        Self {
            task_id: task.id,
            department_id: project.department_id,
            assignee_id: task.assignee_id,
            state: task.state,
        }
    }
}

/// Snapshot of an attachment with the task it hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentContext {
    pub attachment_id: i64,
    pub uploader_id: i64,
    pub task: TaskContext,
}

impl AttachmentContext {
    pub fn new(attachment: &Attachment, task: TaskContext) -> Self {
        debug_assert_eq!(attachment.task_id, task.task_id);
        Self {
            attachment_id: attachment.id,
            uploader_id: attachment.user_id,
            task,
        }
    }
}
