//! Offline decisions over JSON snapshots, used by the `decide` command.
//!
//! ```json
//! {
//!   "actor": { "user_id": 3, "role": "TEAM_MEMBER", "department_id": 1 },
//!   "task": { "task_id": 10, "department_id": 1, "assignee_id": 3, "state": "BACKLOG" },
//!   "action": { "type": "change_state", "new_state": "BLOCKED", "reason": "waiting on vendor" }
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::authz::{self, Actor, AttachmentContext, ProjectContext, TaskContext};
use crate::errors::{AppError, AppResult};
use crate::models::TaskState;
use crate::services::task::require_reason;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    CreateTask,
    AccessTask,
    ManageTask,
    AssignTask,
    ChangePriority,
    DeleteTask,
    ChangeState {
        new_state: TaskState,
        #[serde(default)]
        reason: Option<String>,
    },
    ManageProject,
    Comment,
    Attach,
    ViewAttachments,
    Download,
    DeleteAttachment,
}

/// Identity-free check of a requested move: the reason rule, then the
/// terminal check, then the table. Returns the state to persist.
pub fn check_transition(from: TaskState, to: TaskState, reason: Option<&str>) -> AppResult<TaskState> {
    require_reason(to, reason)?;
    Ok(authz::state_machine::validate_state_change(from, to)?)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttachmentSnapshot {
    pub attachment_id: i64,
    pub uploader_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub actor: Actor,
    #[serde(default)]
    pub project: Option<ProjectContext>,
    #[serde(default)]
    pub task: Option<TaskContext>,
    #[serde(default)]
    pub attachment: Option<AttachmentSnapshot>,
    pub action: Action,
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Evaluates the action with the same ordering the services use.
    pub fn decide(&self) -> AppResult<()> {
        let actor = &self.actor;
        match &self.action {
            Action::CreateTask => Ok(authz::task::validate_task_creation(actor, &self.project()?)?),
            Action::ManageProject => Ok(authz::project::validate_project_authorization(actor, &self.project()?)?),
            Action::AccessTask => Ok(authz::task::validate_task_access(actor, &self.task()?)?),
            Action::ManageTask => Ok(authz::task::validate_task_management(actor, &self.task()?)?),
            Action::AssignTask => Ok(authz::task::validate_task_assignment(actor, &self.task()?)?),
            Action::ChangePriority => Ok(authz::task::validate_task_priority_change(actor, &self.task()?)?),
            Action::DeleteTask => Ok(authz::task::validate_task_deletion(actor, &self.task()?)?),
            Action::ChangeState { new_state, reason } => {
                let task = self.task()?;
                require_reason(*new_state, reason.as_deref())?;
                authz::task::validate_task_state_change(actor, &task, *new_state).map(|_| ())
            }
            Action::Comment => Ok(authz::comment::check_comment_access(actor, &self.task()?)?),
            Action::Attach => Ok(authz::attachment::validate_attach(actor, &self.task()?)?),
            Action::ViewAttachments => Ok(authz::attachment::validate_view(actor, &self.task()?)?),
            Action::Download => Ok(authz::attachment::validate_download(actor, &self.attachment()?)?),
            Action::DeleteAttachment => Ok(authz::attachment::validate_delete(actor, &self.attachment()?)?),
        }
    }

    fn project(&self) -> AppResult<ProjectContext> {
        self.project
            .ok_or_else(|| AppError::validation("scenario is missing a project snapshot"))
    }

    fn task(&self) -> AppResult<TaskContext> {
        self.task
            .ok_or_else(|| AppError::validation("scenario is missing a task snapshot"))
    }

    fn attachment(&self) -> AppResult<AttachmentContext> {
        let snapshot = self
            .attachment
            .ok_or_else(|| AppError::validation("scenario is missing an attachment snapshot"))?;
        Ok(AttachmentContext {
            attachment_id: snapshot.attachment_id,
            uploader_id: snapshot.uploader_id,
            task: self.task()?,
        })
    }
}
