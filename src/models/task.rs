use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_variant, ParseEnumError};
use crate::events::{Loggable, Severity};

/// Lifecycle state of a task. Legal moves between states live in
/// [`crate::authz::state_machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Backlog,
    InAnalysis,
    InProgress,
    Blocked,
    Cancelled,
    Completed,
}

impl TaskState {
    pub const ALL: [TaskState; 6] = [
        TaskState::Backlog,
        TaskState::InAnalysis,
        TaskState::InProgress,
        TaskState::Blocked,
        TaskState::Cancelled,
        TaskState::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Backlog => "BACKLOG",
            TaskState::InAnalysis => "IN_ANALYSIS",
            TaskState::InProgress => "IN_PROGRESS",
            TaskState::Blocked => "BLOCKED",
            TaskState::Cancelled => "CANCELLED",
            TaskState::Completed => "COMPLETED",
        }
    }

    /// `COMPLETED` is the only state with no way out.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed)
    }

    /// Moving into these states needs a free-text reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, TaskState::Cancelled | TaskState::Blocked)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "BACKLOG" => Ok(TaskState::Backlog),
            "IN_ANALYSIS" => Ok(TaskState::InAnalysis),
            "IN_PROGRESS" => Ok(TaskState::InProgress),
            "BLOCKED" => Ok(TaskState::Blocked),
            "CANCELLED" => Ok(TaskState::Cancelled),
            "COMPLETED" => Ok(TaskState::Completed),
            _ => Err(ParseEnumError::new("task state", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Critical => "CRITICAL",
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "CRITICAL" => Ok(TaskPriority::Critical),
            "HIGH" => Ok(TaskPriority::High),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "LOW" => Ok(TaskPriority::Low),
            _ => Err(ParseEnumError::new("task priority", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub user_story_description: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub state: TaskState,
    pub priority: Option<TaskPriority>,
    pub state_change_reason: Option<String>,
    pub assignee_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Loggable for Task {
    fn entity_type() -> &'static str { "task" }
    fn subject_id(&self) -> i64 { self.id }

    fn severity_for_action(&self, action: &str) -> Severity {
        match action {
            "deleted" | "state_changed" => Severity::Critical,
            "assigned" | "priority_changed" | "created" | "updated" => self.severity(),
            _ => Severity::Important,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreateRequest {
    pub title: String,
    pub user_story_description: Option<String>,
    pub acceptance_criteria: Option<String>,
    /// Any state is accepted on creation; absent means `BACKLOG`.
    pub state: Option<TaskState>,
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskUpdateRequest {
    pub title: Option<String>,
    pub user_story_description: Option<String>,
    pub acceptance_criteria: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStateUpdateRequest {
    pub new_state: TaskState,
    pub reason: Option<String>,
}
