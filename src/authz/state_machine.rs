//! Task lifecycle transition table.
//!
//! `COMPLETED` only ever appears as a destination. Callers that gate on
//! identity (see [`super::task::validate_task_state_change`]) reject a
//! completed task before the table is consulted; a standalone lookup from
//! `COMPLETED` simply finds no edges.

use crate::models::TaskState;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStateError {
    /// The task is already `COMPLETED` and can no longer change.
    #[error("Completed tasks cannot be modified (requested {from} -> {to})")]
    Completed { from: TaskState, to: TaskState },
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: TaskState, to: TaskState },
}

impl TaskStateError {
    pub fn from_state(&self) -> TaskState {
        match self {
            TaskStateError::Completed { from, .. } | TaskStateError::InvalidTransition { from, .. } => *from,
        }
    }

    pub fn to_state(&self) -> TaskState {
        match self {
            TaskStateError::Completed { to, .. } | TaskStateError::InvalidTransition { to, .. } => *to,
        }
    }
}

/// States reachable in one step from `from`. No state lists itself.
pub fn allowed_targets(from: TaskState) -> &'static [TaskState] {
    use TaskState::*;

    match from {
        Backlog => &[InAnalysis, InProgress, Completed, Cancelled],
        InAnalysis => &[Backlog, InProgress, Blocked, Completed, Cancelled],
        InProgress => &[InAnalysis, Completed, Blocked, Cancelled],
        Blocked => &[InAnalysis, InProgress, Backlog, Cancelled],
        Cancelled => &[InAnalysis, InProgress, Backlog],
        Completed => &[],
    }
}

pub fn can_transition(from: TaskState, to: TaskState) -> bool {
    allowed_targets(from).contains(&to)
}

/// Edge legality only, without the terminal-state pre-check. Returns the
/// state the caller should persist.
pub fn validate_transition(from: TaskState, to: TaskState) -> Result<TaskState, TaskStateError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(TaskStateError::InvalidTransition { from, to })
    }
}

/// Terminal pre-check followed by the table lookup.
pub fn validate_state_change(from: TaskState, to: TaskState) -> Result<TaskState, TaskStateError> {
    if from.is_terminal() {
        return Err(TaskStateError::Completed { from, to });
    }
    validate_transition(from, to)
}
