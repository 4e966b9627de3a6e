//! Task rules.
//!
//! Management-type actions (create, manage, assign, re-prioritize, delete)
//! share one rule: team leaders anywhere, group managers inside the task's
//! department, team members never. Reading a task and changing its state
//! additionally admit the assignee.

use super::actor::{Actor, ProjectContext, TaskContext};
use super::scope::{is_assignee, leads_department, require};
use super::state_machine;
use crate::errors::{AppResult, Denial};
use crate::models::TaskState;

pub fn can_create_task(actor: &Actor, project: &ProjectContext) -> bool {
    leads_department(actor, project.department_id)
}

pub fn validate_task_creation(actor: &Actor, project: &ProjectContext) -> Result<(), Denial> {
    require(can_create_task(actor, project), Denial::TaskCreation)
}

pub fn can_access_task(actor: &Actor, task: &TaskContext) -> bool {
    leads_department(actor, task.department_id) || is_assignee(actor, task)
}

pub fn validate_task_access(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(can_access_task(actor, task), Denial::TaskAccess)
}

pub fn can_manage_task(actor: &Actor, task: &TaskContext) -> bool {
    leads_department(actor, task.department_id)
}

pub fn validate_task_management(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(can_manage_task(actor, task), Denial::TaskManagement)
}

pub fn can_assign_task(actor: &Actor, task: &TaskContext) -> bool {
    leads_department(actor, task.department_id)
}

pub fn validate_task_assignment(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(can_assign_task(actor, task), Denial::TaskAssignment)
}

pub fn can_change_task_priority(actor: &Actor, task: &TaskContext) -> bool {
    leads_department(actor, task.department_id)
}

pub fn validate_task_priority_change(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(can_change_task_priority(actor, task), Denial::TaskPriorityChange)
}

pub fn can_delete_task(actor: &Actor, task: &TaskContext) -> bool {
    leads_department(actor, task.department_id)
}

pub fn validate_task_deletion(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(can_delete_task(actor, task), Denial::TaskDeletion)
}

/// Access gate, then the terminal-state check, then the transition table.
/// On success returns the state to persist.
pub fn validate_task_state_change(actor: &Actor, task: &TaskContext, new_state: TaskState) -> AppResult<TaskState> {
    validate_task_access(actor, task)?;
    Ok(state_machine::validate_state_change(task.state, new_state)?)
}
