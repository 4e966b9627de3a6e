//! Scope predicates shared by every resource rule.

use super::actor::{Actor, TaskContext};
use crate::errors::Denial;
use crate::models::Role;

/// True when the actor belongs to `department_id`. An actor without a
/// department never matches.
pub(crate) fn in_department(actor: &Actor, department_id: i64) -> bool {
    actor.department_id == Some(department_id)
}

/// True when `task` is currently assigned to the actor.
pub(crate) fn is_assignee(actor: &Actor, task: &TaskContext) -> bool {
    task.assignee_id == Some(actor.user_id)
}

/// The management rule: team leaders always, group managers inside their own
/// department, team members never.
pub(crate) fn leads_department(actor: &Actor, department_id: i64) -> bool {
    match actor.role {
        Role::TeamLeader => true,
        Role::GroupManager => in_department(actor, department_id),
        Role::TeamMember => false,
    }
}

/// Turns a predicate result into the validate-style outcome.
pub(crate) fn require(allowed: bool, denial: Denial) -> Result<(), Denial> {
    if allowed {
        Ok(())
    } else {
        Err(denial)
    }
}
