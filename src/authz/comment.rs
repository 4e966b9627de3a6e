//! Comment rule, shared by create, read, update and delete.
//!
//! Unlike every other resource, a group manager inside the task's department
//! is not admitted on scope alone: they must also be the task's assignee.

use super::actor::{Actor, TaskContext};
use super::scope::{in_department, is_assignee};
use crate::errors::Denial;
use crate::models::Role;

/// Evaluation order: leader, then the manager department check, then the
/// assignee check for everyone still in play.
pub fn check_comment_access(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    match actor.role {
        Role::TeamLeader => return Ok(()),
        Role::GroupManager if !in_department(actor, task.department_id) => {
            return Err(Denial::CommentOtherDepartment);
        }
        Role::GroupManager | Role::TeamMember => {}
    }

    if is_assignee(actor, task) {
        Ok(())
    } else {
        Err(Denial::CommentUnassignedTask)
    }
}

pub fn user_can_reach_comment(actor: &Actor, task: &TaskContext) -> bool {
    check_comment_access(actor, task).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskState;

    fn task(department_id: i64, assignee_id: Option<i64>) -> TaskContext {
        TaskContext {
            task_id: 7,
            department_id,
            assignee_id,
            state: TaskState::InProgress,
        }
    }

    #[test]
    fn leader_comments_anywhere() {
        assert_eq!(check_comment_access(&Actor::leader(1), &task(9, None)), Ok(()));
    }

    #[test]
    fn manager_of_other_department_is_denied_before_assignment_is_checked() {
        let manager = Actor::manager(2, 1);
        assert_eq!(
            check_comment_access(&manager, &task(2, Some(2))),
            Err(Denial::CommentOtherDepartment)
        );
    }

    #[test]
    fn manager_of_same_department_still_needs_assignment() {
        let manager = Actor::manager(2, 1);
        assert_eq!(
            check_comment_access(&manager, &task(1, None)),
            Err(Denial::CommentUnassignedTask)
        );
        assert!(user_can_reach_comment(&manager, &task(1, Some(2))));
    }

    #[test]
    fn member_comments_only_on_assigned_task() {
        let member = Actor::member(3, 1);
        assert!(user_can_reach_comment(&member, &task(1, Some(3))));
        assert_eq!(
            check_comment_access(&member, &task(1, Some(4))),
            Err(Denial::CommentUnassignedTask)
        );
    }

    #[test]
    fn manager_without_department_is_treated_as_other_department() {
        let manager = Actor::new(2, Role::GroupManager);
        assert_eq!(
            check_comment_access(&manager, &task(1, Some(2))),
            Err(Denial::CommentOtherDepartment)
        );
    }
}
