//! Attachment rules.
//!
//! Attach, download and list follow the common three-tier pattern with the
//! assignee admitted for team members. Deleting additionally requires a team
//! member to be the original uploader; both failures share one denial.

use super::actor::{Actor, AttachmentContext, TaskContext};
use super::scope::{in_department, is_assignee, require};
use crate::errors::Denial;
use crate::models::Role;

fn own_work_rule(actor: &Actor, task: &TaskContext) -> bool {
    match actor.role {
        Role::TeamLeader => true,
        Role::GroupManager => in_department(actor, task.department_id),
        Role::TeamMember => is_assignee(actor, task),
    }
}

pub fn user_can_attach_file_to_task(actor: &Actor, task: &TaskContext) -> bool {
    own_work_rule(actor, task)
}

pub fn validate_attach(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(user_can_attach_file_to_task(actor, task), Denial::AttachToUnassignedTask)
}

pub fn user_can_download_attachment(actor: &Actor, attachment: &AttachmentContext) -> bool {
    own_work_rule(actor, &attachment.task)
}

pub fn validate_download(actor: &Actor, attachment: &AttachmentContext) -> Result<(), Denial> {
    require(user_can_download_attachment(actor, attachment), Denial::DownloadFromUnassignedTask)
}

pub fn user_can_delete_attachment(actor: &Actor, attachment: &AttachmentContext) -> bool {
    match actor.role {
        Role::TeamLeader => true,
        Role::GroupManager => in_department(actor, attachment.task.department_id),
        Role::TeamMember => {
            is_assignee(actor, &attachment.task) && attachment.uploader_id == actor.user_id
        }
    }
}

pub fn validate_delete(actor: &Actor, attachment: &AttachmentContext) -> Result<(), Denial> {
    require(user_can_delete_attachment(actor, attachment), Denial::DeleteFromUnassignedTask)
}

pub fn user_can_view_task_attachments(actor: &Actor, task: &TaskContext) -> bool {
    own_work_rule(actor, task)
}

pub fn validate_view(actor: &Actor, task: &TaskContext) -> Result<(), Denial> {
    require(user_can_view_task_attachments(actor, task), Denial::ViewAttachmentsFromUnassignedTask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskState;

    const DEPT: i64 = 1;

    fn task(department_id: i64, assignee_id: Option<i64>) -> TaskContext {
        TaskContext {
            task_id: 11,
            department_id,
            assignee_id,
            state: TaskState::InProgress,
        }
    }

    fn attachment(task: TaskContext, uploader_id: i64) -> AttachmentContext {
        AttachmentContext {
            attachment_id: 21,
            uploader_id,
            task,
        }
    }

    #[test]
    fn leader_can_do_everything() {
        let leader = Actor::leader(1);
        let t = task(9, None);
        let a = attachment(t, 5);
        assert!(user_can_attach_file_to_task(&leader, &t));
        assert!(user_can_download_attachment(&leader, &a));
        assert!(user_can_delete_attachment(&leader, &a));
        assert!(user_can_view_task_attachments(&leader, &t));
    }

    #[test]
    fn manager_follows_department_only() {
        let manager = Actor::manager(2, DEPT);
        let own = attachment(task(DEPT, None), 5);
        let foreign = attachment(task(2, Some(2)), 2);

        assert!(user_can_attach_file_to_task(&manager, &own.task));
        assert!(user_can_download_attachment(&manager, &own));
        assert!(user_can_delete_attachment(&manager, &own));
        assert!(user_can_view_task_attachments(&manager, &own.task));

        assert_eq!(validate_attach(&manager, &foreign.task), Err(Denial::AttachToUnassignedTask));
        assert_eq!(validate_download(&manager, &foreign), Err(Denial::DownloadFromUnassignedTask));
        assert_eq!(validate_delete(&manager, &foreign), Err(Denial::DeleteFromUnassignedTask));
        assert_eq!(validate_view(&manager, &foreign.task), Err(Denial::ViewAttachmentsFromUnassignedTask));
    }

    #[test]
    fn member_works_only_on_assigned_task() {
        let member = Actor::member(3, DEPT);
        let assigned = task(DEPT, Some(3));
        let unassigned = task(DEPT, Some(4));

        assert!(user_can_attach_file_to_task(&member, &assigned));
        assert!(user_can_view_task_attachments(&member, &assigned));
        assert!(user_can_download_attachment(&member, &attachment(assigned, 4)));

        assert_eq!(validate_attach(&member, &unassigned), Err(Denial::AttachToUnassignedTask));
        assert_eq!(validate_view(&member, &unassigned), Err(Denial::ViewAttachmentsFromUnassignedTask));
        assert_eq!(
            validate_download(&member, &attachment(unassigned, 3)),
            Err(Denial::DownloadFromUnassignedTask)
        );
    }

    #[test]
    fn member_delete_needs_assignment_and_authorship() {
        let member = Actor::member(3, DEPT);
        let cases = [
            (Some(3), 3, true),
            (Some(3), 4, false),
            (Some(4), 3, false),
            (None, 3, false),
        ];
        for (assignee, uploader, allowed) in cases {
            let a = attachment(task(DEPT, assignee), uploader);
            assert_eq!(user_can_delete_attachment(&member, &a), allowed, "{assignee:?} {uploader}");
            if !allowed {
                assert_eq!(validate_delete(&member, &a), Err(Denial::DeleteFromUnassignedTask));
            }
        }
    }
}
