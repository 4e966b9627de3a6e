use super::actor::{Actor, ProjectContext};
use super::scope::{leads_department, require};
use crate::errors::Denial;

/// One rule for create, read, update and delete of a project.
pub fn user_has_authorization(actor: &Actor, project: &ProjectContext) -> bool {
    leads_department(actor, project.department_id)
}

pub fn validate_project_authorization(actor: &Actor, project: &ProjectContext) -> Result<(), Denial> {
    require(
        user_has_authorization(actor, project),
        Denial::ProjectManagement {
            department_id: project.department_id,
        },
    )
}
