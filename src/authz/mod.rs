//! Authorization engine and task state machine.
//!
//! Every rule is a pure function of the acting [`Actor`] and a snapshot of
//! the resource graph handed in by the caller. Each `can_*`/`user_can_*`
//! predicate has a `validate_*` twin that turns `false` into a [`Denial`].
//!
//! Role tiers, repeated per resource:
//! - `TEAM_LEADER`: always allowed
//! - `GROUP_MANAGER`: allowed inside the owning project's department
//! - `TEAM_MEMBER`: only on tasks assigned to them, never for management
//!
//! [`Denial`]: crate::errors::Denial

mod actor;
mod scope;

pub mod attachment;
pub mod comment;
pub mod project;
pub mod state_machine;
pub mod task;

pub use actor::{Actor, AttachmentContext, ProjectContext, TaskContext};
pub use state_machine::TaskStateError;
