//! [`Command`] definition.

pub mod add_team_members;
pub mod archive_project;
pub mod create_project;
pub mod create_session;
pub mod create_task;
pub mod destroy_session;
pub mod remove_team_member;
pub mod reset_password;
pub mod send_otp;
pub mod update_project;
pub mod update_task;
pub mod update_task_status;
pub mod verify_otp;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_team_members::AddTeamMembers, archive_project::ArchiveProject,
    create_project::CreateProject, create_session::CreateSession,
    create_task::CreateTask, destroy_session::DestroySession,
    remove_team_member::RemoveTeamMember, reset_password::ResetPassword,
    send_otp::SendOtp, update_project::UpdateProject,
    update_task::UpdateTask, update_task_status::UpdateTaskStatus,
    verify_otp::VerifyOtp,
};
