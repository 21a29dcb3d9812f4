//! [`Command`] for updating a [`Task`].
//!
//! [`Task`]: crate::domain::Task

use derive_more::{Display, Error, From};
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{project, task, user},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for partially updating a [`Task`].
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Debug)]
pub struct UpdateTask {
    /// ID of the [`Task`] to update.
    ///
    /// [`Task`]: crate::domain::Task
    pub task: task::Id,

    /// ID of the [`Project`] the [`Task`] belongs to.
    ///
    /// [`Project`]: crate::domain::Project
    /// [`Task`]: crate::domain::Task
    pub project: project::Id,

    /// [`Changes`] to apply.
    pub changes: Changes,
}

/// Partial [`Task`] update.
///
/// Absent fields stay untouched.
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// New [`task::Title`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<task::Title>,

    /// New [`task::Description`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<task::Description>,

    /// New start date.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date::option"
    )]
    pub start_date: Option<time::Date>,

    /// New due date.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date::option"
    )]
    pub due_date: Option<time::Date>,

    /// New [`task::Priority`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<task::Priority>,

    /// ID of the [`User`] to reassign the [`Task`] to.
    ///
    /// [`Task`]: crate::domain::Task
    /// [`User`]: crate::domain::User
    #[serde(rename = "assigneeId", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<user::Id>,
}

impl<A, V> Command<UpdateTask> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateTask) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTask {
            task,
            project,
            changes,
        } = cmd;

        let body = serde_json::to_value(&changes)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        drop(
            self.authorized(
                Call::patch(format!(
                    "{}/{task}/projects/{project}",
                    route::TASKS,
                ))
                .with_body(body),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        Ok(())
    }
}

/// Error of [`UpdateTask`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Changes`] failed to encode.
    #[display("failed to encode the request: {_0}")]
    Encode(serde_json::Error),

    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),
}
