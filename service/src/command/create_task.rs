//! [`Command`] for creating a [`Task`].
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
    read,
    CallError, Service,
};

use super::Command;

/// [`Command`] for creating a [`Task`] under a [`Project`].
///
/// [`Project`]: crate::domain::Project
/// [`Task`]: crate::domain::Task
#[derive(Clone, Debug)]
pub struct CreateTask {
    /// ID of the [`Project`] to create the [`Task`] under.
    ///
    /// [`Project`]: crate::domain::Project
    /// [`Task`]: crate::domain::Task
    pub project: project::Id,

    /// Contents of the created [`Task`].
    ///
    /// [`Task`]: crate::domain::Task
    pub contents: Contents,
}

/// Contents of a created [`Task`].
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contents {
    /// [`task::Title`] of the [`Task`].
    ///
    /// [`Task`]: crate::domain::Task
    pub title: task::Title,

    /// [`task::Description`] of the [`Task`].
    ///
    /// [`Task`]: crate::domain::Task
    pub description: task::Description,

    /// Date when work on the [`Task`] starts.
    ///
    /// [`Task`]: crate::domain::Task
    #[serde(with = "common::datetime::serde::date")]
    pub start_date: time::Date,

    /// Date when the [`Task`] is due.
    ///
    /// [`Task`]: crate::domain::Task
    #[serde(with = "common::datetime::serde::date")]
    pub due_date: time::Date,

    /// [`task::Priority`] of the [`Task`].
    ///
    /// [`Task`]: crate::domain::Task
    pub priority: task::Priority,

    /// ID of the [`User`] to assign the [`Task`] to.
    ///
    /// [`Task`]: crate::domain::Task
    /// [`User`]: crate::domain::User
    #[serde(rename = "assigneeId", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<user::Id>,
}

impl<A, V> Command<CreateTask> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::task::list::Node;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateTask) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTask { project, contents } = cmd;

        let body = serde_json::to_value(&contents)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let reply = self
            .authorized(
                Call::post(format!("{}/{project}", route::PROJECT_TASKS))
                    .with_body(body),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`CreateTask`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Contents`] failed to encode.
    #[display("failed to encode the request: {_0}")]
    Encode(serde_json::Error),

    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),

    /// Backend reply failed to decode.
    #[display("failed to decode the reply: {_0}")]
    Decode(api::DecodeError),
}
