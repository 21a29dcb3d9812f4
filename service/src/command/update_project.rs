//! [`Command`] for updating a [`Project`].
//!
//! [`Project`]: crate::domain::Project

use derive_more::{Display, Error, From};
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for partially updating a [`Project`].
#[derive(Clone, Debug)]
pub struct UpdateProject {
    /// ID of the [`Project`] to update.
    pub id: project::Id,

    /// [`Changes`] to apply.
    pub changes: Changes,
}

/// Partial [`Project`] update.
///
/// Absent fields stay untouched.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// New [`project::Name`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<project::Name>,

    /// New [`project::Description`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<project::Description>,

    /// New start date.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date::option"
    )]
    pub start_date: Option<time::Date>,

    /// New end date.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date::option"
    )]
    pub end_date: Option<time::Date>,

    /// New [`project::Status`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<project::Status>,
}

impl<A, V> Command<UpdateProject> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Project;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProject { id, changes } = cmd;

        let body = serde_json::to_value(&changes)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let reply = self
            .authorized(
                Call::patch(format!("{}/{id}", route::PROJECTS))
                    .with_body(body),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Changes`] failed to encode.
    #[display("failed to encode the request: {_0}")]
    Encode(serde_json::Error),

    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),

    /// Backend reply failed to decode.
    #[display("failed to decode the reply: {_0}")]
    Decode(api::DecodeError),
}
