//! [`Command`] for creating a [`Project`].
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

/// [`Command`] for creating a [`Project`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// [`project::Name`] of the [`Project`].
    pub name: project::Name,

    /// [`project::Description`] of the [`Project`].
    pub description: project::Description,

    /// Date when work on the [`Project`] starts.
    #[serde(with = "common::datetime::serde::date")]
    pub start_date: time::Date,

    /// Date when work on the [`Project`] ends.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::date::option"
    )]
    pub end_date: Option<time::Date>,

    /// Initial [`project::Status`] of the [`Project`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<project::Status>,
}

impl<A, V> Command<CreateProject> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Project;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let body = serde_json::to_value(&cmd)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let reply = self
            .authorized(Call::post(route::PROJECTS).with_body(body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`CreateProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`CreateProject`] failed to encode.
    #[display("failed to encode the request: {_0}")]
    Encode(serde_json::Error),

    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),

    /// Backend reply failed to decode.
    #[display("failed to decode the reply: {_0}")]
    Decode(api::DecodeError),
}
