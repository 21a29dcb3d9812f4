//! [`Command`] for assigning members into a project team.

use derive_more::{Display, Error, From};
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{project, team::specialization, user},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for assigning [`User`]s into a [`Project`]'s team.
///
/// [`Project`]: crate::domain::Project
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct AddTeamMembers {
    /// ID of the [`Project`] to assign into.
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// [`NewMember`]s to assign.
    pub members: Vec<NewMember>,
}

/// Single member assignment of [`AddTeamMembers`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct NewMember {
    /// ID of the [`User`] to assign.
    ///
    /// [`User`]: crate::domain::User
    #[serde(rename = "userId")]
    pub user: user::Id,

    /// ID of the [`Specialization`] the member fills.
    ///
    /// [`Specialization`]: crate::domain::team::Specialization
    #[serde(rename = "specializationId")]
    pub specialization: specialization::Id,
}

impl<A, V> Command<AddTeamMembers> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddTeamMembers,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddTeamMembers { project, members } = cmd;

        if members.is_empty() {
            return Err(tracerr::new!(E::NoMembers));
        }

        let body = serde_json::to_value(&members)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        drop(
            self.authorized(
                Call::post(format!(
                    "{}/{project}/members",
                    route::PROJECT_TEAMS,
                ))
                .with_body(body),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        Ok(())
    }
}

/// Error of [`AddTeamMembers`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`AddTeamMembers`] carries no members to assign.
    #[display("no members to assign")]
    #[from(ignore)]
    NoMembers,

    /// [`NewMember`]s failed to encode.
    #[display("failed to encode the request: {_0}")]
    Encode(serde_json::Error),

    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),
}
