//! [`Command`] for removing a member from a project team.

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::team,
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for removing a [`TeamMember`] from its project team.
///
/// [`TeamMember`]: crate::domain::TeamMember
#[derive(Clone, Copy, Debug, From)]
pub struct RemoveTeamMember(pub team::Id);

impl<A, V> Command<RemoveTeamMember> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveTeamMember,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveTeamMember(id) = cmd;

        drop(
            self.authorized(Call::delete(format!(
                "{}/members/{id}",
                route::PROJECT_TEAMS,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        Ok(())
    }
}

/// Error of [`RemoveTeamMember`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),
}
