//! [`Command`] for archiving a [`Project`].
//!
//! [`Project`]: crate::domain::Project

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::project,
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for archiving a [`Project`].
///
/// An archived [`Project`] disappears from active listings but is not
/// deleted.
///
/// [`Project`]: crate::domain::Project
#[derive(Clone, Copy, Debug, From)]
pub struct ArchiveProject(pub project::Id);

impl<A, V> Command<ArchiveProject> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ArchiveProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ArchiveProject(id) = cmd;

        drop(
            self.authorized(Call::patch(format!(
                "{}/{id}/archive",
                route::PROJECTS,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        Ok(())
    }
}

/// Error of [`ArchiveProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),
}
