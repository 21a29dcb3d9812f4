//! [`Command`] for updating a [`Task`] status.
//!
//! [`Task`]: crate::domain::Task

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{project, task},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    CallError, Service,
};

use super::Command;

/// [`Command`] for moving a [`Task`] into another [`task::Status`] column.
///
/// The reconciliation call of the board's optimistic move.
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug)]
pub struct UpdateTaskStatus {
    /// ID of the [`Task`] to move.
    ///
    /// [`Task`]: crate::domain::Task
    pub task: task::Id,

    /// ID of the [`Project`] the [`Task`] belongs to.
    ///
    /// [`Project`]: crate::domain::Project
    /// [`Task`]: crate::domain::Task
    pub project: project::Id,

    /// [`task::Status`] column to move the [`Task`] into.
    ///
    /// [`Task`]: crate::domain::Task
    pub status: task::Status,
}

impl<A, V> Command<UpdateTaskStatus> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTaskStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTaskStatus {
            task,
            project,
            status,
        } = cmd;

        drop(
            self.authorized(
                Call::patch(format!(
                    "{}/{task}/projects/{project}/status",
                    route::TASKS,
                ))
                .with_body(serde_json::json!({"status": status})),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        Ok(())
    }
}

/// Error of [`UpdateTaskStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),
}
