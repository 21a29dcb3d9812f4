//! [`Query`] collection related to the multiple [`Task`]s.
//!
//! [`Task`]: crate::domain::Task

use common::pagination::Arguments;
use tracerr::Traced;

use crate::{
    domain::{project, user, Task},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    read,
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] of a [`Page`] of all the [`Task`]s of a [`Project`].
///
/// [`Page`]: read::task::list::Page
/// [`Project`]: crate::domain::Project
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug)]
pub struct ListForProject {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// [`Arguments`] of the requested [`Page`].
    ///
    /// [`Page`]: read::task::list::Page
    pub arguments: Arguments,
}

impl<A, V> Query<ListForProject> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::task::list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: ListForProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ListForProject { project, arguments } = query;

        let reply = self
            .authorized(
                Call::get(format!(
                    "{}/{project}/all-tasks",
                    route::PROJECT_TASKS,
                ))
                .with_query(arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of the current user's [`Task`]s of a [`Project`], shaped for
/// the board.
///
/// [`Project`]: crate::domain::Project
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug)]
pub struct MineForProject(pub project::Id);

impl<A, V> Query<MineForProject> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<Task>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: MineForProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MineForProject(project) = query;

        let reply = self
            .authorized(Call::get(format!(
                "{}/{project}/my-tasks",
                route::PROJECT_TASKS,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of a team member's [`Task`]s of a [`Project`], shaped for the
/// board.
///
/// [`Project`]: crate::domain::Project
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug)]
pub struct ForMember {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// ID of the member's [`User`].
    ///
    /// [`User`]: crate::domain::User
    pub member: user::Id,
}

impl<A, V> Query<ForMember> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<Task>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ForMember) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ForMember { project, member } = query;

        let reply = self
            .authorized(Call::get(format!(
                "{}/{project}/members/{member}/view-tasks",
                route::PROJECT_TASKS,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of the current user's [`Task`]s due soon.
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug, Default)]
pub struct UpcomingDue;

impl<A, V> Query<UpcomingDue> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<read::task::list::Node>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: UpcomingDue) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let reply = self
            .authorized(Call::get(route::UPCOMING_DUE_TASKS))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of the recent [`Task`] history feed.
///
/// [`Task`]: crate::domain::Task
#[derive(Clone, Copy, Debug, Default)]
pub struct History;

impl<A, V> Query<History> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<read::task::history::Node>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: History) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let reply = self
            .authorized(Call::get(route::TASK_HISTORY))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}
