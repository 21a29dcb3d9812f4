//! [`Query`] collection related to project teams.

use common::pagination::Arguments;
use tracerr::Traced;

use crate::{
    domain::{project, team},
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    read,
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] of a [`Page`] of the [`TeamMember`]s of a [`Project`].
///
/// [`Page`]: read::team::list::Page
/// [`Project`]: crate::domain::Project
/// [`TeamMember`]: crate::domain::TeamMember
#[derive(Clone, Copy, Debug)]
pub struct Members {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// [`Arguments`] of the requested [`Page`].
    ///
    /// [`Page`]: read::team::list::Page
    pub arguments: Arguments,
}

impl<A, V> Query<Members> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::team::list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Members) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Members { project, arguments } = query;

        let reply = self
            .authorized(
                Call::get(format!(
                    "{}/{project}/members",
                    route::PROJECT_TEAMS,
                ))
                .with_query(arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of a [`Page`] of the current user's [`TeamMember`]s across
/// their projects.
///
/// [`Page`]: read::team::list::Page
/// [`TeamMember`]: crate::domain::TeamMember
#[derive(Clone, Copy, Debug, Default)]
pub struct MyMembers {
    /// [`Arguments`] of the requested [`Page`].
    ///
    /// [`Page`]: read::team::list::Page
    pub arguments: Arguments,
}

impl<A, V> Query<MyMembers> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::team::list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: MyMembers) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MyMembers { arguments } = query;

        let reply = self
            .authorized(
                Call::get(route::MY_TEAM_MEMBERS)
                    .with_query(arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of a [`Page`] of the [`User`]s selectable for assignment into
/// a [`Project`]'s team.
///
/// [`Page`]: read::team::selectable::Page
/// [`Project`]: crate::domain::Project
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Selectable {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// [`Selector`] of the requested [`Page`].
    ///
    /// [`Page`]: read::team::selectable::Page
    /// [`Selector`]: read::team::selectable::Selector
    pub selector: read::team::selectable::Selector,
}

impl<A, V> Query<Selectable> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::team::selectable::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Selectable) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Selectable { project, selector } = query;

        let reply = self
            .authorized(
                Call::get(route::SELECT_MEMBERS)
                    .with_query([("projectId", project.to_string())])
                    .with_query(selector.filter.query())
                    .with_query(selector.arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of a [`Page`] of the [`TeamMember`]s of a [`Project`] together
/// with their workload.
///
/// [`Page`]: read::team::workload::Page
/// [`Project`]: crate::domain::Project
/// [`TeamMember`]: crate::domain::TeamMember
#[derive(Clone, Copy, Debug)]
pub struct WithWorkload {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project: project::Id,

    /// [`Arguments`] of the requested [`Page`].
    ///
    /// [`Page`]: read::team::workload::Page
    pub arguments: Arguments,
}

impl<A, V> Query<WithWorkload> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::team::workload::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: WithWorkload,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let WithWorkload { project, arguments } = query;

        let reply = self
            .authorized(
                Call::get(format!(
                    "{}/{project}/members/workload",
                    route::PROJECT_TEAMS,
                ))
                .with_query(arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of all the available [`team::Specialization`]s.
///
/// A secondary lookup: callers are expected to degrade gracefully when it
/// fails, leaving their prior state unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Specializations;

impl<A, V> Query<Specializations> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<team::Specialization>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: Specializations,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let reply = self
            .authorized(Call::get(route::SPECIALIZATIONS))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}
