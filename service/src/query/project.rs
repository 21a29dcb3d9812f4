//! [`Query`] collection related to a single [`Project`].
//!
//! [`Project`]: crate::domain::Project

use tracerr::Traced;

use crate::{
    domain::project,
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    read,
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] of a [`Detail`]ed [`Project`] by its [`project::Id`].
///
/// [`Detail`]: read::project::Detail
/// [`Project`]: crate::domain::Project
#[derive(Clone, Copy, Debug)]
pub struct Detail(pub project::Id);

impl<A, V> Query<Detail> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::project::Detail;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Detail) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Detail(id) = query;

        let reply = self
            .authorized(Call::get(format!("{}/{id}", route::PROJECTS)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}
