//! [`Query`] collection related to the multiple [`Project`]s.
//!
//! [`Project`]: crate::domain::Project

use tracerr::Traced;

use crate::{
    infra::{
        api::{self, route, Api, Call, Reply},
        Vault,
    },
    read,
    Service,
};

use super::{ExecutionError, Query};

/// Scope of a [`Project`]s listing.
///
/// [`Project`]: crate::domain::Project
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Scope {
    /// [`Project`]s the current user is a member of.
    ///
    /// [`Project`]: crate::domain::Project
    #[default]
    Mine,

    /// All [`Project`]s visible to the current user.
    ///
    /// [`Project`]: crate::domain::Project
    All,
}

/// [`Query`] of a [`Page`] of [`Project`]s.
///
/// [`Page`]: read::project::list::Page
/// [`Project`]: crate::domain::Project
#[derive(Clone, Debug, Default)]
pub struct List {
    /// [`Scope`] of the listing.
    pub scope: Scope,

    /// [`Selector`] of the requested [`Page`].
    ///
    /// [`Page`]: read::project::list::Page
    /// [`Selector`]: read::project::list::Selector
    pub selector: read::project::list::Selector,
}

impl<A, V> Query<List> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = read::project::list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let List { scope, selector } = query;

        let path = match scope {
            Scope::Mine => route::MY_PROJECTS,
            Scope::All => route::PROJECTS,
        };
        let reply = self
            .authorized(
                Call::get(path)
                    .with_query(selector.filter.query())
                    .with_query(selector.arguments.query()),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        reply.result().map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] of [`DropdownItem`]s for a selector widget.
///
/// [`DropdownItem`]: read::project::DropdownItem
#[derive(Clone, Debug, Default)]
pub struct Dropdown {
    /// [`Scope`] of the listing.
    pub scope: Scope,

    /// Name (or its part) to search [`Project`]s by.
    ///
    /// [`Project`]: crate::domain::Project
    pub search: Option<String>,
}

impl<A, V> Query<Dropdown> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = Vec<read::project::DropdownItem>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Dropdown) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Dropdown { scope, search } = query;

        let path = match scope {
            Scope::Mine => route::MY_PROJECTS_DROPDOWN,
            Scope::All => route::PM_PROJECTS_DROPDOWN,
        };
        let reply = self
            .authorized(Call::get(path).with_query(
                search.into_iter().map(|s| ("search", s)),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // The dropdown endpoint pages its listing; only the content is
        // meaningful to a selector.
        let page: common::pagination::Page<read::project::DropdownItem> =
            reply.result().map_err(tracerr::from_and_wrap!(=> E))?;
        Ok(page.content)
    }
}
