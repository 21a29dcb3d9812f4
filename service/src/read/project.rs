//! [`Project`] read model definition.
//!
//! [`Project`]: crate::domain::Project

use serde::{Deserialize, Serialize};

use crate::domain::{project, team::TeamMember};

pub mod list {
    //! [`Project`]s list definitions.
    //!
    //! [`Project`]: crate::domain::Project

    use common::{define_pagination, pagination::Order};

    use crate::domain::project;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = crate::domain::Project;

    /// Filter for a [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`project::Name`] (or its part) to search for.
        pub name: Option<project::Name>,

        /// [`project::Status`] to filter by.
        pub status: Option<project::Status>,

        /// Field to sort the listing by.
        pub sort_by: Option<String>,

        /// [`Order`] to sort the listing in.
        pub order: Option<Order>,
    }

    impl Filter {
        /// Returns the query parameters representing this [`Filter`].
        #[must_use]
        pub fn query(&self) -> Vec<(&'static str, String)> {
            let Self {
                name,
                status,
                sort_by,
                order,
            } = self;

            let mut query = Vec::new();
            if let Some(name) = name {
                query.push(("name", AsRef::<str>::as_ref(name).to_owned()));
            }
            if let Some(status) = status {
                query.push(("status", status.to_string()));
            }
            if let Some(sort_by) = sort_by {
                query.push(("sortBy", sort_by.clone()));
            }
            if let Some(order) = order {
                query.push(("sortDirection", order.as_str().to_owned()));
            }
            query
        }
    }
}

/// [`Project`] detail with its resolved team.
///
/// [`Project`]: crate::domain::Project
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub id: project::Id,

    /// [`project::Name`] of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub name: project::Name,

    /// [`project::Description`] of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub description: project::Description,

    /// Date when work on the [`Project`] starts.
    ///
    /// [`Project`]: crate::domain::Project
    #[serde(with = "common::datetime::serde::date")]
    pub start_date: time::Date,

    /// Date when work on the [`Project`] ends.
    ///
    /// [`Project`]: crate::domain::Project
    #[serde(default, with = "common::datetime::serde::date::option")]
    pub end_date: Option<time::Date>,

    /// [`project::Status`] of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub status: project::Status,

    /// [`TeamMember`]s assigned to the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

/// [`Project`] entry of a selector dropdown.
///
/// [`Project`]: crate::domain::Project
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DropdownItem {
    /// ID of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub id: project::Id,

    /// [`project::Name`] of the [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    pub name: project::Name,
}
