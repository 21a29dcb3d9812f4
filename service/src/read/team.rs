//! [`TeamMember`] read model definition.
//!
//! [`TeamMember`]: crate::domain::TeamMember

pub mod list {
    //! [`TeamMember`]s list definitions.
    //!
    //! [`TeamMember`]: crate::domain::TeamMember

    use common::define_pagination;

    define_pagination!(Node, ());

    /// Node in a [`Page`].
    pub type Node = crate::domain::TeamMember;
}

pub mod selectable {
    //! Selectable members list definitions.

    use common::define_pagination;

    use crate::domain::team;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = team::SelectableMember;

    /// Filter for a [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Name (or its part) to search members by.
        pub search: Option<String>,
    }

    impl Filter {
        /// Returns the query parameters representing this [`Filter`].
        #[must_use]
        pub fn query(&self) -> Vec<(&'static str, String)> {
            self.search
                .iter()
                .map(|s| ("search", s.clone()))
                .collect()
        }
    }
}

pub mod workload {
    //! Member workload list definitions.

    use common::define_pagination;

    use crate::domain::team;

    define_pagination!(Node, ());

    /// Node in a [`Page`].
    pub type Node = team::WithWorkload;
}
