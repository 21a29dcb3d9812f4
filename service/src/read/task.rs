//! [`Task`] read model definition.
//!
//! [`Task`]: crate::domain::Task

pub mod list {
    //! [`Task`]s list definitions.
    //!
    //! [`Task`]: crate::domain::Task

    use common::define_pagination;
    use serde::{Deserialize, Serialize};

    use crate::domain::{task, user};

    define_pagination!(Node, ());

    /// Node in a [`Page`]: the listing projection of a [`Task`].
    ///
    /// [`Task`]: crate::domain::Task
    #[derive(Clone, Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Node {
        /// ID of the [`Task`].
        ///
        /// [`Task`]: crate::domain::Task
        pub id: task::Id,

        /// [`task::Title`] of the [`Task`].
        ///
        /// [`Task`]: crate::domain::Task
        pub title: task::Title,

        /// [`user::Name`] of the assignee, if the [`Task`] is assigned.
        ///
        /// [`Task`]: crate::domain::Task
        #[serde(default)]
        pub assigned_to: Option<user::Name>,

        /// [`task::Status`] of the [`Task`].
        ///
        /// [`Task`]: crate::domain::Task
        pub status: task::Status,

        /// Date when work on the [`Task`] starts.
        ///
        /// [`Task`]: crate::domain::Task
        #[serde(with = "common::datetime::serde::date")]
        pub start_date: time::Date,

        /// Date when the [`Task`] is due.
        ///
        /// [`Task`]: crate::domain::Task
        #[serde(with = "common::datetime::serde::date")]
        pub due_date: time::Date,

        /// [`task::Priority`] of the [`Task`].
        ///
        /// [`Task`]: crate::domain::Task
        pub priority: task::Priority,
    }
}

pub mod history {
    //! [`Task`] history definitions.
    //!
    //! [`Task`]: crate::domain::Task

    use common::{unit, DateTimeOf};
    use serde::{Deserialize, Serialize};

    /// Single entry of the recent [`Task`] history feed.
    ///
    /// [`Task`]: crate::domain::Task
    #[derive(Clone, Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Node {
        /// ID of this entry.
        pub id: i64,

        /// Human-readable description of the change.
        pub message: String,

        /// [`DateTimeOf`] when the change happened.
        #[serde(with = "common::datetime::serde::rfc3339")]
        pub changed_at: ChangeDateTime,
    }

    /// [`DateTimeOf`] a [`Task`] change.
    ///
    /// [`Task`]: crate::domain::Task
    pub type ChangeDateTime = DateTimeOf<(Node, unit::Change)>;
}
