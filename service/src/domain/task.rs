//! [`Task`] definitions.

use std::str::FromStr;

use common::define_kind;
use derive_more::{
    AsRef, Display, From, FromStr as DeriveFromStr, Into,
};
use serde::{Deserialize, Serialize};

/// Unit of work on a project's board.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// ID of this [`Task`].
    pub id: Id,

    /// [`Title`] of this [`Task`].
    pub title: Title,

    /// [`Description`] of this [`Task`].
    pub description: Description,

    /// [`Priority`] of this [`Task`].
    pub priority: Priority,

    /// [`Status`] column this [`Task`] belongs to.
    pub status: Status,

    /// Date when this [`Task`] is due.
    #[serde(with = "common::datetime::serde::date")]
    pub due_date: time::Date,
}

/// ID of a [`Task`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    DeriveFromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

/// Title of a [`Task`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 255
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Task`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
pub struct Description(String);

define_kind! {
    #[doc = "Priority of a [`Task`]."]
    enum Priority {
        #[doc = "Can wait."]
        Low,

        #[doc = "Regular work."]
        Medium,

        #[doc = "Needs attention first."]
        High,
    }
}

define_kind! {
    #[doc = "Status column of a [`Task`] on the board."]
    enum Status {
        #[doc = "Not started."]
        Todo,

        #[doc = "Being worked on."]
        InProgress,

        #[doc = "Done."]
        Completed,
    }
}

impl Status {
    /// All [`Status`] columns in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];
}

#[cfg(test)]
mod spec {
    use super::Status;

    #[test]
    fn status_wire_form() {
        assert_eq!(Status::Todo.to_string(), "TODO");
        assert_eq!(Status::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(Status::Completed.to_string(), "COMPLETED");

        assert_eq!(
            serde_json::to_value(Status::InProgress).unwrap(),
            serde_json::json!("IN_PROGRESS"),
        );
        assert_eq!("TODO".parse::<Status>().unwrap(), Status::Todo);
    }
}
