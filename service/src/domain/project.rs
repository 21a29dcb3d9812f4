//! [`Project`] definitions.

use std::str::FromStr;

use common::{define_kind, unit, DateTimeOf};
#[cfg(doc)]
use common::DateTime;
use derive_more::{
    AsRef, Display, From, FromStr as DeriveFromStr, Into,
};
use serde::{Deserialize, Serialize};

use crate::domain::user;

/// Managed project.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// ID of this [`Project`].
    pub id: Id,

    /// [`Name`] of this [`Project`].
    pub name: Name,

    /// [`Description`] of this [`Project`].
    pub description: Description,

    /// Date when work on this [`Project`] starts.
    #[serde(with = "common::datetime::serde::date")]
    pub start_date: time::Date,

    /// Date when work on this [`Project`] ends.
    #[serde(default, with = "common::datetime::serde::date::option")]
    pub end_date: Option<time::Date>,

    /// [`Status`] of this [`Project`].
    pub status: Status,

    /// [`User`] who created this [`Project`].
    ///
    /// [`User`]: user::User
    pub created_by: Author,

    /// [`DateTime`] when this [`Project`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Project`] was last updated.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: UpdateDateTime,

    /// Number of team members assigned to this [`Project`].
    pub team_members_count: u32,

    /// Number of tasks tracked under this [`Project`].
    pub tasks_count: u32,

    /// Indicator whether this [`Project`] is archived.
    pub archived: bool,
}

/// ID of a [`Project`].
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

/// Name of a [`Project`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Description of a [`Project`].
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
    #[doc = "Status of a [`Project`]."]
    enum Status {
        #[doc = "Work has not started yet."]
        Planned,

        #[doc = "Work is ongoing."]
        InProgress,

        #[doc = "Work is finished."]
        Completed,

        #[doc = "Work is suspended."]
        OnHold,
    }
}

/// Summary of the [`User`] who created a [`Project`].
///
/// [`User`]: user::User
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Author {
    /// ID of the [`User`].
    ///
    /// [`User`]: user::User
    pub id: user::Id,

    /// [`user::Name`] of the [`User`].
    ///
    /// [`User`]: user::User
    pub name: user::Name,

    /// [`user::Email`] of the [`User`].
    ///
    /// [`User`]: user::User
    pub email: user::Email,
}

/// [`DateTime`] of a [`Project`] creation.
pub type CreationDateTime = DateTimeOf<(Project, unit::Creation)>;

/// [`DateTime`] of the last [`Project`] update.
pub type UpdateDateTime = DateTimeOf<(Project, unit::Update)>;
