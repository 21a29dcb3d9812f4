//! [`TeamMember`] definitions.

use derive_more::{
    Display, From, FromStr as DeriveFromStr, Into,
};
use serde::{Deserialize, Serialize};

use crate::domain::user;

/// Membership of a [`User`] in a project team.
///
/// [`User`]: user::User
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// ID of this [`TeamMember`]ship.
    pub id: Id,

    /// ID of the [`User`] behind this [`TeamMember`].
    ///
    /// [`User`]: user::User
    pub user_id: user::Id,

    /// Profile picture URL of this [`TeamMember`], if any.
    #[serde(default)]
    pub profile: Option<String>,

    /// [`user::Name`] of this [`TeamMember`].
    pub name: user::Name,

    /// [`user::Email`] of this [`TeamMember`].
    pub email: user::Email,

    /// Name of the [`Specialization`] this [`TeamMember`] fills.
    pub specialization: String,
}

/// ID of a [`TeamMember`]ship.
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

/// [`User`] selectable for assignment into a project team.
///
/// [`User`]: user::User
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableMember {
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

    /// [`user::Role`] of the [`User`].
    ///
    /// [`User`]: user::User
    pub role: user::Role,

    /// Profile picture URL of the [`User`], if any.
    ///
    /// [`User`]: user::User
    #[serde(default)]
    pub profile: Option<String>,
}

/// [`TeamMember`] together with the number of tasks currently open on them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WithWorkload {
    /// The [`TeamMember`] itself.
    #[serde(flatten)]
    pub member: TeamMember,

    /// Number of open tasks assigned to the [`TeamMember`].
    pub workload: u32,
}

/// Specialization a [`TeamMember`] may fill in a project team.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Specialization {
    /// ID of this [`Specialization`].
    pub id: specialization::Id,

    /// Name of this [`Specialization`].
    pub name: String,
}

pub mod specialization {
    //! [`Specialization`] definitions.

    #[cfg(doc)]
    use super::Specialization;
    use derive_more::{
        Display, From, FromStr as DeriveFromStr, Into,
    };
    use serde::{Deserialize, Serialize};

    /// ID of a [`Specialization`].
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
}
