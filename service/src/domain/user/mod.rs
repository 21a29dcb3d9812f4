//! [`User`] definitions.

pub mod session;

use std::{fmt, str::FromStr, sync::LazyLock};

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr as DeriveFromStr, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

/// Authenticated platform user, as described by the claims of an access
/// token.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Role`] of this [`User`].
    pub role: Role,

    /// [`Permission`]s granted to this [`User`].
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// ID of a [`User`].
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

/// Name of a [`User`].
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
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`User`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `email` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Creates a new [`Email`] if the given `email` is valid.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Option<Self> {
        let email = email.into();
        Self::check(&email).then_some(Self(email))
    }

    /// Returns the local part of this [`Email`] (everything before `@`).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    /// Checks whether the given `email` is a valid [`Email`].
    fn check(email: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] invariants:
        /// - Must have a non-empty local part without whitespace;
        /// - Must have a domain with at least one dot;
        /// - Must not contain control characters.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(email.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Password of a [`User`].
#[derive(Clone, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Minimum allowed length of a [`Password`].
    pub const MIN_LENGTH: usize = 8;

    /// Creates a new [`Password`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `password` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        (password.len() >= Self::MIN_LENGTH).then_some(Self(password))
    }

    /// Returns this [`Password`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl CloneableSecret for Password {}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

define_kind! {
    #[doc = "Role of a [`User`]."]
    enum Role {
        #[doc = "Administrator managing platform users."]
        Admin,

        #[doc = "Manager owning projects, tasks and teams."]
        ProjectManager,

        #[doc = "Developer working on assigned tasks."]
        Developer,
    }
}

/// Per-module capability flags granted to a [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Module this [`Permission`] applies to.
    pub module: String,

    /// Capability to view the module.
    #[serde(default)]
    pub can_view: bool,

    /// Capability to create entities in the module.
    #[serde(default)]
    pub can_create: bool,

    /// Capability to update entities in the module.
    #[serde(default)]
    pub can_update: bool,

    /// Capability to delete entities in the module.
    #[serde(default)]
    pub can_delete: bool,
}

impl Permission {
    /// Indicates whether this [`Permission`] allows the provided [`Action`].
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.can_view,
            Action::Create => self.can_create,
            Action::Update => self.can_update,
            Action::Delete => self.can_delete,
        }
    }
}

/// Action a [`Permission`] may allow on a module.
#[derive(
    Clone, Copy, Debug, Eq, EnumString, Hash, PartialEq, StrumDisplay,
)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Viewing the module.
    View,

    /// Creating entities in the module.
    Create,

    /// Updating entities in the module.
    Update,

    /// Deleting entities in the module.
    Delete,
}

#[cfg(test)]
mod spec {
    use super::{Action, Email, Name, Password, Permission};

    #[test]
    fn email_check() {
        assert!(Email::new("a@b.com").is_some());
        assert!(Email::new("dev.one@corp.example.org").is_some());

        assert!(Email::new("").is_none());
        assert!(Email::new("a@b").is_none());
        assert!(Email::new("not an email").is_none());
        assert!(Email::new("@b.com").is_none());
    }

    #[test]
    fn email_local_part() {
        let email = Email::new("dev.one@corp.example.org").unwrap();

        assert_eq!(email.local_part(), "dev.one");
    }

    #[test]
    fn name_check() {
        assert!(Name::new("Jane Doe").is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
    }

    #[test]
    fn password_check() {
        assert!(Password::new("validpass1").is_some());
        assert!(Password::new("short").is_none());
    }

    #[test]
    fn permission_allows() {
        let permission = Permission {
            module: "PROJECTS".to_owned(),
            can_view: true,
            can_create: false,
            can_update: true,
            can_delete: false,
        };

        assert!(permission.allows(Action::View));
        assert!(!permission.allows(Action::Create));
        assert!(permission.allows(Action::Update));
        assert!(!permission.allows(Action::Delete));
    }
}
