//! Session definitions.

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Error as StdError, From};
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;

#[cfg(doc)]
use super::User;
use crate::domain::user;

/// Access token of a session.
///
/// Opaque short-lived bearer credential issued by the backend.
#[derive(AsRef, Clone, Debug, Deserialize, Display, From)]
#[as_ref(str, String)]
pub struct AccessToken(String);

/// Refresh token of a session.
///
/// Opaque longer-lived credential exchanged for new [`AccessToken`]s.
#[derive(AsRef, Clone, Debug, Deserialize, Display, From)]
#[as_ref(str, String)]
pub struct RefreshToken(String);

/// Claims carried by an [`AccessToken`].
#[derive(Clone, Debug, Deserialize)]
pub struct Claims {
    /// ID of the [`User`] these [`Claims`] belong to.
    #[serde(default)]
    pub id: Option<user::Id>,

    /// Subject of the token, carrying the [`User`] ID when the `id` claim
    /// is absent.
    #[serde(default)]
    pub sub: Option<String>,

    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Name`] of the [`User`].
    #[serde(default)]
    pub name: Option<user::Name>,

    /// [`user::Role`] of the [`User`].
    pub role: user::Role,

    /// [`user::Permission`]s granted to the [`User`].
    #[serde(default)]
    pub permissions: Vec<user::Permission>,

    /// [`DateTimeOf`] when the [`AccessToken`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Claims {
    /// Returns the [`user::Id`] these [`Claims`] resolve to.
    ///
    /// The `id` claim takes precedence over a numeric `sub` claim.
    #[must_use]
    pub fn user_id(&self) -> Option<user::Id> {
        self.id
            .or_else(|| self.sub.as_deref().and_then(|s| s.parse().ok()))
    }

    /// Builds the [`User`] these [`Claims`] describe.
    ///
    /// Returns [`None`] if the [`Claims`] carry no usable [`user::Id`].
    /// A missing `name` claim falls back to the local part of the email.
    #[must_use]
    pub fn into_user(self) -> Option<user::User> {
        let id = self.user_id()?;
        let name = match self.name {
            Some(name) => name,
            // SAFETY: `Email` guarantees a non-empty local part.
            #[expect(unsafe_code, reason = "invariants are preserved")]
            None => unsafe {
                user::Name::new_unchecked(self.email.local_part())
            },
        };
        Some(user::User {
            id,
            name,
            email: self.email,
            role: self.role,
            permissions: self.permissions,
        })
    }
}

/// [`DateTimeOf`] an [`AccessToken`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Claims, unit::Expiration)>;

/// Decodes the [`Claims`] of the provided [`AccessToken`].
///
/// The signature is NOT verified: the client holds no key, and the backend
/// remains the authority on token validity. Expiry is not validated here
/// either, so expired tokens still decode.
///
/// # Errors
///
/// Returns an error if the token payload is structurally invalid.
pub fn decode(token: &AccessToken) -> Result<Claims, DecodeError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Claims>(
        token.as_ref(),
        &DecodingKey::from_secret(&[]),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(DecodeError::Jwt)
}

/// Error of decoding [`Claims`] from an [`AccessToken`].
#[derive(Debug, Display, StdError, From)]
pub enum DecodeError {
    /// Token payload is not a valid JSON Web Token.
    #[display("failed to decode a JSON Web Token: {_0}")]
    Jwt(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::{decode, AccessToken};

    fn token(claims: &serde_json::Value) -> AccessToken {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn decodes_without_verification() {
        let exp = (DateTime::now() + Duration::from_secs(600)).unix_timestamp();
        let token = token(&json!({
            "id": 7,
            "email": "a@b.com",
            "role": "DEVELOPER",
            "permissions": [
                {"module": "tasks", "canView": true, "canUpdate": true},
            ],
            "exp": exp,
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7.into()));
        assert_eq!(claims.expires_at.unix_timestamp(), exp);

        let user = claims.into_user().unwrap();
        assert_eq!(AsRef::<str>::as_ref(&user.name), "a");
        assert_eq!(user.permissions.len(), 1);
        assert!(user.permissions[0].can_view);
        assert!(!user.permissions[0].can_delete);
    }

    #[test]
    fn resolves_identity_from_sub() {
        let token = token(&json!({
            "sub": "42",
            "email": "pm@corp.example.org",
            "name": "Jane Doe",
            "role": "PROJECT_MANAGER",
            "exp": 4_102_444_800_i64,
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42.into()));
        assert_eq!(
            AsRef::<str>::as_ref(&claims.clone().into_user().unwrap().name),
            "Jane Doe",
        );
    }

    #[test]
    fn rejects_malformed_payload() {
        assert!(decode(&AccessToken::from("not-a-jwt".to_owned())).is_err());
    }

    #[test]
    fn claims_without_identity_yield_no_user() {
        let token = token(&json!({
            "sub": "not-numeric",
            "email": "a@b.com",
            "role": "ADMIN",
            "exp": 4_102_444_800_i64,
        }));

        assert!(decode(&token).unwrap().into_user().is_none());
    }
}
