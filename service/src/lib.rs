//! Service contains the client-side logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod board;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
#[cfg(test)]
mod testing;

use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

pub use self::{board::Board, command::Command, query::Query};

use crate::{
    domain::{
        user::{
            self,
            session::{self, AccessToken, RefreshToken},
        },
        User,
    },
    infra::{
        api::{self, Api, Call, Reply},
        vault::{Key, Vault},
    },
};

/// Client of the project management platform.
///
/// Generic over the remote backend `A` it calls and the session [`Vault`]
/// `V` it owns. The session is reachable only through this [`Service`]:
/// other components read it via accessors and never mutate it directly.
#[derive(Clone, Debug)]
pub struct Service<A, V> {
    /// Remote backend of this [`Service`].
    api: A,

    /// Session [`Vault`] of this [`Service`].
    vault: V,
}

impl<A, V> Service<A, V> {
    /// Creates a new [`Service`] over the provided backend and session
    /// [`Vault`].
    pub fn new(api: A, vault: V) -> Self {
        Self { api, vault }
    }

    /// Returns the remote backend of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the session [`Vault`] of this [`Service`].
    #[must_use]
    pub fn vault(&self) -> &V {
        &self.vault
    }
}

impl<A, V: Vault> Service<A, V> {
    /// Returns the [`User`] of the current session, if one is stored.
    #[must_use]
    pub fn session_user(&self) -> Option<User> {
        serde_json::from_str(&self.vault.load(Key::User)?).ok()
    }

    /// Indicates whether a non-expired access token is currently stored.
    ///
    /// An absent or expired token makes this `false` even when a refresh
    /// token is present: refreshing happens lazily at the next
    /// authenticated call, never as a side effect of this check. An expired
    /// token with no refresh token to recover by, or a token with an
    /// invalid payload, clears the stored session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.vault.load(Key::AccessToken) else {
            return false;
        };
        match session::decode(&AccessToken::from(token)) {
            Ok(claims) => {
                if claims.expires_at > common::DateTime::now().coerce() {
                    return true;
                }
                if self.vault.load(Key::RefreshToken).is_none() {
                    self.clear_session();
                }
                false
            }
            Err(e) => {
                log::debug!("stored access token is invalid: {e}");
                self.clear_session();
                false
            }
        }
    }

    /// Indicates whether the current session's [`User`] is allowed the
    /// provided [`user::Action`] on the named module.
    ///
    /// The module lookup is case-insensitive. Returns `false` when no
    /// session is stored, or the module carries no matching permission.
    #[must_use]
    pub fn has_permission(&self, module: &str, action: user::Action) -> bool {
        self.session_user().is_some_and(|user| {
            user.permissions
                .iter()
                .find(|p| p.module.eq_ignore_ascii_case(module))
                .is_some_and(|p| p.allows(action))
        })
    }

    /// Clears every stored session value.
    ///
    /// Idempotent: clearing an absent session is a no-op.
    pub fn clear_session(&self) {
        self.vault.remove(Key::AccessToken);
        self.vault.remove(Key::RefreshToken);
        self.vault.remove(Key::User);
    }
}

impl<A, V> Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    /// Exchanges the provided [`RefreshToken`] for a new [`AccessToken`].
    ///
    /// On success the new token is persisted and returned. Any failure
    /// (transport, rejection, malformed body) yields [`None`] without
    /// touching the stored session.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Option<AccessToken> {
        /// `result` of the refresh endpoint's envelope.
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Refreshed {
            /// Newly issued access token.
            access_token: AccessToken,
        }

        let call = Call::post(api::route::REFRESH_TOKEN).with_body(
            serde_json::json!({"refreshToken": AsRef::<str>::as_ref(refresh_token)}),
        );
        let reply = match self.api.execute(call).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                return None;
            }
        };
        if !reply.is_success() {
            log::warn!("token refresh rejected with status {}", reply.status);
            return None;
        }
        let Ok(Refreshed { access_token }) = reply.result() else {
            log::warn!("token refresh replied with a malformed body");
            return None;
        };

        self.vault.store(
            Key::AccessToken,
            AsRef::<str>::as_ref(&access_token).to_owned(),
        );
        Some(access_token)
    }

    /// Performs the provided [`Call`] with a bearer [`AccessToken`]
    /// attached.
    ///
    /// When no access token is stored, one refresh cycle is attempted
    /// before sending; when the backend replies `401 Unauthorized`, exactly
    /// one refresh-and-retry is performed. A terminal refresh failure
    /// clears the session and surfaces
    /// [`CallError::AuthenticationRequired`].
    ///
    /// A terminal non-2xx [`Reply`] whose JSON body carries a `message`
    /// becomes a [`CallError::Rejected`]; without one, the raw [`Reply`] is
    /// returned for the caller to interpret.
    ///
    /// # Errors
    ///
    /// See [`CallError`].
    pub async fn authorized(
        &self,
        call: Call,
    ) -> Result<Reply, Traced<CallError>> {
        use CallError as E;

        let token = match self.vault.load(Key::AccessToken) {
            Some(token) => AccessToken::from(token),
            None => self.refresh_or_clear().await.map_err(tracerr::wrap!())?,
        };

        let reply = self
            .api
            .execute(call.clone().with_bearer(token))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let reply = if reply.is_unauthorized() {
            let token =
                self.refresh_or_clear().await.map_err(tracerr::wrap!())?;
            self.api
                .execute(call.with_bearer(token))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
        } else {
            reply
        };

        if !reply.is_success() {
            if let Some(message) = reply.message() {
                return Err(tracerr::new!(E::Rejected {
                    status: reply.status,
                    message: message.to_owned(),
                }));
            }
        }

        Ok(reply)
    }

    /// Single refresh cycle of [`Service::authorized`].
    ///
    /// Clears the session when no refresh token is stored or the refresh
    /// is not accepted.
    async fn refresh_or_clear(
        &self,
    ) -> Result<AccessToken, Traced<CallError>> {
        use CallError as E;

        let Some(refresh_token) = self.vault.load(Key::RefreshToken) else {
            self.clear_session();
            return Err(tracerr::new!(E::AuthenticationRequired));
        };
        match self
            .refresh_access_token(&RefreshToken::from(refresh_token))
            .await
        {
            Some(token) => Ok(token),
            None => {
                self.clear_session();
                Err(tracerr::new!(E::AuthenticationRequired))
            }
        }
    }
}

/// Error of performing an authenticated [`Call`].
#[derive(Debug, Display, Error, From)]
pub enum CallError {
    /// No usable access or refresh token is available.
    #[display("authentication required")]
    AuthenticationRequired,

    /// Remote backend operation failed.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Remote backend rejected the [`Call`].
    #[display("backend rejected the call ({status}): {message}")]
    #[from(ignore)]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,

        /// Server-provided error message.
        message: String,
    },
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::user::{session::RefreshToken, Action},
        infra::{
            api::{route, Call},
            vault::{Key, Memory, Vault as _},
        },
        testing, CallError,
    };

    #[tokio::test]
    async fn authorized_attaches_bearer() {
        let service = testing::service([testing::ok(json!({"fine": true}))]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));

        let reply = service.authorized(Call::get("api/anything")).await;

        assert!(reply.is_ok());
        let calls = service.api().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].bearer.is_some());
    }

    #[tokio::test]
    async fn authorized_refreshes_and_retries_once_on_401() {
        let service = testing::service([
            testing::rejected(401, "token expired"),
            testing::ok(json!({"accessToken": "fresh-token"})),
            testing::ok(json!({"fine": true})),
        ]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(-600));
        service.vault().store(Key::RefreshToken, "r1".to_owned());

        let reply = service.authorized(Call::get("api/anything")).await;

        assert!(reply.is_ok());
        assert_eq!(
            service.api().paths(),
            ["api/anything", route::REFRESH_TOKEN, "api/anything"],
        );
        // The silent refresh persisted the new token.
        assert_eq!(
            service.vault().load(Key::AccessToken),
            Some("fresh-token".to_owned()),
        );
        // The retry carried the new token.
        let calls = service.api().calls();
        assert_eq!(
            calls[2].bearer.as_ref().map(ToString::to_string),
            Some("fresh-token".to_owned()),
        );
    }

    #[tokio::test]
    async fn authorized_never_retries_more_than_once() {
        let service = testing::service([
            testing::rejected(401, "token expired"),
            testing::ok(json!({"accessToken": "fresh-token"})),
            testing::rejected(401, "still expired"),
        ]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(-600));
        service.vault().store(Key::RefreshToken, "r1".to_owned());

        let result = service.authorized(Call::get("api/anything")).await;

        match result.unwrap_err().as_ref() {
            CallError::Rejected { status, .. } => assert_eq!(*status, 401),
            e @ (CallError::AuthenticationRequired | CallError::Api(_)) => {
                panic!("unexpected error: {e}")
            }
        }
        // One resource call, one refresh, one retry. Nothing more.
        assert_eq!(service.api().calls().len(), 3);
    }

    #[tokio::test]
    async fn authorized_refreshes_lazily_without_access_token() {
        let service = testing::service([
            testing::ok(json!({"accessToken": "fresh-token"})),
            testing::ok(json!({"fine": true})),
        ]);
        service.vault().store(Key::RefreshToken, "r1".to_owned());

        let reply = service.authorized(Call::get("api/anything")).await;

        assert!(reply.is_ok());
        assert_eq!(
            service.api().paths(),
            [route::REFRESH_TOKEN, "api/anything"],
        );
    }

    #[tokio::test]
    async fn authorized_requires_authentication_without_any_token() {
        let service = testing::service([]);

        let result = service.authorized(Call::get("api/anything")).await;

        assert!(matches!(
            result.unwrap_err().as_ref(),
            CallError::AuthenticationRequired,
        ));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn authorized_clears_session_on_terminal_refresh_failure() {
        let service = testing::service([
            testing::rejected(401, "token expired"),
            testing::rejected(401, "refresh token expired"),
        ]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(-600));
        service.vault().store(Key::RefreshToken, "r1".to_owned());
        service.vault().store(Key::User, "{}".to_owned());

        let result = service.authorized(Call::get("api/anything")).await;

        assert!(matches!(
            result.unwrap_err().as_ref(),
            CallError::AuthenticationRequired,
        ));
        assert_eq!(service.vault().load(Key::AccessToken), None);
        assert_eq!(service.vault().load(Key::RefreshToken), None);
        assert_eq!(service.vault().load(Key::User), None);
    }

    #[tokio::test]
    async fn authorized_returns_raw_reply_without_json_message() {
        let service = testing::service([testing::bare(502)]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));

        let reply = service.authorized(Call::get("api/anything")).await;

        // Only JSON-bearing errors convert into raised errors.
        let reply = reply.unwrap();
        assert_eq!(reply.status, 502);
        assert!(reply.body.is_none());
    }

    #[tokio::test]
    async fn refresh_failure_leaves_session_untouched() {
        let service = testing::service([testing::bare(503)]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));

        let refreshed = service
            .refresh_access_token(&RefreshToken::from("r1".to_owned()))
            .await;

        assert!(refreshed.is_none());
        assert!(service.vault().load(Key::AccessToken).is_some());
    }

    #[test]
    fn is_authenticated_with_valid_token() {
        let service = testing::service([]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));

        assert!(service.is_authenticated());
    }

    #[test]
    fn is_authenticated_false_when_expired_regardless_of_refresh_token() {
        let service = testing::service([]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(-600));
        service.vault().store(Key::RefreshToken, "r1".to_owned());

        assert!(!service.is_authenticated());
        // Refresh is lazy: the tokens stay for the next authenticated call.
        assert!(service.vault().load(Key::AccessToken).is_some());
        assert!(service.vault().load(Key::RefreshToken).is_some());
    }

    #[test]
    fn is_authenticated_clears_expired_session_without_refresh_token() {
        let service = testing::service([]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(-600));

        assert!(!service.is_authenticated());
        assert_eq!(service.vault().load(Key::AccessToken), None);
    }

    #[test]
    fn is_authenticated_clears_session_on_invalid_payload() {
        let service = testing::service([]);
        service
            .vault()
            .store(Key::AccessToken, "garbage".to_owned());
        service.vault().store(Key::RefreshToken, "r1".to_owned());

        assert!(!service.is_authenticated());
        assert_eq!(service.vault().load(Key::AccessToken), None);
        assert_eq!(service.vault().load(Key::RefreshToken), None);
    }

    #[test]
    fn has_permission_is_case_insensitive_and_denies_by_default() {
        let service = testing::service([]);
        service.vault().store(
            Key::User,
            serde_json::json!({
                "id": 7,
                "name": "a",
                "email": "a@b.com",
                "role": "DEVELOPER",
                "permissions": [{
                    "module": "Projects",
                    "canView": true,
                    "canCreate": false,
                    "canUpdate": false,
                    "canDelete": false,
                }],
            })
            .to_string(),
        );

        assert!(service.has_permission("PROJECTS", Action::View));
        assert!(service.has_permission("projects", Action::View));
        assert!(!service.has_permission("projects", Action::Create));
        assert!(!service.has_permission("tasks", Action::View));
    }

    #[test]
    fn has_permission_denies_without_session() {
        let service = testing::service([]);

        assert!(!service.has_permission("projects", Action::View));
    }

    #[test]
    fn clear_session_is_idempotent() {
        let vault = Memory::default();
        vault.store(Key::AccessToken, "t".to_owned());

        let service = crate::Service::new(testing::ScriptedApi::default(), vault);
        service.clear_session();
        service.clear_session();

        assert_eq!(service.vault().load(Key::AccessToken), None);
    }
}
