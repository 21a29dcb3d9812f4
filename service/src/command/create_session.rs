//! [`Command`] for creating a session.

use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::{
        user::{
            self,
            session::{self, AccessToken, RefreshToken},
        },
        User,
    },
    infra::{
        api::{self, route, Api, Call, Reply},
        vault::{Key, Vault},
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a session by [`User`] credentials.
///
/// On success the issued token pair and the [`User`] decoded from the
/// access token's claims replace any previously stored session.
#[derive(Clone, Debug)]
pub struct CreateSession {
    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

impl<A, V> Command<CreateSession> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateSession { email, password } = cmd;

        let reply = self
            .api()
            .execute(Call::post(route::LOGIN).with_body(serde_json::json!({
                "email": email,
                "password": password.expose_secret().as_str(),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if !reply.is_success() {
            return Err(tracerr::new!(E::Rejected {
                status: reply.status,
                message: reply
                    .message()
                    .unwrap_or("wrong credentials")
                    .to_owned(),
            }));
        }

        let Tokens {
            access_token,
            refresh_token,
        } = reply.result().map_err(tracerr::from_and_wrap!(=> E))?;
        let claims = session::decode(&access_token)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let user = claims
            .into_user()
            .ok_or_else(|| tracerr::new!(E::MissingIdentity))?;
        let encoded_user = serde_json::to_string(&user)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        // The stored session mutates only once the response proved valid.
        self.clear_session();
        self.vault().store(
            Key::AccessToken,
            AsRef::<str>::as_ref(&access_token).to_owned(),
        );
        self.vault().store(
            Key::RefreshToken,
            AsRef::<str>::as_ref(&refresh_token).to_owned(),
        );
        self.vault().store(Key::User, encoded_user);

        Ok(user)
    }
}

/// Token pair issued by the login endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tokens {
    /// Issued [`AccessToken`].
    access_token: AccessToken,

    /// Issued [`RefreshToken`].
    refresh_token: RefreshToken,
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Remote backend operation failed.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Backend rejected the credentials.
    #[display("login rejected ({status}): {message}")]
    #[from(ignore)]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,

        /// Server-provided error message.
        message: String,
    },

    /// Login response carries no usable token pair.
    #[display("malformed login response: {_0}")]
    MalformedResponse(api::DecodeError),

    /// Issued access token failed to decode.
    #[display("invalid access token: {_0}")]
    InvalidToken(session::DecodeError),

    /// Access token claims carry no usable [`User`] identity.
    #[display("access token claims carry no user identity")]
    #[from(ignore)]
    MissingIdentity,

    /// [`User`] failed to encode for storing.
    #[display("failed to encode the `User`: {_0}")]
    EncodeUser(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        command::Command as _,
        domain::user::{self, Action, Role},
        infra::vault::{Key, Vault as _},
        testing,
    };

    use super::CreateSession;

    fn credentials() -> CreateSession {
        CreateSession {
            email: user::Email::new("a@b.com").unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new("validpass1").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn login_populates_session_from_claims() {
        let service = testing::service([testing::ok(json!({
            "accessToken": testing::access_token(600),
            "refreshToken": "r1",
        }))]);

        let user = service.execute(credentials()).await.unwrap();

        assert_eq!(user.id, 7.into());
        assert_eq!(user.role, Role::Developer);
        assert!(service.is_authenticated());
        assert_eq!(
            service.vault().load(Key::RefreshToken),
            Some("r1".to_owned()),
        );
        // Permissions reflect the decoded claims.
        assert!(service.has_permission("projects", Action::View));
        assert!(!service.has_permission("projects", Action::Delete));
    }

    #[tokio::test]
    async fn rejected_login_leaves_no_session() {
        let service =
            testing::service([testing::rejected(401, "wrong credentials")]);

        assert!(service.execute(credentials()).await.is_err());
        assert!(!service.is_authenticated());
        assert_eq!(service.vault().load(Key::AccessToken), None);
    }

    #[tokio::test]
    async fn malformed_login_response_mutates_nothing() {
        let service = testing::service([testing::ok(json!({
            "unexpected": "shape",
        }))]);
        service.vault().store(Key::AccessToken, "prior".to_owned());

        assert!(service.execute(credentials()).await.is_err());
        // The prior session survives a malformed response.
        assert_eq!(
            service.vault().load(Key::AccessToken),
            Some("prior".to_owned()),
        );
    }
}
