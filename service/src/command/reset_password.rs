//! [`Command`] for resetting a forgotten password.

use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::user,
    infra::{
        api::{self, route, Api, Call, Reply},
        vault::{Key, Vault},
    },
    Service,
};

use super::Command;

/// [`Command`] for resetting a forgotten password.
///
/// Consumes the reset token persisted by [`VerifyOtp`]; fails without a
/// network call when none is stored. The token is cleared once the backend
/// accepts the new password.
///
/// [`VerifyOtp`]: super::VerifyOtp
#[derive(Clone, Debug)]
pub struct ResetPassword {
    /// New [`user::Password`] to set.
    pub new_password: SecretBox<user::Password>,
}

impl<A, V> Command<ResetPassword> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ResetPassword,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ResetPassword { new_password } = cmd;

        let Some(token) = self.vault().load(Key::ResetToken) else {
            return Err(tracerr::new!(E::NoResetToken));
        };

        let reply = self
            .api()
            .execute(Call::post(route::RESET_PASSWORD).with_body(
                serde_json::json!({
                    "token": token,
                    "newPassword": new_password.expose_secret().as_str(),
                }),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if !reply.is_success() {
            return Err(tracerr::new!(E::Rejected {
                status: reply.status,
                message: reply
                    .message()
                    .unwrap_or("password reset failed")
                    .to_owned(),
            }));
        }

        self.vault().remove(Key::ResetToken);

        Ok(())
    }
}

/// Error of [`ResetPassword`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// No reset token is stored.
    ///
    /// The password-recovery flow has to be restarted.
    #[display("no reset token is stored")]
    #[from(ignore)]
    NoResetToken,

    /// Remote backend operation failed.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Backend rejected the new password.
    #[display("password reset rejected ({status}): {message}")]
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
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        command::Command as _,
        domain::user,
        infra::vault::{Key, Vault as _},
        testing,
    };

    use super::{ExecutionError, ResetPassword};

    fn reset() -> ResetPassword {
        ResetPassword {
            new_password: SecretBox::new(Box::new(
                user::Password::new("replacement1").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn fails_without_stored_token_and_without_a_call() {
        let service = testing::service([]);

        let result = service.execute(reset()).await;

        assert!(matches!(
            result.unwrap_err().as_ref(),
            ExecutionError::NoResetToken,
        ));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn consumes_the_stored_token() {
        let service = testing::service([testing::ok(json!(true))]);
        service.vault().store(Key::ResetToken, "reset-1".to_owned());

        service.execute(reset()).await.unwrap();

        assert_eq!(service.vault().load(Key::ResetToken), None);
        let calls = service.api().calls();
        assert_eq!(
            calls[0].body.as_ref().and_then(|b| b.get("token")),
            Some(&json!("reset-1")),
        );
    }

    #[tokio::test]
    async fn keeps_the_token_on_rejection() {
        let service = testing::service([testing::rejected(400, "too weak")]);
        service.vault().store(Key::ResetToken, "reset-1".to_owned());

        assert!(service.execute(reset()).await.is_err());
        assert_eq!(
            service.vault().load(Key::ResetToken),
            Some("reset-1".to_owned()),
        );
    }
}
