//! [`Command`] for verifying a password-recovery OTP.

use std::str::FromStr;

use derive_more::{AsRef, Display, Error, From};
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

/// [`Command`] for verifying a password-recovery [`Otp`].
///
/// On success the backend issues a short-lived reset token, persisted under
/// [`Key::ResetToken`] until [`ResetPassword`] consumes it.
///
/// [`ResetPassword`]: super::ResetPassword
#[derive(Clone, Debug)]
pub struct VerifyOtp {
    /// [`user::Email`] the OTP was sent to.
    pub email: user::Email,

    /// [`Otp`] to verify.
    pub otp: Otp,
}

/// One-time password of the password-recovery flow.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Otp(String);

impl Otp {
    /// Creates a new [`Otp`] if the given `otp` is valid.
    #[must_use]
    pub fn new(otp: impl Into<String>) -> Option<Self> {
        let otp = otp.into();
        Self::check(&otp).then_some(Self(otp))
    }

    /// Checks whether the given `otp` is a valid [`Otp`].
    fn check(otp: impl AsRef<str>) -> bool {
        let otp = otp.as_ref();
        (4..=8).contains(&otp.len()) && otp.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for Otp {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Otp`")
    }
}

impl<A, V> Command<VerifyOtp> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: VerifyOtp) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let VerifyOtp { email, otp } = cmd;

        let reply = self
            .api()
            .execute(Call::post(route::VERIFY_OTP).with_body(
                serde_json::json!({"email": email, "otp": AsRef::<str>::as_ref(&otp)}),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if !reply.is_success() {
            return Err(tracerr::new!(E::Rejected {
                status: reply.status,
                message: reply
                    .message()
                    .unwrap_or("OTP verification failed")
                    .to_owned(),
            }));
        }

        // The reset token travels as a raw string in `result`.
        let token: String =
            reply.result().map_err(tracerr::from_and_wrap!(=> E))?;
        if token.is_empty() {
            return Err(tracerr::new!(E::MissingResetToken));
        }
        self.vault().store(Key::ResetToken, token);

        Ok(())
    }
}

/// Error of [`VerifyOtp`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Remote backend operation failed.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Backend rejected the OTP.
    #[display("OTP verification rejected ({status}): {message}")]
    #[from(ignore)]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,

        /// Server-provided error message.
        message: String,
    },

    /// Verification response carries no reset token.
    #[display("malformed OTP verification response: {_0}")]
    MalformedResponse(api::DecodeError),

    /// Verification response carries an empty reset token.
    #[display("OTP verification response carries no reset token")]
    #[from(ignore)]
    MissingResetToken,
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        command::Command as _,
        domain::user,
        infra::vault::{Key, Vault as _},
        testing,
    };

    use super::{Otp, VerifyOtp};

    #[test]
    fn otp_check() {
        assert!(Otp::new("123456").is_some());
        assert!(Otp::new("1234").is_some());

        assert!(Otp::new("123").is_none());
        assert!(Otp::new("123456789").is_none());
        assert!(Otp::new("12a456").is_none());
    }

    #[tokio::test]
    async fn persists_the_issued_reset_token() {
        let service = testing::service([testing::ok(json!("reset-1"))]);

        service
            .execute(VerifyOtp {
                email: user::Email::new("a@b.com").unwrap(),
                otp: Otp::new("123456").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(
            service.vault().load(Key::ResetToken),
            Some("reset-1".to_owned()),
        );
    }
}
