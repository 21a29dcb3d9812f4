//! [`Command`] for sending a password-recovery OTP.

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user,
    infra::api::{self, route, Api, Call, Reply},
    Service,
};

use super::Command;

/// [`Command`] for sending (or resending) a password-recovery OTP to the
/// provided [`user::Email`].
#[derive(Clone, Debug)]
pub struct SendOtp {
    /// [`user::Email`] to send the OTP to.
    pub email: user::Email,
}

impl<A, V> Command<SendOtp> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendOtp) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendOtp { email } = cmd;

        let reply = self
            .api()
            .execute(
                Call::post(route::SEND_OTP)
                    .with_body(serde_json::json!({"email": email})),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if !reply.is_success() {
            return Err(tracerr::new!(E::Rejected {
                status: reply.status,
                message: reply
                    .message()
                    .unwrap_or("failed to send the OTP")
                    .to_owned(),
            }));
        }

        Ok(())
    }
}

/// Error of [`SendOtp`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Remote backend operation failed.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Backend rejected the request.
    #[display("sending the OTP rejected ({status}): {message}")]
    #[from(ignore)]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,

        /// Server-provided error message.
        message: String,
    },
}
