//! [`Query`] definition.

pub mod project;
pub mod projects;
pub mod tasks;
pub mod team;

use derive_more::{Display, Error as StdError, From};

use crate::{infra::api, CallError};

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

/// Error of a [`Query`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Authenticated call failed.
    #[display("authenticated call failed: {_0}")]
    Call(CallError),

    /// Backend reply failed to decode.
    #[display("failed to decode the reply: {_0}")]
    Decode(api::DecodeError),
}
