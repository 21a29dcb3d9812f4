//! [`Api`]-related implementations.

#[cfg(feature = "http")]
pub mod http;
pub mod route;

use derive_more::{Display, Error as StdError, From};
use serde::de::DeserializeOwned;

use crate::domain::user::session::AccessToken;

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote backend executing [`Call`]s.
pub use common::Handler as Api;

/// HTTP method of a [`Call`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Method {
    /// `GET` method.
    #[display("GET")]
    Get,

    /// `POST` method.
    #[display("POST")]
    Post,

    /// `PATCH` method.
    #[display("PATCH")]
    Patch,

    /// `DELETE` method.
    #[display("DELETE")]
    Delete,
}

/// Single HTTP call to the remote backend.
#[derive(Clone, Debug)]
pub struct Call {
    /// [`Method`] of this [`Call`].
    pub method: Method,

    /// Resource path of this [`Call`], relative to the backend origin.
    pub path: String,

    /// Query parameters of this [`Call`].
    pub query: Vec<(&'static str, String)>,

    /// JSON body of this [`Call`].
    pub body: Option<serde_json::Value>,

    /// [`AccessToken`] attached to this [`Call`] as a bearer credential.
    pub bearer: Option<AccessToken>,
}

impl Call {
    /// Creates a new [`Call`] with the provided [`Method`] and path.
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    /// Creates a new `GET` [`Call`] of the provided path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a new `POST` [`Call`] of the provided path.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a new `PATCH` [`Call`] of the provided path.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Creates a new `DELETE` [`Call`] of the provided path.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches the provided query parameters to this [`Call`].
    #[must_use]
    pub fn with_query(
        mut self,
        query: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        self.query.extend(query);
        self
    }

    /// Attaches the provided JSON body to this [`Call`].
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches the provided [`AccessToken`] to this [`Call`].
    #[must_use]
    pub fn with_bearer(mut self, token: AccessToken) -> Self {
        self.bearer = Some(token);
        self
    }
}

/// Response of the remote backend to a [`Call`].
#[derive(Clone, Debug)]
pub struct Reply {
    /// HTTP status code of this [`Reply`].
    pub status: u16,

    /// JSON body of this [`Reply`], if it carried one.
    pub body: Option<serde_json::Value>,
}

impl Reply {
    /// Indicates whether this [`Reply`] carries a success status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Indicates whether this [`Reply`] carries a `401 Unauthorized` status.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Returns the server-provided error message of this [`Reply`], if its
    /// JSON body carries one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }

    /// Decodes the `result` of this [`Reply`]'s envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if this [`Reply`] carries no JSON envelope, or its
    /// `result` does not deserialize into `T`.
    pub fn result<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        use DecodeError as E;

        let body = self.body.as_ref().ok_or(E::NoBody)?;
        let result = body.get("result").ok_or(E::MissingResult)?;
        serde_json::from_value(result.clone()).map_err(E::Json)
    }
}

/// Error of decoding a [`Reply`] body.
#[derive(Debug, Display, StdError, From)]
pub enum DecodeError {
    /// [`Reply`] body is missing or is not JSON.
    #[display("response body is missing or is not JSON")]
    NoBody,

    /// [`Reply`] envelope carries no `result`.
    #[display("response envelope carries no `result`")]
    MissingResult,

    /// `result` of the [`Reply`] envelope failed to deserialize.
    #[display("failed to deserialize the `result`: {_0}")]
    Json(serde_json::Error),
}

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] transport error.
    Http(http::Error),
}
