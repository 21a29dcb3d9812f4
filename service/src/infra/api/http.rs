//! [`Http`] transport implementation.

use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::infra::api::{self, Api, Call, Method, Reply};

/// [`Api`] implementation speaking HTTP to the remote backend.
///
/// The backend origin is explicit configuration provided at construction,
/// never derived from the runtime environment.
#[derive(Clone, Debug)]
pub struct Http {
    /// Origin of the remote backend (scheme, host and port).
    base_url: String,

    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl Http {
    /// Creates a new [`Http`] transport targeting the provided origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the backend origin of this [`Http`] transport.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Api<Call> for Http {
    type Ok = Reply;
    type Err = Traced<api::Error>;

    async fn execute(&self, call: Call) -> Result<Self::Ok, Self::Err> {
        let url = format!("{}/{}", self.base_url, call.path);
        let mut request = match call.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(token) = &call.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        let status = response.status().as_u16();
        // A non-JSON body is not an error: the caller decides what a bodyless
        // `Reply` means for its operation.
        let body = response.json::<serde_json::Value>().await.ok();

        Ok(Reply { status, body })
    }
}

/// [`Http`] transport error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to exchange the request with the remote backend.
    #[display("request failed: {_0}")]
    Transport(reqwest::Error),
}
