//! Infrastructure layer.

pub mod api;
pub mod vault;

#[cfg(feature = "http")]
pub use self::api::Http;
pub use self::{api::Api, vault::Vault};
