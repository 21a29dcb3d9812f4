//! [`Command`] for destroying the current session.

use std::convert::Infallible;

use tracing as log;

use crate::{
    domain::user::session::AccessToken,
    infra::{
        api::{self, route, Api, Call, Reply},
        vault::{Key, Vault},
    },
    Service,
};

use super::Command;

/// [`Command`] for destroying the current session.
///
/// The stored session is cleared unconditionally, regardless of the
/// outcome of the best-effort server notification. Idempotent: destroying
/// an absent session is a no-op besides the clear.
#[derive(Clone, Copy, Debug, Default)]
pub struct DestroySession;

impl<A, V> Command<DestroySession> for Service<A, V>
where
    A: Api<Call, Ok = Reply, Err = tracerr::Traced<api::Error>>,
    V: Vault,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: DestroySession) -> Result<(), Self::Err> {
        if let Some(token) = self.vault().load(Key::AccessToken) {
            let call = Call::post(route::LOGOUT)
                .with_bearer(AccessToken::from(token));
            if let Err(e) = self.api().execute(call).await {
                log::debug!("logout notification failed: {e}");
            }
        }

        self.clear_session();

        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        infra::vault::{Key, Vault as _},
        testing,
    };

    use super::DestroySession;

    #[tokio::test]
    async fn clears_session_despite_failed_notification() {
        let service = testing::service([testing::bare(503)]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));
        service.vault().store(Key::RefreshToken, "r1".to_owned());
        service.vault().store(Key::User, "{}".to_owned());

        service.execute(DestroySession).await.unwrap();

        assert_eq!(service.vault().load(Key::AccessToken), None);
        assert_eq!(service.vault().load(Key::RefreshToken), None);
        assert_eq!(service.vault().load(Key::User), None);
    }

    #[tokio::test]
    async fn is_idempotent() {
        let service = testing::service([testing::bare(200)]);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));

        service.execute(DestroySession).await.unwrap();
        // The second destroy has no token to notify with and nothing to
        // clear.
        service.execute(DestroySession).await.unwrap();

        assert_eq!(service.api().calls().len(), 1);
        assert_eq!(service.vault().load(Key::AccessToken), None);
    }
}
