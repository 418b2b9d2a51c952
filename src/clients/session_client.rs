use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Session, SessionCreate};
use crate::error::AuthError;

/// Client for the session store the access gate reads.
#[derive(Clone)]
pub struct SessionClient {
    inner: ResourceClient<Session>,
}

impl SessionClient {
    pub fn new(inner: ResourceClient<Session>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, token))]
    pub async fn get_session(&self, token: String) -> Result<Option<Session>, AuthError> {
        debug!("Sending request");
        self.inner.get(token).await.map_err(AuthError::ActorCommunicationError)
    }

    /// Mint a session and return its token. Used by seeding; real issuance
    /// belongs to the account service.
    #[instrument(skip(self, payload), fields(user_id = %payload.user_id))]
    pub async fn create_session(&self, payload: SessionCreate) -> Result<String, AuthError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(AuthError::ActorCommunicationError)
    }

    #[instrument(skip(self, token))]
    pub async fn revoke_session(&self, token: String) -> Result<(), AuthError> {
        debug!("Sending request");
        self.inner.delete(token).await.map_err(|_| AuthError::InvalidToken)
    }
}
