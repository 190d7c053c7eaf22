//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{
        AuthServiceError, Caller, CallerRole, DeviceId, hash_api_token,
        repository::PgAuthRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
            db,
        }
    }

    async fn resolve(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let token_hash = hash_api_token(bearer_token);

        let session = self
            .repository
            .find_active_session(&token_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let role = session
            .role
            .parse::<CallerRole>()
            .map_err(AuthServiceError::UnknownRole)?;

        let device = session.device_id.as_deref().and_then(DeviceId::new);

        if role == CallerRole::Guest && device.is_none() {
            return Err(AuthServiceError::MissingDevice);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(source) = self.repository.touch_session(&token_hash).await {
            debug!("failed to record session use: {source}");
        }

        Ok(Caller::new(session.account_uuid, role, device))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        self.db.within_deadline(self.resolve(bearer_token)).await
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the caller identity it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;
}
