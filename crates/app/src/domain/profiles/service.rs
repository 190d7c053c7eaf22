//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Caller, CallerRole},
    database::Db,
    domain::profiles::{
        errors::ProfilesServiceError, records::Profile, repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgProfilesRepository::new(db.pool().clone()),
            db,
        }
    }

    async fn fetch(&self, caller: &Caller) -> Result<Profile, ProfilesServiceError> {
        let profile = match caller.role {
            CallerRole::Buyer => self.repository.get_buyer_profile(caller.uuid).await?,
            CallerRole::Guest => self.repository.get_guest_profile(caller.uuid).await?,
            CallerRole::Vendor | CallerRole::Admin => {
                return Err(ProfilesServiceError::Unauthorized);
            }
        };

        profile.ok_or(ProfilesServiceError::NotFound)
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_profile(&self, caller: &Caller) -> Result<Profile, ProfilesServiceError> {
        self.db.within_deadline(self.fetch(caller)).await
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// The caller's own delivery details, read from the buyer or guest table by role.
    async fn get_profile(&self, caller: &Caller) -> Result<Profile, ProfilesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{AccountUuid, DeviceId},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn buyers_and_guests_read_their_own_tables() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_buyer(&ctx, "Ada Buyer", "Lagos", "Ikeja").await?;
        let guest = helpers::create_guest(&ctx, "Gbenga Guest", "device-9", "Oyo", "Ibadan North")
            .await?;

        let buyer_profile = ctx.profiles.get_profile(&buyer).await?;
        let guest_profile = ctx.profiles.get_profile(&guest).await?;

        assert_eq!(buyer_profile.name, "Ada Buyer");
        assert_eq!(buyer_profile.region.lga(), "ikeja");
        assert_eq!(guest_profile.name, "Gbenga Guest");
        assert_eq!(guest_profile.region.state(), "oyo");

        Ok(())
    }

    #[tokio::test]
    async fn buyer_without_guest_row_is_not_found_as_guest() -> TestResult {
        let ctx = TestContext::new().await;

        let buyer = helpers::create_buyer(&ctx, "Ada Buyer", "Lagos", "Ikeja").await?;
        let as_guest = Caller::new(buyer.uuid, CallerRole::Guest, DeviceId::new("device-1"));

        let result = ctx.profiles.get_profile(&as_guest).await;

        assert!(
            matches!(result, Err(ProfilesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn operators_have_no_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = Caller::new(AccountUuid::new(), CallerRole::Admin, None);

        let result = ctx.profiles.get_profile(&admin).await;

        assert!(matches!(result, Err(ProfilesServiceError::Unauthorized)));

        Ok(())
    }
}
