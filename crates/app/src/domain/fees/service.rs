//! Fees service.

use async_trait::async_trait;
use mockall::automock;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        fees::{
            data::{FeeScope, NewFeeQuote},
            errors::FeesServiceError,
            records::{FeeRecord, FeeType},
            repository::PgFeesRepository,
        },
        regions::Region,
    },
};

/// Fee types a checkout reconciles against.
pub type FeeTypes = SmallVec<[FeeType; 3]>;

#[derive(Debug, Clone)]
pub struct PgFeesService {
    db: Db,
    repository: PgFeesRepository,
}

impl PgFeesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFeesRepository::new(),
        }
    }

    async fn supersede(&self, quote: NewFeeQuote) -> Result<FeeRecord, FeesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_scope(&mut tx, &quote.scope).await?;

        if let Some(current) = self
            .repository
            .lock_active_fee(&mut tx, &quote.scope)
            .await?
        {
            self.repository.inactivate_fee(&mut tx, current.uuid).await?;

            debug!(
                fee = %current.uuid,
                replacement = %quote.uuid,
                scope = %quote.scope,
                "superseding active fee"
            );
        }

        let created = self.repository.create_fee(&mut tx, &quote).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find(&self, scope: &FeeScope) -> Result<FeeRecord, FeesServiceError> {
        let mut tx = self.db.begin().await?;

        let fee = self.repository.find_active_fee(&mut tx, scope).await?;

        tx.commit().await?;

        fee.ok_or_else(|| FeesServiceError::FeeNotFound(scope.to_string()))
    }

    async fn list_for_region(
        &self,
        region: &Region,
        fee_types: &[FeeType],
    ) -> Result<Vec<FeeRecord>, FeesServiceError> {
        let mut tx = self.db.begin().await?;

        let fees = self
            .repository
            .list_active_fees_by_region(&mut tx, region, fee_types)
            .await?;

        tx.commit().await?;

        Ok(fees)
    }

    async fn list(&self, region: Option<&Region>) -> Result<Vec<FeeRecord>, FeesServiceError> {
        let mut tx = self.db.begin().await?;

        let fees = self.repository.list_active_fees(&mut tx, region).await?;

        tx.commit().await?;

        Ok(fees)
    }
}

#[async_trait]
impl FeesService for PgFeesService {
    async fn quote(&self, quote: NewFeeQuote) -> Result<FeeRecord, FeesServiceError> {
        self.db.within_deadline(self.supersede(quote)).await
    }

    async fn lookup(&self, scope: &FeeScope) -> Result<FeeRecord, FeesServiceError> {
        self.db.within_deadline(self.find(scope)).await
    }

    async fn list_active_by_region(
        &self,
        region: &Region,
        fee_types: FeeTypes,
    ) -> Result<Vec<FeeRecord>, FeesServiceError> {
        self.db
            .within_deadline(self.list_for_region(region, &fee_types))
            .await
    }

    async fn list_active(
        &self,
        region: Option<Region>,
    ) -> Result<Vec<FeeRecord>, FeesServiceError> {
        self.db.within_deadline(self.list(region.as_ref())).await
    }
}

#[automock]
#[async_trait]
pub trait FeesService: Send + Sync {
    /// Record a new quotation, inactivating the scope's current fee in the same transaction.
    async fn quote(&self, quote: NewFeeQuote) -> Result<FeeRecord, FeesServiceError>;

    /// The single active fee for `scope`.
    async fn lookup(&self, scope: &FeeScope) -> Result<FeeRecord, FeesServiceError>;

    /// Active fees in `region` whose type is one of `fee_types`.
    async fn list_active_by_region(
        &self,
        region: &Region,
        fee_types: FeeTypes,
    ) -> Result<Vec<FeeRecord>, FeesServiceError>;

    /// Every active fee, optionally restricted to one region.
    async fn list_active(
        &self,
        region: Option<Region>,
    ) -> Result<Vec<FeeRecord>, FeesServiceError>;
}
