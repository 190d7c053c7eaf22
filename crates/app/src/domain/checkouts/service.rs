//! Checkouts service.

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    auth::Caller,
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        checkouts::{
            data::{CheckoutRequest, NewCheckout, Recipient},
            errors::CheckoutsServiceError,
            policy,
            reconcile::reconcile,
            records::{CheckoutItem, CheckoutRecord, CheckoutStatus, CheckoutUuid, ShippingInfo},
            repository::PgCheckoutsRepository,
        },
        fees::{records::FeeType, repository::PgFeesRepository},
        profiles::ProfilesService,
    },
};

#[derive(Clone)]
pub struct PgCheckoutsService {
    db: Db,
    profiles: Arc<dyn ProfilesService>,
    repository: PgCheckoutsRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    fees_repository: PgFeesRepository,
}

impl Debug for PgCheckoutsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgCheckoutsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgCheckoutsService {
    #[must_use]
    pub fn new(db: Db, profiles: Arc<dyn ProfilesService>) -> Self {
        Self {
            db,
            profiles,
            repository: PgCheckoutsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            fees_repository: PgFeesRepository::new(),
        }
    }

    async fn shipping_for(
        &self,
        caller: &Caller,
        recipient: &Recipient,
    ) -> Result<ShippingInfo, CheckoutsServiceError> {
        match recipient {
            Recipient::Myself => {
                let profile = self.profiles.get_profile(caller).await?;

                ShippingInfo::new(
                    &profile.name,
                    &profile.phone,
                    &profile.email,
                    &profile.address,
                    profile.region,
                )
            }
            Recipient::Other(details) => ShippingInfo::new(
                &details.name,
                &details.phone,
                &details.email,
                &details.address,
                details.region.clone(),
            ),
        }
    }

    async fn place(
        &self,
        caller: Caller,
        request: CheckoutRequest,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let owner = caller
            .owner_key()
            .ok_or(CheckoutsServiceError::Unauthorized)?;

        // Resolved before the transaction opens; the profile read takes its
        // own pool connection.
        let shipping = self.shipping_for(&caller, &request.recipient).await?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, &owner)
            .await?
            .ok_or(CheckoutsServiceError::NoActiveCart)?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if items.is_empty() {
            return Err(CheckoutsServiceError::InvalidRequest(
                "cart has no items".to_string(),
            ));
        }

        let ledger = self
            .fees_repository
            .list_active_fees_by_region(
                &mut tx,
                &shipping.region,
                &[FeeType::Delivery, FeeType::Service],
            )
            .await?;

        let reconciled = reconcile(cart.total, &request, &ledger)?;

        let checkout = self
            .repository
            .create_checkout(
                &mut tx,
                &NewCheckout {
                    uuid: CheckoutUuid::new(),
                    customer_uuid: caller.uuid,
                    cart_uuid: cart.uuid,
                    items: items.into_iter().map(CheckoutItem::from).collect(),
                    cart_total: cart.total,
                    shipping,
                    payment_method: request.payment_method,
                    amount_paid: request.amount_paid,
                    delivery_fee: reconciled.delivery_fee,
                    service_fee: reconciled.service_fee,
                    total: reconciled.total,
                },
            )
            .await?;

        let closed = self
            .carts_repository
            .inactivate_cart(&mut tx, cart.uuid)
            .await?;

        if closed == 0 {
            warn!(cart = %cart.uuid, checkout = %checkout.uuid, "cart changed during checkout");

            return Err(CheckoutsServiceError::CartNotClosed);
        }

        tx.commit().await?;

        Ok(checkout)
    }

    async fn transition(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
        status: String,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let target = status.parse::<CheckoutStatus>()?;

        policy::authorize_status(caller.role, target)?;

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_checkout(&mut tx, checkout)
            .await?
            .ok_or(CheckoutsServiceError::NotFound)?;

        policy::authorize_owner(&caller, &current)?;
        policy::authorize_transition(current.status, target)?;

        let updated = self
            .repository
            .update_checkout_status(&mut tx, checkout, target)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn list(&self, caller: Caller) -> Result<Vec<CheckoutRecord>, CheckoutsServiceError> {
        let customer = (!caller.role.is_operator()).then_some(caller.uuid);

        let mut tx = self.db.begin().await?;

        let checkouts = self.repository.list_checkouts(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(checkouts)
    }

    async fn find(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_checkout(&mut tx, checkout).await?;

        tx.commit().await?;

        record
            .filter(|record| policy::can_view(&caller, record))
            .ok_or(CheckoutsServiceError::NotFound)
    }
}

#[async_trait]
impl CheckoutsService for PgCheckoutsService {
    async fn checkout(
        &self,
        caller: Caller,
        request: CheckoutRequest,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        self.db.within_deadline(self.place(caller, request)).await
    }

    async fn update_checkout(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
        status: String,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        self.db
            .within_deadline(self.transition(caller, checkout, status))
            .await
    }

    async fn list_checkouts(
        &self,
        caller: Caller,
    ) -> Result<Vec<CheckoutRecord>, CheckoutsServiceError> {
        self.db.within_deadline(self.list(caller)).await
    }

    async fn get_checkout(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError> {
        self.db.within_deadline(self.find(caller, checkout)).await
    }
}

#[automock]
#[async_trait]
pub trait CheckoutsService: Send + Sync {
    /// Turn the caller's active cart into a pending order and close the cart.
    async fn checkout(
        &self,
        caller: Caller,
        request: CheckoutRequest,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;

    /// Move an order to `status` if the caller's role and ownership allow it.
    async fn update_checkout(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
        status: String,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;

    /// Orders visible to the caller, newest first.
    async fn list_checkouts(
        &self,
        caller: Caller,
    ) -> Result<Vec<CheckoutRecord>, CheckoutsServiceError>;

    async fn get_checkout(
        &self,
        caller: Caller,
        checkout: CheckoutUuid,
    ) -> Result<CheckoutRecord, CheckoutsServiceError>;
}
