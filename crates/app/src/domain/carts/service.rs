//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    auth::OwnerKey,
    database::Db,
    domain::{
        carts::{
            data::{CostBasis, NewCartItem, positive_quantity},
            errors::CartsServiceError,
            pricing::item_cost,
            records::{CartItemUuid, CartRecord, CartStatus, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        fees::{data::FeeScope, repository::PgFeesRepository},
        references::ProductUuid,
        regions::Region,
    },
    money::Money,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    fees_repository: PgFeesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            fees_repository: PgFeesRepository::new(),
        }
    }

    /// Price `basis` against the product's active fee in `region`.
    async fn price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        region: &Region,
        basis: CostBasis,
    ) -> Result<Money, CartsServiceError> {
        let scope = FeeScope::product(product, region.clone());

        let fee = self
            .fees_repository
            .find_active_fee(tx, &scope)
            .await?
            .ok_or_else(|| CartsServiceError::FeeNotFound(scope.to_string()))?;

        Ok(item_cost(&fee.rates, basis)?)
    }

    /// Recompute the total of a locked cart and attach its items.
    async fn refresh(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut refreshed = self.carts_repository.refresh_total(tx, cart).await?;

        refreshed.items = self.items_repository.get_cart_items(tx, cart).await?;

        Ok(refreshed)
    }

    async fn add(
        &self,
        owner: OwnerKey,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .carts_repository
            .ensure_active_cart(&mut tx, &owner, CartUuid::new())
            .await?;

        if created > 0 {
            debug!(%owner, "opened a new cart");
        }

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, &owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cost = self
            .price(&mut tx, item.product_uuid, &item.region, item.basis)
            .await?;

        self.items_repository
            .create_cart_item(&mut tx, cart.uuid, &item, cost)
            .await?;

        let cart = self.refresh(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn set_quantity(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError> {
        let quantity = positive_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, &owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let current = self
            .items_repository
            .lock_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        if current.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        if current.weight.is_some() {
            return Err(CartsServiceError::WeightPriced);
        }

        let cost = self
            .price(
                &mut tx,
                current.product_uuid,
                &current.region,
                CostBasis::Quantity(quantity),
            )
            .await?;

        self.items_repository
            .update_cart_item_quantity(&mut tx, cart.uuid, item, quantity, cost)
            .await?;

        let cart = self.refresh(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_active_cart(&mut tx, &owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let cart = self.refresh(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn active(&self, owner: OwnerKey) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .find_active_cart(&mut tx, &owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn deactivate(&self, owner: OwnerKey, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .carts_repository
            .lock_cart(&mut tx, &owner, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if current.status == CartStatus::Active {
            self.carts_repository.inactivate_cart(&mut tx, cart).await?;
        } else {
            debug!(%cart, "cart already inactive");
        }

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        owner: OwnerKey,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        self.db.within_deadline(self.add(owner, item)).await
    }

    async fn update_item_quantity(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError> {
        self.db
            .within_deadline(self.set_quantity(owner, item, quantity))
            .await
    }

    async fn delete_item(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.db.within_deadline(self.remove(owner, item)).await
    }

    async fn get_active_cart(&self, owner: OwnerKey) -> Result<CartRecord, CartsServiceError> {
        self.db.within_deadline(self.active(owner)).await
    }

    async fn inactivate(&self, owner: OwnerKey, cart: CartUuid) -> Result<(), CartsServiceError> {
        self.db.within_deadline(self.deactivate(owner, cart)).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Price and append an item, opening a cart for `owner` when none is active.
    async fn add_item(
        &self,
        owner: OwnerKey,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Change the quantity of a unit-priced item in the owner's active cart.
    async fn update_item_quantity(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove an item; an emptied cart stays active with a zero total.
    async fn delete_item(
        &self,
        owner: OwnerKey,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// The owner's active cart with its items.
    async fn get_active_cart(&self, owner: OwnerKey) -> Result<CartRecord, CartsServiceError>;

    /// Mark one of the owner's carts inactive. Inactive carts are left untouched.
    async fn inactivate(&self, owner: OwnerKey, cart: CartUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{AccountUuid, DeviceId},
        money::Weight,
        test::{TestContext, helpers},
    };

    use super::*;

    fn lagos() -> TestResult<Region> {
        Ok(Region::new("Lagos", "Ikeja")?)
    }

    #[tokio::test]
    async fn adding_first_item_opens_cart_with_item_cost_as_total() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 40_000, 0).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());

        let cart = ctx
            .carts
            .add_item(
                owner.clone(),
                helpers::new_item(
                    product,
                    &region,
                    CostBasis::Weight(Weight::from_kilograms(12.5)?),
                ),
            )
            .await?;

        assert_eq!(cart.owner, owner);
        assert_eq!(cart.status, CartStatus::Active);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Money::from_minor(500_000));

        Ok(())
    }

    #[tokio::test]
    async fn total_tracks_every_mutation() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 250_000).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());

        let first = helpers::new_item(product, &region, CostBasis::Quantity(1));
        let second = helpers::new_item(product, &region, CostBasis::Quantity(2));

        ctx.carts.add_item(owner.clone(), first.clone()).await?;
        let cart = ctx.carts.add_item(owner.clone(), second).await?;

        assert_eq!(cart.total, Money::from_minor(750_000));
        helpers::assert_total_matches_items(&cart);

        let cart = ctx
            .carts
            .update_item_quantity(owner.clone(), first.uuid, 3)
            .await?;

        assert_eq!(cart.total, Money::from_minor(1_250_000));
        helpers::assert_total_matches_items(&cart);

        let cart = ctx.carts.delete_item(owner, first.uuid).await?;

        assert_eq!(cart.total, Money::from_minor(500_000));
        helpers::assert_total_matches_items(&cart);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_last_item_keeps_an_empty_active_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 100_000).await?;
        let owner = DeviceId::new("tablet-3").map(OwnerKey::Device).ok_or("device")?;
        let item = helpers::new_item(product, &region, CostBasis::Quantity(1));

        ctx.carts.add_item(owner.clone(), item.clone()).await?;
        let cart = ctx.carts.delete_item(owner.clone(), item.uuid).await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Money::ZERO);
        assert_eq!(cart.status, CartStatus::Active);

        let active = ctx.carts.get_active_cart(owner).await?;

        assert_eq!(active.uuid, cart.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_fee_adds_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let owner = OwnerKey::Customer(AccountUuid::new());

        let result = ctx
            .carts
            .add_item(
                owner.clone(),
                helpers::new_item(ProductUuid::new(), &region, CostBasis::Quantity(1)),
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::FeeNotFound(_))),
            "expected FeeNotFound, got {result:?}"
        );

        let cart = ctx.carts.get_active_cart(owner).await;

        assert!(
            matches!(cart, Err(CartsServiceError::NotFound)),
            "no cart should be opened, got {cart:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 100_000).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());
        let item = helpers::new_item(product, &region, CostBasis::Quantity(2));

        ctx.carts.add_item(owner.clone(), item.clone()).await?;

        for quantity in [0, -4] {
            let result = ctx
                .carts
                .update_item_quantity(owner.clone(), item.uuid, quantity)
                .await;

            assert!(
                matches!(result, Err(CartsServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {quantity}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn weight_priced_quantity_cannot_change() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 40_000, 0).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());
        let item = helpers::new_item(
            product,
            &region,
            CostBasis::Weight(Weight::from_kilograms(6.0)?),
        );

        ctx.carts.add_item(owner.clone(), item.clone()).await?;

        let result = ctx.carts.update_item_quantity(owner, item.uuid, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::WeightPriced)),
            "expected WeightPriced, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_owners_cannot_touch_a_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 100_000).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());
        let intruder = OwnerKey::Customer(AccountUuid::new());
        let item = helpers::new_item(product, &region, CostBasis::Quantity(1));

        let cart = ctx.carts.add_item(owner, item.clone()).await?;

        let inactivated = ctx.carts.inactivate(intruder.clone(), cart.uuid).await;
        let deleted = ctx.carts.delete_item(intruder, item.uuid).await;

        assert!(matches!(inactivated, Err(CartsServiceError::NotFound)));
        assert!(matches!(deleted, Err(CartsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn inactivation_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 100_000).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());

        let cart = ctx
            .carts
            .add_item(
                owner.clone(),
                helpers::new_item(product, &region, CostBasis::Quantity(1)),
            )
            .await?;

        ctx.carts.inactivate(owner.clone(), cart.uuid).await?;
        ctx.carts.inactivate(owner.clone(), cart.uuid).await?;

        let active = ctx.carts.get_active_cart(owner.clone()).await;

        assert!(matches!(active, Err(CartsServiceError::NotFound)));

        let reopened = ctx
            .carts
            .add_item(
                owner,
                helpers::new_item(product, &region, CostBasis::Quantity(1)),
            )
            .await?;

        assert_ne!(reopened.uuid, cart.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_additions_keep_total_consistent() -> TestResult {
        let ctx = TestContext::new().await;
        let region = lagos()?;
        let product = helpers::quote_product_fee(&ctx, &region, 0, 100_000).await?;
        let owner = OwnerKey::Customer(AccountUuid::new());

        ctx.carts
            .add_item(
                owner.clone(),
                helpers::new_item(product, &region, CostBasis::Quantity(1)),
            )
            .await?;

        let (first, second, third) = tokio::join!(
            ctx.carts.add_item(
                owner.clone(),
                helpers::new_item(product, &region, CostBasis::Quantity(1)),
            ),
            ctx.carts.add_item(
                owner.clone(),
                helpers::new_item(product, &region, CostBasis::Quantity(2)),
            ),
            ctx.carts.add_item(
                owner.clone(),
                helpers::new_item(product, &region, CostBasis::Quantity(3)),
            ),
        );

        first?;
        second?;
        third?;

        let cart = ctx.carts.get_active_cart(owner).await?;

        assert_eq!(cart.items.len(), 4);
        assert_eq!(cart.total, Money::from_minor(700_000));
        helpers::assert_total_matches_items(&cart);

        Ok(())
    }
}
