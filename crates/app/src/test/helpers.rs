//! Test Helpers

use sqlx::query;

use crate::{
    auth::{AccountUuid, Caller, CallerRole, DeviceId},
    domain::{
        carts::{
            data::{CostBasis, NewCartItem},
            records::{CartItemUuid, CartRecord},
        },
        fees::{
            FeesService, FeesServiceError,
            data::{FeeScope, NewFeeQuote},
            records::{FeeRates, FeeType, FeeUuid},
        },
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::Money,
    test::TestContext,
};

/// Quote a product fee for a fresh product and return the product.
pub(crate) async fn quote_product_fee(
    ctx: &TestContext,
    region: &Region,
    cost_per_kg: u64,
    cost_per_qty: u64,
) -> Result<ProductUuid, FeesServiceError> {
    let product = ProductUuid::new();

    ctx.fees
        .quote(NewFeeQuote {
            uuid: FeeUuid::new(),
            scope: FeeScope::product(product, region.clone()),
            rates: FeeRates {
                cost_per_kg: Money::from_minor(cost_per_kg),
                cost_per_qty: Money::from_minor(cost_per_qty),
                amount: Money::ZERO,
            },
        })
        .await?;

    Ok(product)
}

/// Quote delivery and service fees for `region`.
pub(crate) async fn quote_regional_fees(
    ctx: &TestContext,
    region: &Region,
    delivery: u64,
    service: u64,
) -> Result<(), FeesServiceError> {
    for (fee_type, amount) in [(FeeType::Delivery, delivery), (FeeType::Service, service)] {
        ctx.fees
            .quote(NewFeeQuote {
                uuid: FeeUuid::new(),
                scope: FeeScope::regional(fee_type, region.clone())?,
                rates: FeeRates {
                    amount: Money::from_minor(amount),
                    ..FeeRates::default()
                },
            })
            .await?;
    }

    Ok(())
}

pub(crate) fn new_item(product: ProductUuid, region: &Region, basis: CostBasis) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        category: "lpg".to_string(),
        vendor_uuid: VendorUuid::new(),
        region: region.clone(),
        basis,
    }
}

pub(crate) fn assert_total_matches_items(cart: &CartRecord) {
    let sum = Money::checked_sum(cart.items.iter().map(|item| item.cost));

    assert_eq!(Some(cart.total), sum, "cart total must equal the item costs");
}

pub(crate) fn operator(role: CallerRole) -> Caller {
    Caller::new(AccountUuid::new(), role, None)
}

/// Insert a buyer profile and return the matching caller.
pub(crate) async fn create_buyer(
    ctx: &TestContext,
    name: &str,
    state: &str,
    lga: &str,
) -> Result<Caller, sqlx::Error> {
    let caller = Caller::new(AccountUuid::new(), CallerRole::Buyer, None);

    insert_profile(ctx, "buyers", &caller, name, state, lga).await?;

    Ok(caller)
}

/// Insert a guest profile and return the matching caller shopping from `device`.
pub(crate) async fn create_guest(
    ctx: &TestContext,
    name: &str,
    device: &str,
    state: &str,
    lga: &str,
) -> Result<Caller, sqlx::Error> {
    let caller = Caller::new(AccountUuid::new(), CallerRole::Guest, DeviceId::new(device));

    insert_profile(ctx, "guests", &caller, name, state, lga).await?;

    Ok(caller)
}

async fn insert_profile(
    ctx: &TestContext,
    table: &str,
    caller: &Caller,
    name: &str,
    state: &str,
    lga: &str,
) -> Result<(), sqlx::Error> {
    let region = Region::new(state, lga).map_err(|source| sqlx::Error::Decode(Box::new(source)))?;

    query(&format!(
        "INSERT INTO {table} (uuid, name, phone, email, address, state, lga) \
         VALUES ($1, $2, '08000000000', 'shopper@example.com', '1 Test Road', $3, $4)"
    ))
    .bind(caller.uuid.into_uuid())
    .bind(name)
    .bind(region.state())
    .bind(region.lga())
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}
