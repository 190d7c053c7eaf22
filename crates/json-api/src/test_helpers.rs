//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use refill_app::{
    auth::{AccountUuid, Caller, CallerRole, DeviceId, MockAuthService, OwnerKey},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartStatus, CartUuid},
        },
        checkouts::{
            MockCheckoutsService,
            records::{CheckoutItem, CheckoutRecord, CheckoutStatus, CheckoutUuid, ShippingInfo},
        },
        fees::{
            MockFeesService,
            data::FeeScope,
            records::{FeeRates, FeeRecord, FeeStatus, FeeUuid},
        },
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::Money,
};

use crate::state::State;

pub(crate) const BUYER_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());

pub(crate) fn buyer() -> Caller {
    Caller::new(BUYER_UUID, CallerRole::Buyer, None)
}

pub(crate) fn guest() -> Caller {
    Caller::new(
        AccountUuid::from_uuid(Uuid::from_u128(2)),
        CallerRole::Guest,
        DeviceId::new("device-1"),
    )
}

pub(crate) fn admin() -> Caller {
    Caller::new(
        AccountUuid::from_uuid(Uuid::from_u128(3)),
        CallerRole::Admin,
        None,
    )
}

pub(crate) fn buyer_owner() -> OwnerKey {
    OwnerKey::Customer(BUYER_UUID)
}

pub(crate) fn lagos() -> Region {
    Region::new("Lagos", "Ikeja").expect("valid test region")
}

/// One mock per service; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub fees: MockFeesService,
    pub carts: MockCartsService,
    pub checkouts: MockCheckoutsService,
    pub auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            fees: Arc::new(self.fees),
            carts: Arc::new(self.carts),
            checkouts: Arc::new(self.checkouts),
            auth: Arc::new(self.auth),
        })
    }
}

/// Serve `route` with `caller` already authenticated.
pub(crate) fn service_as(caller: Caller, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject(caller))
            .push(route),
    )
}

pub(crate) fn make_item(cart: CartUuid, quantity: u32, cost: Money) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        product_uuid: ProductUuid::new(),
        category: "gas".to_string(),
        vendor_uuid: VendorUuid::new(),
        region: lagos(),
        weight: None,
        quantity,
        cost,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(owner: OwnerKey, items: Vec<CartItemRecord>) -> CartRecord {
    let total = Money::checked_sum(items.iter().map(|item| item.cost)).unwrap_or_default();

    CartRecord {
        uuid: items.first().map_or_else(CartUuid::new, |item| item.cart_uuid),
        owner,
        items,
        total,
        status: CartStatus::Active,
        status_changed_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_checkout(customer: AccountUuid, status: CheckoutStatus) -> CheckoutRecord {
    let cart = CartUuid::new();
    let item = make_item(cart, 2, Money::from_minor(500_000));

    CheckoutRecord {
        uuid: CheckoutUuid::new(),
        customer_uuid: customer,
        cart_uuid: cart,
        items: vec![CheckoutItem::from(item)],
        cart_total: Money::from_minor(500_000),
        shipping: ShippingInfo {
            name: "Ada Obi".to_string(),
            phone: "08030000000".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Allen Avenue".to_string(),
            region: lagos(),
        },
        payment_method: "card".to_string(),
        amount_paid: Money::from_minor(620_000),
        delivery_fee: Money::from_minor(100_000),
        service_fee: Money::from_minor(20_000),
        total: Money::from_minor(620_000),
        status,
        status_changed_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_fee(scope: FeeScope, rates: FeeRates) -> FeeRecord {
    FeeRecord {
        uuid: FeeUuid::new(),
        scope,
        rates,
        status: FeeStatus::Active,
        status_changed_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
