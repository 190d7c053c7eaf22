//! Checkout Data

use crate::{
    auth::AccountUuid,
    domain::{
        carts::records::CartUuid,
        checkouts::records::{CheckoutItem, CheckoutUuid, ShippingInfo},
        regions::Region,
    },
    money::Money,
};

/// Recipient details supplied for a third-party delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub region: Region,
}

/// Who an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Copy the caller's own profile.
    Myself,

    /// Deliver to someone else.
    Other(RecipientDetails),
}

/// A checkout as submitted by a shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub recipient: Recipient,
    pub payment_method: String,
    pub amount_paid: Money,
    pub delivery_fee: Money,
    pub service_fee: Money,
}

/// Everything written for a new order.
#[derive(Debug, Clone)]
pub(crate) struct NewCheckout {
    pub uuid: CheckoutUuid,
    pub customer_uuid: AccountUuid,
    pub cart_uuid: CartUuid,
    pub items: Vec<CheckoutItem>,
    pub cart_total: Money,
    pub shipping: ShippingInfo,
    pub payment_method: String,
    pub amount_paid: Money,
    pub delivery_fee: Money,
    pub service_fee: Money,
    pub total: Money,
}
