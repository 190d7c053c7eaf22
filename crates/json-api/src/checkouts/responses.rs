//! Checkout response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use refill_app::domain::checkouts::records::{CheckoutItem, CheckoutRecord, ShippingInfo};

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The unique identifier of the checkout
    pub uuid: Uuid,

    /// Ordering customer
    pub customer_uuid: Uuid,

    /// Cart the order was placed from
    pub cart_uuid: Uuid,

    /// Items as they stood at checkout
    pub items: Vec<CheckoutItemResponse>,

    /// Where the order is delivered
    pub shipping: ShippingResponse,

    /// Payment method as submitted
    pub payment_method: String,

    /// Sum of item costs
    pub cart_total: f64,

    /// Delivery fee charged
    pub delivery_fee: f64,

    /// Service fee charged
    pub service_fee: f64,

    /// Cart total plus fees
    pub total: f64,

    /// Amount the shopper paid
    pub amount_paid: f64,

    /// `pending`, `accepted`, `rejected`, `cancelled` or `fulfilled`
    pub status: String,

    /// When the status last changed
    pub status_changed_at: String,

    /// When the order was placed
    pub created_at: String,
}

impl From<CheckoutRecord> for CheckoutResponse {
    fn from(checkout: CheckoutRecord) -> Self {
        Self {
            uuid: checkout.uuid.into_uuid(),
            customer_uuid: checkout.customer_uuid.into_uuid(),
            cart_uuid: checkout.cart_uuid.into_uuid(),
            items: checkout
                .items
                .into_iter()
                .map(CheckoutItemResponse::from)
                .collect(),
            shipping: checkout.shipping.into(),
            payment_method: checkout.payment_method,
            cart_total: checkout.cart_total.to_major(),
            delivery_fee: checkout.delivery_fee.to_major(),
            service_fee: checkout.service_fee.to_major(),
            total: checkout.total.to_major(),
            amount_paid: checkout.amount_paid.to_major(),
            status: checkout.status.as_str().to_string(),
            status_changed_at: checkout.status_changed_at.to_string(),
            created_at: checkout.created_at.to_string(),
        }
    }
}

/// Checkout Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub category: String,
    pub vendor_uuid: Uuid,
    pub state: String,
    pub lga: String,
    pub weight: Option<f64>,
    pub quantity: u32,
    pub cost: f64,
}

impl From<CheckoutItem> for CheckoutItemResponse {
    fn from(item: CheckoutItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            category: item.category,
            vendor_uuid: item.vendor_uuid.into_uuid(),
            state: item.state,
            lga: item.lga,
            weight: item.weight.map(|weight| weight.to_kilograms()),
            quantity: item.quantity,
            cost: item.cost.to_major(),
        }
    }
}

/// Shipping Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingResponse {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub lga: String,
}

impl From<ShippingInfo> for ShippingResponse {
    fn from(shipping: ShippingInfo) -> Self {
        Self {
            state: shipping.region.state().to_string(),
            lga: shipping.region.lga().to_string(),
            name: shipping.name,
            phone: shipping.phone,
            email: shipping.email,
            address: shipping.address,
        }
    }
}
