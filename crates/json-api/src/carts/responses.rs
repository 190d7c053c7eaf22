//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use refill_app::domain::carts::records::{CartItemRecord, CartRecord};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// `active` or `inactive`
    pub status: String,

    /// Sum of item costs
    pub total: f64,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            status: cart.status.as_str().to_string(),
            total: cart.total.to_major(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// Catalogue product
    pub product_uuid: Uuid,

    /// Product category
    pub category: String,

    /// Vendor supplying the product
    pub vendor_uuid: Uuid,

    /// Delivery state
    pub state: String,

    /// Delivery local government area
    pub lga: String,

    /// Kilograms, for weight-priced items
    pub weight: Option<f64>,

    /// Units ordered
    pub quantity: u32,

    /// Item cost
    pub cost: f64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            category: item.category,
            vendor_uuid: item.vendor_uuid.into_uuid(),
            state: item.region.state().to_string(),
            lga: item.region.lga().to_string(),
            weight: item.weight.map(|weight| weight.to_kilograms()),
            quantity: item.quantity,
            cost: item.cost.to_major(),
        }
    }
}
