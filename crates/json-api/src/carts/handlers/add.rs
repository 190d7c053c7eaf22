//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use refill_app::{
    domain::{
        carts::{
            data::{CostBasis, NewCartItem},
            records::CartItemUuid,
        },
        regions::Region,
    },
    money::Weight,
};

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Catalogue product
    #[serde(alias = "productID")]
    pub product_id: Uuid,

    /// Product category
    pub category: String,

    /// Vendor supplying the product
    #[serde(alias = "vendorID")]
    pub vendor_id: Uuid,

    /// Delivery state
    pub state: String,

    /// Delivery local government area
    pub lga: String,

    /// Kilograms; takes precedence over `quantity`
    pub weight: Option<f64>,

    /// Units, for items priced per unit
    pub quantity: Option<i64>,
}

impl AddCartItemRequest {
    fn into_new_item(self) -> Result<NewCartItem, ApiError> {
        let category = self.category.trim();

        if category.is_empty() {
            return Err(ApiError::invalid_request("category must not be blank"));
        }

        let region = Region::new(&self.state, &self.lga).or_400("invalid region")?;

        let weight = self
            .weight
            .map(Weight::from_kilograms)
            .transpose()
            .or_400("invalid weight")?;

        let basis = CostBasis::from_parts(weight, self.quantity).map_err(into_api_error)?;

        Ok(NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: self.product_id.into(),
            category: category.to_string(),
            vendor_uuid: self.vendor_id.into(),
            region,
            basis,
        })
    }
}

/// Add Cart Item Handler
///
/// Prices the item against the product's active fee and adds it to the
/// caller's active cart, opening one when needed.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(json, depot),
    fields(owner = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<Data<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;
    let item = json.into_inner().into_new_item()?;

    let span = tracing::Span::current();

    span.record("owner", tracing::field::display(&owner));
    span.record("product_uuid", tracing::field::display(item.product_uuid));

    let cart = state
        .app
        .carts
        .add_item(owner, item)
        .await
        .map_err(into_api_error)?;

    tracing::info!(cart_uuid = %cart.uuid, total = %cart.total, "added cart item");

    Ok(Json(Data::new(cart.into())))
}
