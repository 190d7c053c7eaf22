//! Update Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// Item in the caller's active cart
    pub cart_item_id: Uuid,

    /// New unit count; must be positive
    pub quantity: i64,
}

/// Update Cart Item Quantity Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.quantity",
    skip(json, depot),
    fields(owner = tracing::field::Empty, cart_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<Data<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("owner", tracing::field::display(&owner));
    span.record("cart_item_uuid", tracing::field::display(request.cart_item_id));

    let cart = state
        .app
        .carts
        .update_item_quantity(owner, request.cart_item_id.into(), request.quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(cart.into())))
}
