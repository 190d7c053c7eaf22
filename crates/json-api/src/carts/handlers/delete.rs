//! Inactivate Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::errors::into_api_error, envelope::Data, errors::ApiError, extensions::*, state::State,
};

/// Cart Inactivated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartInactivatedResponse {
    /// Inactivated cart UUID
    pub uuid: Uuid,
}

/// Inactivate Cart Handler
///
/// Closes one of the caller's carts; a cart that is already inactive is left as is.
#[endpoint(
    tags("carts"),
    summary = "Inactivate Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart inactivated"),
    ),
)]
#[tracing::instrument(
    name = "carts.delete",
    skip(cart, depot),
    fields(owner = tracing::field::Empty, cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Data<CartInactivatedResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;
    let cart = cart.into_inner();

    let span = tracing::Span::current();

    span.record("owner", tracing::field::display(&owner));
    span.record("cart_uuid", tracing::field::display(cart));

    state
        .app
        .carts
        .inactivate(owner, cart.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(cart_uuid = %cart, "inactivated cart");

    Ok(Json(Data::new(CartInactivatedResponse { uuid: cart })))
}
