//! Update Checkout Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    checkouts::{errors::into_api_error, responses::CheckoutResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCheckoutRequest {
    /// Checkout to update
    pub id: Uuid,

    /// Target status, lowercase
    pub status: String,
}

/// Update Checkout Status Handler
///
/// Shoppers may cancel their own pending orders; operators may accept,
/// reject, fulfil or cancel any pending order.
#[endpoint(
    tags("checkouts"),
    summary = "Update Checkout Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated checkout"),
    ),
)]
#[tracing::instrument(
    name = "checkouts.update",
    skip(json, depot),
    fields(caller_uuid = tracing::field::Empty, checkout_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<Data<CheckoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("caller_uuid", tracing::field::display(caller.uuid));
    span.record("checkout_uuid", tracing::field::display(request.id));

    let checkout = state
        .app
        .checkouts
        .update_checkout(caller, request.id.into(), request.status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(checkout_uuid = %checkout.uuid, status = %checkout.status, "checkout status changed");

    Ok(Json(Data::new(checkout.into())))
}
