//! Get Checkout Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    checkouts::{errors::into_api_error, responses::CheckoutResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Checkout Handler
///
/// Orders outside the caller's view are reported as not found.
#[endpoint(
    tags("checkouts"),
    summary = "Get Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout"),
    ),
)]
pub(crate) async fn handler(
    checkout: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Data<CheckoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let checkout = state
        .app
        .checkouts
        .get_checkout(caller, checkout.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(checkout.into())))
}
