//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes the item and returns the recomputed cart.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
    )
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Data<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let cart = state
        .app
        .carts
        .delete_item(owner, item.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(cart.into())))
}
