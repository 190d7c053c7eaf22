//! List Fees Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use refill_app::domain::regions::Region;

use crate::{
    envelope::Data,
    errors::ApiError,
    extensions::*,
    fees::{errors::into_api_error, responses::FeeResponse},
    state::State,
};

fn region_filter(
    state: Option<String>,
    lga: Option<String>,
) -> Result<Option<Region>, ApiError> {
    match (state, lga) {
        (None, None) => Ok(None),
        (Some(state), Some(lga)) => Region::new(&state, &lga).or_400("invalid region").map(Some),
        _ => Err(ApiError::invalid_request(
            "state and lga must be given together",
        )),
    }
}

/// List Fees Handler
///
/// Returns the active fees, optionally restricted to one region.
#[endpoint(
    tags("fees"),
    summary = "List Active Fees",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active fees"),
    ),
)]
pub(crate) async fn handler(
    state: QueryParam<String, false>,
    lga: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Data<Vec<FeeResponse>>>, ApiError> {
    let app = depot.obtain_or_500::<Arc<State>>()?;
    let region = region_filter(state.into_inner(), lga.into_inner())?;

    let fees = app
        .app
        .fees
        .list_active(region)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(
        fees.into_iter().map(FeeResponse::from).collect(),
    )))
}
