//! List Checkouts Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    checkouts::{errors::into_api_error, responses::CheckoutResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// List Checkouts Handler
///
/// Shoppers see their own orders; operators see every order. Newest first.
#[endpoint(
    tags("checkouts"),
    summary = "List Checkouts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visible checkouts"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Data<Vec<CheckoutResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let checkouts = state
        .app
        .checkouts
        .list_checkouts(caller)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(
        checkouts.into_iter().map(CheckoutResponse::from).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use refill_app::{
        auth::{CallerRole, AccountUuid},
        domain::checkouts::{MockCheckoutsService, records::CheckoutStatus},
    };

    use crate::test_helpers::{Mocks, admin, make_checkout, service_as};

    use super::*;

    #[tokio::test]
    async fn operators_list_every_order() -> TestResult {
        let mut checkouts = MockCheckoutsService::new();

        checkouts
            .expect_list_checkouts()
            .once()
            .withf(|caller| caller.role == CallerRole::Admin)
            .return_once(|_| {
                Ok(vec![
                    make_checkout(AccountUuid::new(), CheckoutStatus::Pending),
                    make_checkout(AccountUuid::new(), CheckoutStatus::Fulfilled),
                ])
            });

        let service = service_as(
            admin(),
            Mocks {
                checkouts,
                ..Mocks::default()
            },
            Router::with_path("checkouts").get(handler),
        );

        let mut res = TestClient::get("http://example.com/checkouts")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Data<Vec<CheckoutResponse>> = res.take_json().await?;

        assert_eq!(body.data.len(), 2);

        Ok(())
    }
}
