//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's active cart.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Data<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let cart = state
        .app
        .carts
        .get_active_cart(owner)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Data::new(cart.into())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use refill_app::{
        auth::{Caller, OwnerKey},
        domain::carts::{CartsServiceError, MockCartsService, records::CartUuid},
        money::Money,
    };

    use crate::test_helpers::{Mocks, buyer, buyer_owner, guest, make_cart, make_item, service_as};

    use super::*;

    fn make_service(caller: Caller, carts: MockCartsService) -> Service {
        service_as(
            caller,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_the_active_cart() -> TestResult {
        let cart_uuid = CartUuid::new();
        let cart = make_cart(
            buyer_owner(),
            vec![
                make_item(cart_uuid, 1, Money::from_minor(250_000)),
                make_item(cart_uuid, 1, Money::from_minor(250_050)),
            ],
        );

        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .withf(|owner| *owner == buyer_owner())
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(buyer(), carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Data<CartResponse> = res.take_json().await?;

        assert_eq!(body.data.uuid, cart_uuid.into_uuid());
        assert!((body.data.total - 5000.5).abs() < 1e-9);
        assert_eq!(body.data.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn guests_read_the_cart_of_their_device() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .withf(|owner| matches!(owner, OwnerKey::Device(device) if device.as_str() == "device-1"))
            .return_once(|owner| Ok(make_cart(owner, Vec::new())));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(guest(), carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn no_active_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(buyer(), carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
