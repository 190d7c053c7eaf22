//! App Router

use salvo::Router;

use crate::{auth, carts, checkouts, fees};

/// Every authenticated route.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .push(Router::with_path("add").post(carts::handlers::add::handler))
                .push(Router::with_path("checkout").post(checkouts::handlers::create::handler))
                .push(
                    Router::with_path("item")
                        .push(
                            Router::with_path("quantity")
                                .put(carts::items::handlers::quantity::handler),
                        )
                        .push(
                            Router::with_path("{item}")
                                .delete(carts::items::handlers::delete::handler),
                        ),
                )
                .push(Router::with_path("{cart}").delete(carts::handlers::delete::handler)),
        )
        .push(
            Router::with_path("fees")
                .get(fees::handlers::index::handler)
                .put(fees::handlers::quote::handler),
        )
        .push(Router::with_path("checkout").put(checkouts::handlers::update::handler))
        .push(
            Router::with_path("checkouts")
                .get(checkouts::handlers::index::handler)
                .push(Router::with_path("{checkout}").get(checkouts::handlers::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::Value;
    use testresult::TestResult;

    use refill_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::carts::{CartsServiceError, MockCartsService},
    };

    use crate::test_helpers::{Mocks, buyer};

    use super::*;

    fn service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn every_route_requires_a_bearer_token() {
        let service = service(Mocks::default());

        for (method, path) in [
            ("GET", "/cart"),
            ("PUT", "/fees"),
            ("GET", "/checkouts"),
            ("PUT", "/checkout"),
        ] {
            let request = match method {
                "GET" => TestClient::get(format!("http://example.com{path}")),
                _ => TestClient::put(format!("http://example.com{path}")),
            };

            let res = request.send(&service).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "{method} {path}"
            );
        }
    }

    #[tokio::test]
    async fn authenticated_caller_reaches_the_handler() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "good-token")
            .return_once(|_| Ok(buyer()));

        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/cart")
            .add_header(AUTHORIZATION, "Bearer good-token", true)
            .send(&service(Mocks {
                auth,
                carts,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: Value = res.take_json().await?;

        assert_eq!(body["data"]["code"], "DatabaseNoRecordError");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_never_reaches_the_handler() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com/checkouts")
            .add_header(AUTHORIZATION, "Bearer stale-token", true)
            .send(&service(Mocks {
                auth,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
