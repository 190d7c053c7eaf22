//! Quote Fee Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use refill_app::{
    domain::{
        fees::{
            data::{FeeScope, NewFeeQuote},
            policy::authorize_quote,
            records::{FeeRates, FeeType, FeeUuid},
        },
        regions::Region,
    },
    money::Money,
};

use crate::{
    envelope::Data,
    errors::ApiError,
    extensions::*,
    fees::{errors::into_api_error, responses::FeeResponse},
    state::State,
};

fn default_fee_type() -> String {
    FeeType::Product.as_str().to_string()
}

/// Quote Fee Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteFeeRequest {
    /// `product` (default), `delivery` or `service`
    #[serde(default = "default_fee_type")]
    pub fee_type: String,

    /// Priced product; required for product fees only
    #[serde(default, alias = "productID")]
    pub product_id: Option<Uuid>,

    /// State the fee applies in
    pub state: String,

    /// Local government area the fee applies in
    pub lga: String,

    /// Rate per kilogram
    #[serde(default)]
    pub cost_per_kg: f64,

    /// Rate per unit
    #[serde(default)]
    pub cost_per_qty: f64,

    /// Flat delivery or service amount
    #[serde(default, alias = "service_fee")]
    pub amount: f64,
}

impl QuoteFeeRequest {
    fn into_quote(self) -> Result<NewFeeQuote, ApiError> {
        let fee_type = self.fee_type.parse::<FeeType>().or_400("invalid fee_type")?;
        let region = Region::new(&self.state, &self.lga).or_400("invalid region")?;

        let scope = FeeScope::new(fee_type, region, self.product_id.map(Into::into))
            .or_400("invalid fee scope")?;

        let rates = FeeRates {
            cost_per_kg: Money::from_major(self.cost_per_kg).or_400("invalid cost_per_kg")?,
            cost_per_qty: Money::from_major(self.cost_per_qty).or_400("invalid cost_per_qty")?,
            amount: Money::from_major(self.amount).or_400("invalid amount")?,
        };

        Ok(NewFeeQuote {
            uuid: FeeUuid::new(),
            scope,
            rates,
        })
    }
}

/// Quote Fee Handler
///
/// Records a new fee for a scope; the scope's previous active fee becomes inactive.
#[endpoint(
    tags("fees"),
    summary = "Quote Fee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Fee quoted"),
    ),
)]
#[tracing::instrument(
    name = "fees.quote",
    skip(json, depot),
    fields(caller_uuid = tracing::field::Empty, scope = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteFeeRequest>,
    depot: &mut Depot,
) -> Result<Json<Data<FeeResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    authorize_quote(&caller).map_err(into_api_error)?;

    let quote = json.into_inner().into_quote()?;

    let span = tracing::Span::current();

    span.record("caller_uuid", tracing::field::display(caller.uuid));
    span.record("scope", tracing::field::display(&quote.scope));

    let fee = state.app.fees.quote(quote).await.map_err(into_api_error)?;

    tracing::info!(fee_uuid = %fee.uuid, scope = %fee.scope, "quoted fee");

    Ok(Json(Data::new(fee.into())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use refill_app::{
        auth::Caller,
        domain::fees::{FeesServiceError, MockFeesService},
    };

    use crate::test_helpers::{Mocks, admin, buyer, make_fee, service_as};

    use super::*;

    fn make_service(caller: Caller, fees: MockFeesService) -> Service {
        service_as(
            caller,
            Mocks {
                fees,
                ..Mocks::default()
            },
            Router::with_path("fees").put(handler),
        )
    }

    #[tokio::test]
    async fn operators_quote_product_fees() -> TestResult {
        let product = Uuid::now_v7();

        let mut fees = MockFeesService::new();

        fees.expect_quote()
            .once()
            .withf(move |quote| {
                quote.scope.fee_type() == FeeType::Product
                    && quote.scope.product_uuid().map(|uuid| uuid.into_uuid()) == Some(product)
                    && quote.rates.cost_per_kg == Money::from_minor(40_000)
                    && quote.rates.cost_per_qty == Money::from_minor(250_000)
            })
            .return_once(|quote| Ok(make_fee(quote.scope, quote.rates)));

        let mut res = TestClient::put("http://example.com/fees")
            .json(&json!({
                "product_id": product,
                "state": "Lagos",
                "lga": "Ikeja",
                "cost_per_kg": 400.0,
                "cost_per_qty": 2500.0,
            }))
            .send(&make_service(admin(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Data<FeeResponse> = res.take_json().await?;

        assert_eq!(body.data.fee_type, "product");
        assert_eq!(body.data.status, "active");
        assert_eq!(body.data.product_uuid, Some(product));

        Ok(())
    }

    #[tokio::test]
    async fn service_fee_alias_sets_the_flat_amount() -> TestResult {
        let mut fees = MockFeesService::new();

        fees.expect_quote()
            .once()
            .withf(|quote| {
                quote.scope.fee_type() == FeeType::Service
                    && quote.rates.amount == Money::from_minor(20_000)
            })
            .return_once(|quote| Ok(make_fee(quote.scope, quote.rates)));

        let res = TestClient::put("http://example.com/fees")
            .json(&json!({
                "fee_type": "service",
                "state": "Lagos",
                "lga": "Ikeja",
                "service_fee": 200.0,
            }))
            .send(&make_service(admin(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn shoppers_cannot_quote() -> TestResult {
        let mut fees = MockFeesService::new();

        fees.expect_quote().never();

        let mut res = TestClient::put("http://example.com/fees")
            .json(&json!({ "fee_type": "delivery", "state": "Lagos", "lga": "Ikeja", "amount": 1000.0 }))
            .send(&make_service(buyer(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body: Value = res.take_json().await?;

        assert_eq!(body["data"]["code"], "ErrorUnauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn regional_fee_with_product_returns_400() -> TestResult {
        let mut fees = MockFeesService::new();

        fees.expect_quote().never();

        let res = TestClient::put("http://example.com/fees")
            .json(&json!({
                "fee_type": "delivery",
                "product_id": Uuid::now_v7(),
                "state": "Lagos",
                "lga": "Ikeja",
                "amount": 1000.0,
            }))
            .send(&make_service(admin(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn negative_rate_returns_400() -> TestResult {
        let mut fees = MockFeesService::new();

        fees.expect_quote().never();

        let res = TestClient::put("http://example.com/fees")
            .json(&json!({
                "product_id": Uuid::now_v7(),
                "state": "Lagos",
                "lga": "Ikeja",
                "cost_per_kg": -1.0,
            }))
            .send(&make_service(admin(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500_with_reference() -> TestResult {
        let mut fees = MockFeesService::new();

        fees.expect_quote()
            .once()
            .return_once(|_| Err(FeesServiceError::AlreadyExists));

        let mut res = TestClient::put("http://example.com/fees")
            .json(&json!({ "fee_type": "delivery", "state": "Lagos", "lga": "Ikeja", "amount": 1000.0 }))
            .send(&make_service(admin(), fees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body: Value = res.take_json().await?;

        assert_eq!(body["data"]["code"], "DatabaseError");
        assert_eq!(body["data"]["message"], "internal server error");
        assert!(body["data"]["reference"].is_string());

        Ok(())
    }
}
