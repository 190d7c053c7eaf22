//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use refill_app::{
    domain::{
        checkouts::data::{CheckoutRequest, Recipient, RecipientDetails},
        regions::Region,
    },
    money::Money,
};

use crate::{
    checkouts::{errors::into_api_error, responses::CheckoutResponse},
    envelope::Data,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Delivery Details
///
/// Omit to deliver to the caller's own profile address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryDetailsRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub lga: String,
}

impl DeliveryDetailsRequest {
    fn into_recipient(self) -> Result<Recipient, ApiError> {
        let region = Region::new(&self.state, &self.lga).or_400("invalid delivery region")?;

        Ok(Recipient::Other(RecipientDetails {
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            region,
        }))
    }
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequestBody {
    /// Third-party recipient; the caller's profile is used when absent
    #[serde(default)]
    pub delivery_details: Option<DeliveryDetailsRequest>,

    /// How the shopper paid
    pub payment_method: String,

    /// Amount paid, in major units
    pub amount_paid: f64,

    /// Delivery fee the client was shown
    pub delivery_fee: f64,

    /// Service fee the client was shown
    pub service_fee: f64,
}

impl CheckoutRequestBody {
    fn into_request(self) -> Result<CheckoutRequest, ApiError> {
        let payment_method = self.payment_method.trim();

        if payment_method.is_empty() {
            return Err(ApiError::invalid_request("payment_method must not be blank"));
        }

        let recipient = match self.delivery_details {
            Some(details) => details.into_recipient()?,
            None => Recipient::Myself,
        };

        Ok(CheckoutRequest {
            recipient,
            payment_method: payment_method.to_string(),
            amount_paid: Money::from_major(self.amount_paid).or_400("invalid amount_paid")?,
            delivery_fee: Money::from_major(self.delivery_fee).or_400("invalid delivery_fee")?,
            service_fee: Money::from_major(self.service_fee).or_400("invalid service_fee")?,
        })
    }
}

/// Checkout Handler
///
/// Places an order from the caller's active cart after checking the submitted
/// fees against the ledger and the payment against the total.
#[endpoint(
    tags("checkouts"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order placed"),
    ),
)]
#[tracing::instrument(
    name = "checkouts.create",
    skip(json, depot),
    fields(caller_uuid = tracing::field::Empty, checkout_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequestBody>,
    depot: &mut Depot,
) -> Result<Json<Data<CheckoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let request = json.into_inner().into_request()?;

    let span = tracing::Span::current();

    span.record("caller_uuid", tracing::field::display(caller.uuid));

    let checkout = state
        .app
        .checkouts
        .checkout(caller, request)
        .await
        .map_err(into_api_error)?;

    span.record("checkout_uuid", tracing::field::display(checkout.uuid));

    tracing::info!(
        checkout_uuid = %checkout.uuid,
        cart_uuid = %checkout.cart_uuid,
        total = %checkout.total,
        "checkout placed"
    );

    Ok(Json(Data::new(checkout.into())))
}
