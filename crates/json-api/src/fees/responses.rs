//! Fee response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use refill_app::domain::fees::records::FeeRecord;

/// Fee Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeeResponse {
    /// The unique identifier of the fee
    pub uuid: Uuid,

    /// `product`, `delivery` or `service`
    pub fee_type: String,

    /// State the fee applies in
    pub state: String,

    /// Local government area the fee applies in
    pub lga: String,

    /// Priced product, for product fees
    pub product_uuid: Option<Uuid>,

    /// Rate per kilogram
    pub cost_per_kg: f64,

    /// Rate per unit
    pub cost_per_qty: f64,

    /// Flat delivery or service amount
    pub amount: f64,

    /// `active` or `inactive`
    pub status: String,

    /// When the status last changed
    pub status_changed_at: String,

    /// When the fee was quoted
    pub created_at: String,
}

impl From<FeeRecord> for FeeResponse {
    fn from(fee: FeeRecord) -> Self {
        let scope = &fee.scope;

        Self {
            uuid: fee.uuid.into_uuid(),
            fee_type: scope.fee_type().as_str().to_string(),
            state: scope.region().state().to_string(),
            lga: scope.region().lga().to_string(),
            product_uuid: scope.product_uuid().map(|product| product.into_uuid()),
            cost_per_kg: fee.rates.cost_per_kg.to_major(),
            cost_per_qty: fee.rates.cost_per_qty.to_major(),
            amount: fee.rates.amount.to_major(),
            status: fee.status.as_str().to_string(),
            status_changed_at: fee.status_changed_at.to_string(),
            created_at: fee.created_at.to_string(),
        }
    }
}
