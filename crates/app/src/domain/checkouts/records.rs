//! Checkout Records

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    auth::AccountUuid,
    domain::{
        carts::records::{CartItemRecord, CartItemUuid, CartUuid},
        checkouts::errors::CheckoutsServiceError,
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::{Money, Weight},
    uuids::TypedUuid,
};

/// Checkout UUID
pub type CheckoutUuid = TypedUuid<CheckoutRecord>;

/// Order lifecycle. Everything but `Pending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Fulfilled,
}

impl CheckoutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Fulfilled => "fulfilled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckoutStatus {
    type Err = CheckoutsServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            "fulfilled" => Ok(Self::Fulfilled),
            _ => Err(CheckoutsServiceError::UnknownStatus(value.to_string())),
        }
    }
}

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub region: Region,
}

impl ShippingInfo {
    /// Trim every field and reject blank ones.
    pub fn new(
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
        region: Region,
    ) -> Result<Self, CheckoutsServiceError> {
        let field = |label: &str, value: &str| {
            let value = value.trim();

            if value.is_empty() {
                Err(CheckoutsServiceError::InvalidRequest(format!(
                    "recipient {label} must not be blank"
                )))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            name: field("name", name)?,
            phone: field("phone", phone)?,
            email: field("email", email)?,
            address: field("address", address)?,
            region,
        })
    }
}

/// A cart item as it stood when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub category: String,
    pub vendor_uuid: VendorUuid,
    pub state: String,
    pub lga: String,
    pub weight: Option<Weight>,
    pub quantity: u32,
    pub cost: Money,
}

impl From<CartItemRecord> for CheckoutItem {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            category: item.category,
            vendor_uuid: item.vendor_uuid,
            state: item.region.state().to_string(),
            lga: item.region.lga().to_string(),
            weight: item.weight,
            quantity: item.quantity,
            cost: item.cost,
        }
    }
}

/// Checkout Record
#[derive(Debug, Clone)]
pub struct CheckoutRecord {
    pub uuid: CheckoutUuid,
    pub customer_uuid: AccountUuid,
    pub cart_uuid: CartUuid,
    pub items: Vec<CheckoutItem>,
    pub cart_total: Money,
    pub shipping: ShippingInfo,
    pub payment_method: String,
    pub amount_paid: Money,
    pub delivery_fee: Money,
    pub service_fee: Money,
    pub total: Money,
    pub status: CheckoutStatus,
    pub status_changed_at: Timestamp,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn statuses_parse_from_lowercase_names() {
        assert!(matches!(
            "cancelled".parse::<CheckoutStatus>(),
            Ok(CheckoutStatus::Cancelled)
        ));
        assert!(matches!(
            "Fulfilled".parse::<CheckoutStatus>(),
            Ok(CheckoutStatus::Fulfilled)
        ));
    }

    #[test]
    fn unknown_status_is_a_status_error() {
        let result = "shipped".parse::<CheckoutStatus>();

        assert!(
            matches!(&result, Err(CheckoutsServiceError::UnknownStatus(value)) if value == "shipped"),
            "got {result:?}"
        );
    }

    #[test]
    fn only_pending_is_open() {
        assert!(!CheckoutStatus::Pending.is_terminal());
        assert!(CheckoutStatus::Accepted.is_terminal());
        assert!(CheckoutStatus::Cancelled.is_terminal());
    }

    #[test]
    fn shipping_fields_must_not_be_blank() -> TestResult {
        let region = Region::new("Lagos", "Ikeja")?;

        let shipping = ShippingInfo::new(" Ada ", "0800", "ada@example.com", "1 Road", region.clone())?;

        assert_eq!(shipping.name, "Ada");

        let result = ShippingInfo::new("Ada", "  ", "ada@example.com", "1 Road", region);

        assert!(
            matches!(&result, Err(CheckoutsServiceError::InvalidRequest(message)) if message.contains("phone")),
            "got {result:?}"
        );

        Ok(())
    }
}
