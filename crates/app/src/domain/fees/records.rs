//! Fee Records

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::fees::data::FeeScope, money::Money, uuids::TypedUuid};

/// Fee UUID
pub type FeeUuid = TypedUuid<FeeRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fee type `{0}`")]
pub struct UnknownFeeType(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fee status `{0}`")]
pub struct UnknownFeeStatus(pub String);

/// What a fee is charged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeeType {
    /// Price of a refill, charged per kilogram or per unit.
    Product,

    /// Flat delivery charge for a region.
    Delivery,

    /// Flat platform charge for a region.
    Service,
}

impl FeeType {
    pub const ALL: [Self; 3] = [Self::Product, Self::Delivery, Self::Service];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Delivery => "delivery",
            Self::Service => "service",
        }
    }

    /// Whether fees of this type are quoted per product rather than region-wide.
    #[must_use]
    pub const fn is_product_scoped(self) -> bool {
        matches!(self, Self::Product)
    }
}

impl Display for FeeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeType {
    type Err = UnknownFeeType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "delivery" => Ok(Self::Delivery),
            "service" => Ok(Self::Service),
            _ => Err(UnknownFeeType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeStatus {
    Active,
    Inactive,
}

impl FeeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for FeeStatus {
    type Err = UnknownFeeStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(UnknownFeeStatus(value.to_string())),
        }
    }
}

/// Cost structure of a quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeRates {
    /// Rate applied to weight-priced items.
    pub cost_per_kg: Money,

    /// Rate applied to quantity-priced items.
    pub cost_per_qty: Money,

    /// Flat rate for region-wide fee types.
    pub amount: Money,
}

/// Fee Record
#[derive(Debug, Clone)]
pub struct FeeRecord {
    pub uuid: FeeUuid,
    pub scope: FeeScope,
    pub rates: FeeRates,
    pub status: FeeStatus,
    pub status_changed_at: Timestamp,
    pub created_at: Timestamp,
}

impl FeeRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == FeeStatus::Active
    }
}
