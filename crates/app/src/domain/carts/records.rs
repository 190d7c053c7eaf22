//! Cart Records

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    auth::OwnerKey,
    domain::{
        carts::data::CostBasis,
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::{Money, Weight},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cart status `{0}`")]
pub struct UnknownCartStatus(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartStatus {
    Active,
    Inactive,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(UnknownCartStatus(value.to_string())),
        }
    }
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: OwnerKey,
    pub items: Vec<CartItemRecord>,
    pub total: Money,
    pub status: CartStatus,
    pub status_changed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub category: String,
    pub vendor_uuid: VendorUuid,
    pub region: Region,
    pub weight: Option<Weight>,
    pub quantity: u32,
    pub cost: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// How this item's cost is derived from its product fee.
    #[must_use]
    pub fn basis(&self) -> CostBasis {
        match self.weight {
            Some(weight) => CostBasis::Weight(weight),
            None => CostBasis::Quantity(self.quantity),
        }
    }
}
