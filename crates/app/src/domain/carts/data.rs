//! Cart Data

use crate::{
    domain::{
        carts::{errors::CartsServiceError, records::CartItemUuid},
        references::{ProductUuid, VendorUuid},
        regions::Region,
    },
    money::Weight,
};

/// What an item's cost is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostBasis {
    /// Priced per kilogram.
    Weight(Weight),

    /// Priced per unit.
    Quantity(u32),
}

impl CostBasis {
    /// Pick the basis from optional request fields; weight wins when both are present.
    pub fn from_parts(
        weight: Option<Weight>,
        quantity: Option<i64>,
    ) -> Result<Self, CartsServiceError> {
        let quantity = quantity.map(positive_quantity).transpose()?;

        match (weight, quantity) {
            (Some(weight), _) => Ok(Self::Weight(weight)),
            (None, Some(quantity)) => Ok(Self::Quantity(quantity)),
            (None, None) => Err(CartsServiceError::MissingCostBasis),
        }
    }

    #[must_use]
    pub fn weight(self) -> Option<Weight> {
        match self {
            Self::Weight(weight) => Some(weight),
            Self::Quantity(_) => None,
        }
    }

    /// Stored quantity: weight-priced items count as a single unit.
    #[must_use]
    pub fn quantity(self) -> u32 {
        match self {
            Self::Weight(_) => 1,
            Self::Quantity(quantity) => quantity,
        }
    }
}

/// Validate a requested quantity; zero and negatives are never stored.
pub fn positive_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    match u32::try_from(quantity) {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(CartsServiceError::InvalidQuantity),
    }
}

/// New Cart Item Data
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub category: String,
    pub vendor_uuid: VendorUuid,
    pub region: Region,
    pub basis: CostBasis,
}
