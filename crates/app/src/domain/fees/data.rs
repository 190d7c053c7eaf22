//! Fee Data

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::domain::{
    fees::records::{FeeRates, FeeType, FeeUuid},
    references::ProductUuid,
    regions::Region,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeeScopeError {
    #[error("product fees must reference a product")]
    ProductRequired,

    #[error("{0} fees apply to a whole region and cannot reference a product")]
    ProductNotAllowed(FeeType),
}

/// The (product, region, fee type) tuple a single active fee is kept for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeeScope {
    fee_type: FeeType,
    region: Region,
    product: Option<ProductUuid>,
}

impl FeeScope {
    pub fn new(
        fee_type: FeeType,
        region: Region,
        product: Option<ProductUuid>,
    ) -> Result<Self, FeeScopeError> {
        match (fee_type.is_product_scoped(), product) {
            (true, None) => Err(FeeScopeError::ProductRequired),
            (false, Some(_)) => Err(FeeScopeError::ProductNotAllowed(fee_type)),
            _ => Ok(Self {
                fee_type,
                region,
                product,
            }),
        }
    }

    /// Scope of the product fee pricing `product` in `region`.
    #[must_use]
    pub fn product(product: ProductUuid, region: Region) -> Self {
        Self {
            fee_type: FeeType::Product,
            region,
            product: Some(product),
        }
    }

    /// Scope of a region-wide fee.
    pub fn regional(fee_type: FeeType, region: Region) -> Result<Self, FeeScopeError> {
        Self::new(fee_type, region, None)
    }

    #[must_use]
    pub fn fee_type(&self) -> FeeType {
        self.fee_type
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn product_uuid(&self) -> Option<ProductUuid> {
        self.product
    }

    /// Stable text key used to serialise quotations for the same scope.
    #[must_use]
    pub fn lock_key(&self) -> String {
        format!("fee-scope:{self}")
    }
}

impl Display for FeeScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.product {
            Some(product) => write!(f, "{}/{}/{product}", self.fee_type, self.region),
            None => write!(f, "{}/{}", self.fee_type, self.region),
        }
    }
}

/// New Fee Quote Data
#[derive(Debug, Clone)]
pub struct NewFeeQuote {
    pub uuid: FeeUuid,
    pub scope: FeeScope,
    pub rates: FeeRates,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_fees_need_a_product() -> TestResult {
        let region = Region::new("Lagos", "Ikeja")?;

        assert_eq!(
            FeeScope::new(FeeType::Product, region.clone(), None),
            Err(FeeScopeError::ProductRequired)
        );

        let scope = FeeScope::new(FeeType::Product, region, Some(ProductUuid::new()))?;

        assert!(scope.product_uuid().is_some());

        Ok(())
    }

    #[test]
    fn regional_fees_reject_a_product() -> TestResult {
        let region = Region::new("Lagos", "Ikeja")?;

        assert_eq!(
            FeeScope::new(FeeType::Delivery, region.clone(), Some(ProductUuid::new())),
            Err(FeeScopeError::ProductNotAllowed(FeeType::Delivery))
        );

        assert!(FeeScope::regional(FeeType::Service, region).is_ok());

        Ok(())
    }

    #[test]
    fn lock_key_distinguishes_scopes() -> TestResult {
        let region = Region::new("lagos", "ikeja")?;
        let delivery = FeeScope::regional(FeeType::Delivery, region.clone())?;
        let service = FeeScope::regional(FeeType::Service, region.clone())?;
        let product = ProductUuid::new();

        assert_eq!(delivery.lock_key(), "fee-scope:delivery/lagos/ikeja");
        assert_ne!(delivery.lock_key(), service.lock_key());
        assert_eq!(
            FeeScope::product(product, region).lock_key(),
            format!("fee-scope:product/lagos/ikeja/{product}")
        );

        Ok(())
    }
}
