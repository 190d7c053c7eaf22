//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use refill_app::auth::{Caller, OwnerKey};

use crate::errors::ApiError;

/// Helpers for pulling request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// The identity injected by the auth middleware.
    fn caller_or_401(&self) -> Result<Caller, ApiError>;

    /// The cart owner for shoppers; operators have no cart.
    fn owner_or_401(&self) -> Result<OwnerKey, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn caller_or_401(&self) -> Result<Caller, ApiError> {
        self.obtain::<Caller>()
            .cloned()
            .map_err(|_ignored| ApiError::unauthorized("missing caller identity"))
    }

    fn owner_or_401(&self) -> Result<OwnerKey, ApiError> {
        self.caller_or_401()?
            .owner_key()
            .ok_or_else(|| ApiError::unauthorized("only shoppers have carts"))
    }
}
