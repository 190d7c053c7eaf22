//! Who may change the fee ledger.

use crate::{auth::Caller, domain::fees::FeesServiceError};

/// Only operators quote fees; shoppers may only read them.
pub fn authorize_quote(caller: &Caller) -> Result<(), FeesServiceError> {
    if caller.role.is_operator() {
        Ok(())
    } else {
        Err(FeesServiceError::Unauthorized)
    }
}
