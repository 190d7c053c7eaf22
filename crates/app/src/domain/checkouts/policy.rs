//! Who may move a checkout, and where to.
//!
//! Status changes are checked in three steps: the caller's role against the
//! requested status before anything is loaded, ownership once the record is
//! loaded, then the transition itself.

use crate::{
    auth::{Caller, CallerRole},
    domain::checkouts::{
        errors::CheckoutsServiceError,
        records::{CheckoutRecord, CheckoutStatus},
    },
};

/// Operators may set any status; shoppers may only cancel.
pub fn authorize_status(
    role: CallerRole,
    target: CheckoutStatus,
) -> Result<(), CheckoutsServiceError> {
    match (role, target) {
        (CallerRole::Vendor | CallerRole::Admin, _)
        | (CallerRole::Buyer | CallerRole::Guest, CheckoutStatus::Cancelled) => Ok(()),
        (CallerRole::Buyer | CallerRole::Guest, _) => Err(CheckoutsServiceError::Unauthorized),
    }
}

/// Whether `caller` may see `record`.
#[must_use]
pub fn can_view(caller: &Caller, record: &CheckoutRecord) -> bool {
    caller.role.is_operator() || record.customer_uuid == caller.uuid
}

/// Shoppers may only act on their own orders.
pub fn authorize_owner(
    caller: &Caller,
    record: &CheckoutRecord,
) -> Result<(), CheckoutsServiceError> {
    if can_view(caller, record) {
        Ok(())
    } else {
        Err(CheckoutsServiceError::Unauthorized)
    }
}

/// Only pending orders move, and never back to pending.
pub fn authorize_transition(
    from: CheckoutStatus,
    to: CheckoutStatus,
) -> Result<(), CheckoutsServiceError> {
    if from.is_terminal() || !to.is_terminal() {
        return Err(CheckoutsServiceError::InvalidTransition { from, to });
    }

    Ok(())
}
