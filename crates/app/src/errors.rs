//! Error taxonomy shared by every service.
//!
//! Service error enums stay specific to their domain; each one classifies
//! itself into one of these kinds so the HTTP boundary can pick a status code
//! and a stable machine-readable code without knowing domain details.

use std::fmt::{self, Display, Formatter};

/// Stable classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Storage I/O failed.
    Database,

    /// An expected record does not exist.
    DatabaseNoRecord,

    /// Missing, invalid or insufficient credentials.
    Unauthorized,

    /// Malformed or incomplete caller input.
    InvalidRequest,

    /// The payment does not cover the computed total.
    AmountPaid,

    /// Submitted delivery fee differs from the ledger.
    InvalidDeliveryFee,

    /// Submitted service fee differs from the ledger.
    InvalidServiceFee,

    /// Unknown checkout status or undefined transition.
    CheckoutStatus,

    /// No active fee covers the requested scope.
    FeeNotFound,

    /// The caller has no active cart.
    NoActiveCart,

    /// Quantity is zero, negative or stale.
    InvalidQuantity,

    /// The request deadline expired.
    Timeout,
}

impl ErrorKind {
    /// Machine-readable error code returned to clients.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Database => "DatabaseError",
            Self::DatabaseNoRecord => "DatabaseNoRecordError",
            Self::Unauthorized => "ErrorUnauthorized",
            Self::InvalidRequest => "InvalidRequestError",
            Self::AmountPaid => "AmountPaidError",
            Self::InvalidDeliveryFee => "InvalidDeliveryFeeError",
            Self::InvalidServiceFee => "InvalidServiceFeeError",
            Self::CheckoutStatus => "CheckoutStatusError",
            Self::FeeNotFound => "FeeNotFoundError",
            Self::NoActiveCart => "NoActiveCartError",
            Self::InvalidQuantity => "InvalidQuantityError",
            Self::Timeout => "TimeoutError",
        }
    }

    /// Whether the failure originates on the server side rather than in the request.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Database | Self::Timeout)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
