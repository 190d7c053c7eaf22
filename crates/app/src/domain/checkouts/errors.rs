//! Checkouts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::{
    domain::{checkouts::records::CheckoutStatus, profiles::ProfilesServiceError},
    errors::ErrorKind,
    money::{AmountError, Money},
};

#[derive(Debug, Error)]
pub enum CheckoutsServiceError {
    #[error("checkout not found")]
    NotFound,

    #[error("no active cart to check out")]
    NoActiveCart,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("caller may not perform this checkout action")]
    Unauthorized,

    #[error("unknown checkout status `{0}`")]
    UnknownStatus(String),

    #[error("checkout cannot move from {from} to {to}")]
    InvalidTransition {
        from: CheckoutStatus,
        to: CheckoutStatus,
    },

    #[error("no active {0} fee for the delivery region")]
    FeeNotFound(String),

    #[error("delivery fee {submitted} does not match the current rate {expected}")]
    InvalidDeliveryFee { submitted: Money, expected: Money },

    #[error("service fee {submitted} does not match the current rate {expected}")]
    InvalidServiceFee { submitted: Money, expected: Money },

    #[error("amount paid {paid} is less than the total {total}")]
    AmountPaid { paid: Money, total: Money },

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("failed to read shopper profile")]
    Profile(#[from] ProfilesServiceError),

    #[error("checkout was written but its cart could not be closed")]
    CartNotClosed,

    #[error("cart has already been checked out")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("checkout request timed out")]
    Timeout(#[from] Elapsed),
}

impl CheckoutsServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::DatabaseNoRecord,
            Self::NoActiveCart => ErrorKind::NoActiveCart,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::UnknownStatus(_) | Self::InvalidTransition { .. } => ErrorKind::CheckoutStatus,
            Self::FeeNotFound(_) => ErrorKind::FeeNotFound,
            Self::InvalidDeliveryFee { .. } => ErrorKind::InvalidDeliveryFee,
            Self::InvalidServiceFee { .. } => ErrorKind::InvalidServiceFee,
            Self::AmountPaid { .. } => ErrorKind::AmountPaid,
            Self::Profile(error) => error.kind(),
            Self::InvalidRequest(_)
            | Self::InvalidAmount(_)
            | Self::AlreadyExists
            | Self::InvalidReference
            | Self::MissingRequiredData
            | Self::InvalidData => ErrorKind::InvalidRequest,
            Self::CartNotClosed | Self::Sql(_) => ErrorKind::Database,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<Error> for CheckoutsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(SqlErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(SqlErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(SqlErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(SqlErrorKind::CheckViolation) => Self::InvalidData,
            Some(SqlErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
