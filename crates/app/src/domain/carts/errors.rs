//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::{errors::ErrorKind, money::AmountError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("no active product fee for {0}")]
    FeeNotFound(String),

    #[error("quantity must be a positive whole number")]
    InvalidQuantity,

    #[error("an item needs a weight or a quantity")]
    MissingCostBasis,

    #[error("item is priced by weight; its quantity cannot be changed")]
    WeightPriced,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("cart request timed out")]
    Timeout(#[from] Elapsed),
}

impl CartsServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::ItemNotFound => ErrorKind::DatabaseNoRecord,
            Self::FeeNotFound(_) => ErrorKind::FeeNotFound,
            Self::InvalidQuantity => ErrorKind::InvalidQuantity,
            Self::MissingCostBasis
            | Self::WeightPriced
            | Self::InvalidReference
            | Self::MissingRequiredData
            | Self::InvalidData
            | Self::InvalidAmount(_) => ErrorKind::InvalidRequest,
            Self::AlreadyExists | Self::Sql(_) => ErrorKind::Database,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<Error> for CartsServiceError {
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
